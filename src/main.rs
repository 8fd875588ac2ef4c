//! xl2md CLI - convert every sheet of a workbook into its own Markdown file

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use xl2md::{ConsoleSink, ConverterBuilder, DateFormat, LogSink, NullSink};

const RULE_WIDTH: usize = 60;

#[derive(Parser)]
#[command(name = "xl2md")]
#[command(
    author,
    version,
    about = "Convert each sheet of an Excel workbook into a separate Markdown file"
)]
struct Cli {
    /// Input workbook (xlsx, xlsm, xlsb, xls, ods). Nothing is done when omitted.
    input: Option<PathBuf>,

    /// Output directory (default: the input file's directory)
    output_dir: Option<PathBuf>,

    /// Custom chrono format for date cells, e.g. "%Y/%m/%d"
    #[arg(long, value_name = "FMT")]
    date_format: Option<String>,

    /// Only print the final result line
    #[arg(short, long)]
    quiet: bool,
}

/// `RUST_LOG`の指定（未設定・不正な場合は`warn`）
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();

    let Some(input) = cli.input else {
        return Ok(ExitCode::SUCCESS);
    };

    let mut builder = ConverterBuilder::new();
    if let Some(dir) = cli.output_dir {
        builder = builder.with_output_dir(dir);
    }
    if let Some(pattern) = cli.date_format {
        builder = builder.with_date_format(DateFormat::Custom(pattern));
    }
    let converter = builder.build().context("Invalid converter configuration")?;

    let sink: &dyn LogSink = if cli.quiet { &NullSink } else { &ConsoleSink };

    if !cli.quiet {
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("XLSX to Markdown Converter (Separated by Sheet)");
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    let result = converter.convert(&input, sink);

    if result.success {
        println!("\n✨ Conversion completed successfully!");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("\n❌ Conversion failed.");
        Ok(ExitCode::FAILURE)
    }
}
