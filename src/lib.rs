//! xl2md - Excel workbook to per-sheet Markdown converter
//!
//! このクレートは、ワークブック（XLSXなど）の各シートを個別のMarkdownファイルに変換します。
//! 出力は差分を取りやすく、バージョン管理に適したパイプ区切りのテーブルです。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use xl2md::{convert, ConsoleSink};
//!
//! // report.xlsx の各シートを out/report_<シート名>.md に書き出す
//! let ok = convert("report.xlsx", Some(Path::new("out")), &ConsoleSink);
//! if !ok {
//!     eprintln!("conversion failed");
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use xl2md::{ConverterBuilder, DateFormat, MemorySink};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_output_dir("docs")
//!         .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
//!         .build()?;
//!
//!     let sink = MemorySink::new();
//!     let result = converter.convert("report.xlsx", &sink);
//!     for path in &result.written {
//!         println!("{}", path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rendering a Sheet Directly
//!
//! ```rust
//! use xl2md::{render_table, CellValue, Sheet};
//!
//! let sheet = Sheet::new(
//!     "Sheet1",
//!     vec!["A".to_string(), "B".to_string()],
//!     vec![
//!         vec![CellValue::from(1.0), CellValue::from("x|y")],
//!         vec![CellValue::Empty, CellValue::from("line1\nline2")],
//!     ],
//! );
//!
//! assert_eq!(
//!     render_table(&sheet),
//!     "| A | B |\n| --- | --- |\n| 1 | x\\|y |\n|  | line1<br>line2 |"
//! );
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod parser;
mod render;
mod sanitize;
mod security;
mod sink;
mod types;
mod worker;

// 公開API
pub use api::DateFormat;
pub use builder::{convert, Converter, ConverterBuilder};
pub use error::Xl2MdError;
pub use parser::{CalamineWorkbook, WorkbookReader};
pub use render::{render_table, TableRenderer, EMPTY_SHEET_MARKER, EMPTY_TABLE_MARKER};
pub use sanitize::{output_file_name, sanitize_filename};
pub use sink::{ConsoleSink, LogSink, MemorySink, NullSink, TracingSink};
pub use types::{CellValue, ConversionResult, Sheet};
pub use worker::{spawn_conversion, ChannelSink, ConversionEvent, ConversionHandle};
