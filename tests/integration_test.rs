//! Integration Tests for xl2md
//!
//! These tests generate real workbooks with rust_xlsxwriter, convert them
//! into a temporary directory and inspect the Markdown files on disk.

use rust_xlsxwriter::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xl2md::{
    convert, spawn_conversion, ConversionEvent, ConverterBuilder, DateFormat, MemorySink,
};

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// Two-column table exercising pipe and newline escaping
    pub fn generate_escaping_table(path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Sheet1")?;

        worksheet.write_string(0, 0, "A")?;
        worksheet.write_string(0, 1, "B")?;

        worksheet.write_number(1, 0, 1.0)?;
        worksheet.write_string(1, 1, "x|y")?;

        // (2, 0) is left blank on purpose
        worksheet.write_string(2, 1, "line1\nline2")?;

        workbook.save(path)
    }

    /// Workbook whose sheets each hold a one-cell table
    pub fn generate_named_sheets(path: &Path, names: &[&str]) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        for name in names {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(*name)?;
            worksheet.write_string(0, 0, "Name")?;
            worksheet.write_string(1, 0, *name)?;
        }
        workbook.save(path)
    }

    /// One completely blank sheet and one with only a header row
    pub fn generate_empty_sheets(path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("Blank")?;

        let header_only = workbook.add_worksheet();
        header_only.set_name("HeaderOnly")?;
        header_only.write_string(0, 0, "A")?;
        header_only.write_string(0, 1, "B")?;

        workbook.save(path)
    }

    /// Dates, booleans and a gap in the header row
    pub fn generate_typed_values(path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Typed")?;

        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        worksheet.write_string(0, 0, "When")?;
        // (0, 1) has no header
        worksheet.write_string(0, 2, "Flag")?;

        // 45306 = 2024-01-15
        worksheet.write_number_with_format(1, 0, 45306.0, &date_format)?;
        worksheet.write_number(1, 1, 2.5)?;
        worksheet.write_boolean(1, 2, true)?;

        workbook.save(path)
    }
}

fn workspace() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn markdown_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".md"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_one_file_per_sheet_with_sanitized_names() {
    let dir = workspace();
    let input = dir.path().join("report.xlsx");
    fixtures::generate_named_sheets(&input, &["Sheet1", "Sheet 2!", "Sheet 3"]).unwrap();
    let out = dir.path().join("out");

    let sink = MemorySink::new();
    assert!(convert(&input, Some(out.as_path()), &sink));

    assert_eq!(
        markdown_files(&out),
        vec!["report_Sheet1.md", "report_Sheet_2!.md", "report_Sheet_3.md"]
    );
    assert!(sink.contains("Conversion complete: 3 files created"));
}

#[test]
fn test_document_content_is_exact() {
    let dir = workspace();
    let input = dir.path().join("report.xlsx");
    fixtures::generate_escaping_table(&input).unwrap();

    assert!(convert(&input, None, &MemorySink::new()));

    let content = fs::read_to_string(dir.path().join("report_Sheet1.md")).unwrap();
    assert_eq!(
        content,
        "# Sheet1\n\
         *Source file: report.xlsx*\n\
         *Sheet name: Sheet1*\n\
         ---\n\
         \n\
         | A | B |\n\
         | --- | --- |\n\
         | 1 | x\\|y |\n\
         |  | line1<br>line2 |\n"
    );
}

#[test]
fn test_default_output_dir_is_input_parent() {
    let dir = workspace();
    let input = dir.path().join("book.xlsx");
    fixtures::generate_named_sheets(&input, &["Data"]).unwrap();

    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.convert(&input, &MemorySink::new());

    assert!(result.success);
    assert_eq!(result.written, vec![dir.path().join("book_Data.md")]);
}

#[test]
fn test_nested_output_dir_is_created() {
    let dir = workspace();
    let input = dir.path().join("book.xlsx");
    fixtures::generate_named_sheets(&input, &["Data"]).unwrap();
    let out = dir.path().join("a").join("b").join("c");

    assert!(convert(&input, Some(out.as_path()), &MemorySink::new()));
    assert!(out.join("book_Data.md").is_file());
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = workspace();
    let out = dir.path().join("out");
    let sink = MemorySink::new();

    let ok = convert(dir.path().join("nope.xlsx"), Some(out.as_path()), &sink);

    assert!(!ok);
    assert!(!out.exists());
    assert!(markdown_files(dir.path()).is_empty());
    assert!(sink.contains("not found"));
}

#[test]
fn test_corrupt_workbook_fails_without_output() {
    let dir = workspace();
    let input = dir.path().join("broken.xlsx");
    fs::write(&input, b"This is not an Excel file").unwrap();
    let out = dir.path().join("out");
    let sink = MemorySink::new();

    let ok = convert(&input, Some(out.as_path()), &sink);

    assert!(!ok);
    assert!(!out.exists());
    assert!(sink.contains("Failed to open workbook"));
    assert!(sink.contains("Conversion failed"));
}

#[test]
fn test_input_over_size_limit_fails() {
    let dir = workspace();
    let input = dir.path().join("book.xlsx");
    fixtures::generate_named_sheets(&input, &["Data"]).unwrap();

    let converter = ConverterBuilder::new()
        .with_max_input_size(16)
        .build()
        .unwrap();
    let sink = MemorySink::new();
    let result = converter.convert(&input, &sink);

    assert!(!result.success);
    assert!(result.written.is_empty());
    assert!(sink.contains("exceeds maximum"));
}

#[test]
fn test_output_dir_failure_is_overall_failure() {
    let dir = workspace();
    let input = dir.path().join("book.xlsx");
    fixtures::generate_named_sheets(&input, &["Data"]).unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, b"file").unwrap();

    let sink = MemorySink::new();
    let ok = convert(&input, Some(blocker.join("out").as_path()), &sink);

    assert!(!ok);
    assert!(sink.contains("Failed to create output directory"));
}

#[test]
fn test_empty_sheets_get_marker() {
    let dir = workspace();
    let input = dir.path().join("empty.xlsx");
    fixtures::generate_empty_sheets(&input).unwrap();

    assert!(convert(&input, None, &MemorySink::new()));

    for name in ["empty_Blank.md", "empty_HeaderOnly.md"] {
        let content = fs::read_to_string(dir.path().join(name)).unwrap();
        assert!(
            content.ends_with("---\n\n*This sheet is empty.*\n"),
            "unexpected content in {}: {}",
            name,
            content
        );
        assert!(!content.contains("| --- |"));
    }
}

#[test]
fn test_failing_sheet_does_not_stop_others() {
    let dir = workspace();
    let input = dir.path().join("report.xlsx");
    fixtures::generate_named_sheets(&input, &["One", "Two", "Three"]).unwrap();
    let out = dir.path().join("out");
    // A directory in the way makes writing the second sheet fail
    fs::create_dir_all(out.join("report_Two.md")).unwrap();

    let converter = ConverterBuilder::new().with_output_dir(&out).build().unwrap();
    let sink = MemorySink::new();
    let result = converter.convert(&input, &sink);

    assert!(result.success);
    assert_eq!(
        result.written,
        vec![out.join("report_One.md"), out.join("report_Three.md")]
    );
    assert!(out.join("report_Three.md").is_file());
    assert!(sink.contains("Error processing sheet 'Two'"));
    assert!(sink.contains("Conversion complete: 2 files created"));
}

#[test]
fn test_rerun_is_byte_identical_and_overwrites() {
    let dir = workspace();
    let input = dir.path().join("report.xlsx");
    fixtures::generate_escaping_table(&input).unwrap();
    let output: PathBuf = dir.path().join("report_Sheet1.md");
    fs::write(&output, "stale content that is longer than the real document").unwrap();

    assert!(convert(&input, None, &MemorySink::new()));
    let first = fs::read(&output).unwrap();

    assert!(convert(&input, None, &MemorySink::new()));
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert!(!String::from_utf8(first).unwrap().contains("stale"));
}

#[test]
fn test_typed_values_and_unnamed_header() {
    let dir = workspace();
    let input = dir.path().join("typed.xlsx");
    fixtures::generate_typed_values(&input).unwrap();

    assert!(convert(&input, None, &MemorySink::new()));

    let content = fs::read_to_string(dir.path().join("typed_Typed.md")).unwrap();
    assert!(content.contains("| When | Unnamed: 1 | Flag |"));
    assert!(content.contains("| 2024-01-15 | 2.5 | TRUE |"));
}

#[test]
fn test_custom_date_format() {
    let dir = workspace();
    let input = dir.path().join("typed.xlsx");
    fixtures::generate_typed_values(&input).unwrap();

    let converter = ConverterBuilder::new()
        .with_date_format(DateFormat::Custom("%d/%m/%Y".to_string()))
        .build()
        .unwrap();
    assert!(converter.convert(&input, &MemorySink::new()).success);

    let content = fs::read_to_string(dir.path().join("typed_Typed.md")).unwrap();
    assert!(content.contains("| 15/01/2024 | 2.5 | TRUE |"));
}

#[test]
fn test_background_conversion_reports_events() {
    let dir = workspace();
    let input = dir.path().join("report.xlsx");
    fixtures::generate_named_sheets(&input, &["A", "B"]).unwrap();

    let converter = ConverterBuilder::new().build().unwrap();
    let handle = spawn_conversion(converter, &input);

    let mut logs = Vec::new();
    let mut finished = None;
    while let Some(event) = handle.recv_event() {
        match event {
            ConversionEvent::Log(line) => logs.push(line),
            ConversionEvent::Finished { success, files } => finished = Some((success, files)),
        }
    }
    assert!(handle.join().is_empty());

    let (success, files) = finished.expect("no Finished event");
    assert!(success);
    assert_eq!(
        files,
        vec![dir.path().join("report_A.md"), dir.path().join("report_B.md")]
    );
    assert!(logs.iter().any(|line| line.contains("Processing sheet 2/2: B")));
}
