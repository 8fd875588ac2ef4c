//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。
//! `Converter`はワークブックの各シートを個別のMarkdownファイルに書き出す変換エンジンです。

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::api::DateFormat;
use crate::error::Xl2MdError;
use crate::formatter::validate_date_format;
use crate::parser::{CalamineWorkbook, WorkbookReader};
use crate::render::TableRenderer;
use crate::sanitize::output_file_name;
use crate::security::SecurityConfig;
use crate::sink::LogSink;
use crate::types::ConversionResult;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ConversionConfig {
    /// 出力ディレクトリ（Noneの場合は入力ファイルと同じディレクトリ）
    pub output_dir: Option<PathBuf>,

    /// 日付形式
    pub date_format: DateFormat,

    /// 入力ファイルの読み込み制限
    pub security: SecurityConfig,
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xl2md::{ConverterBuilder, DateFormat};
///
/// # fn main() -> Result<(), xl2md::Xl2MdError> {
/// let converter = ConverterBuilder::new()
///     .with_output_dir("docs/sheets")
///     .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 出力ディレクトリ: 入力ファイルと同じディレクトリ
    /// - 日付形式: ISO 8601
    /// - 入力ファイルの最大サイズ: 2GB
    pub fn new() -> Self {
        Self::default()
    }

    /// 出力ディレクトリを指定する
    ///
    /// 存在しない場合は、変換時に中間ディレクトリも含めて作成されます。
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    /// 日付の出力形式を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xl2md::{ConverterBuilder, DateFormat};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `Xl2MdError::Config(String)`: 設定の検証に失敗した場合
    ///   * カスタム日付形式が空、または不正な書式文字列
    ///   * 入力ファイルの最大サイズが0
    pub fn build(self) -> Result<Converter, Xl2MdError> {
        // 1. カスタム日付形式の検証
        if let DateFormat::Custom(ref pattern) = self.config.date_format {
            validate_date_format(pattern)?;
        }

        // 2. サイズ上限の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(Xl2MdError::Config(
                "Maximum input size must be greater than 0".to_string(),
            ));
        }

        // 3. Converterインスタンス生成
        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// ワークブックを開き、シートごとに`{ベース名}_{サニタイズ済みシート名}.md`を書き出します。
/// シートは1枚ずつ順番に処理され、1枚の失敗は後続のシートに影響しません。
///
/// # 使用例
///
/// ```rust,no_run
/// use xl2md::{ConsoleSink, ConverterBuilder};
///
/// # fn main() -> Result<(), xl2md::Xl2MdError> {
/// let converter = ConverterBuilder::new().build()?;
/// let result = converter.convert("report.xlsx", &ConsoleSink);
/// println!("{} files written", result.written.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// テーブルレンダラー
    renderer: TableRenderer,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            renderer: TableRenderer::new(config.date_format.clone()),
            config,
        }
    }

    /// ワークブックファイルを変換する
    ///
    /// # 処理フロー
    ///
    /// 1. 入力ファイルの存在確認
    /// 2. ワークブックを開く（失敗した場合はファイルを一切書き出さない）
    /// 3. 出力ディレクトリの決定・作成
    /// 4. 各シートについて読み込み → Markdown生成 → 書き出し（シート単位でエラーを捕捉）
    /// 5. 結果のサマリー行を出力
    ///
    /// # 戻り値
    ///
    /// `ConversionResult::success`は、ワークブックを開けて出力ディレクトリを用意できた場合に`true`です。
    /// シート単位の失敗は`success`に影響しません。
    pub fn convert(&self, input: impl AsRef<Path>, sink: &dyn LogSink) -> ConversionResult {
        let input = input.as_ref();
        let outcome = self
            .open(input)
            .and_then(|mut workbook| self.write_sheets(&mut workbook, input, sink));
        finish(outcome, sink)
    }

    /// 既に開いているワークブックを変換する
    ///
    /// `input`は出力ファイル名のベース名とデフォルトの出力ディレクトリを決めるためにのみ使われます。
    /// 任意の`WorkbookReader`実装を変換エンジンに渡すための入口です。
    pub fn convert_workbook<R: WorkbookReader + ?Sized>(
        &self,
        reader: &mut R,
        input: impl AsRef<Path>,
        sink: &dyn LogSink,
    ) -> ConversionResult {
        let outcome = self.write_sheets(reader, input.as_ref(), sink);
        finish(outcome, sink)
    }

    fn open(&self, input: &Path) -> Result<CalamineWorkbook, Xl2MdError> {
        if !input.exists() {
            return Err(Xl2MdError::InputNotFound(input.to_path_buf()));
        }
        CalamineWorkbook::open_with_config(input, &self.config.security)
    }

    /// 全シートを順番に書き出す
    ///
    /// シート単位のエラーはここで捕捉してログに残し、次のシートへ進みます。
    fn write_sheets<R: WorkbookReader + ?Sized>(
        &self,
        reader: &mut R,
        input: &Path,
        sink: &dyn LogSink,
    ) -> Result<Vec<PathBuf>, Xl2MdError> {
        let output_dir = self.resolve_output_dir(input)?;
        let base_name = lossy(input.file_stem());
        let source_name = lossy(input.file_name());

        let sheet_names = reader.sheet_names();
        let total = sheet_names.len();

        sink.emit(&format!("📄 Reading file: {}", input.display()));
        sink.emit(&format!("📊 Number of sheets: {}", total));
        sink.emit(&format!("📁 Output directory: {}", output_dir.display()));

        let mut written = Vec::with_capacity(total);
        for (idx, sheet_name) in sheet_names.iter().enumerate() {
            sink.emit(&format!(
                "  📋 Processing sheet {}/{}: {}",
                idx + 1,
                total,
                sheet_name
            ));

            let path = output_dir.join(output_file_name(&base_name, sheet_name));
            match self.write_sheet(reader, sheet_name, &source_name, &path) {
                Ok(()) => {
                    sink.emit(&format!("    ✅ Saved: {}", lossy(path.file_name())));
                    // 別シートと同じファイル名になった場合は上書きされたことを通知
                    if written.contains(&path) {
                        sink.emit(&format!(
                            "    ⚠️  Overwrote {} written by an earlier sheet",
                            lossy(path.file_name())
                        ));
                    }
                    written.push(path);
                }
                Err(e) => {
                    tracing::debug!(sheet = %sheet_name, error = %e, "sheet skipped");
                    sink.emit(&format!(
                        "    ⚠️  Error processing sheet '{}': {}",
                        sheet_name, e
                    ));
                }
            }
        }

        Ok(written)
    }

    /// 1シート分の読み込み・レンダリング・書き出し
    fn write_sheet<R: WorkbookReader + ?Sized>(
        &self,
        reader: &mut R,
        sheet_name: &str,
        source_name: &str,
        path: &Path,
    ) -> Result<(), Xl2MdError> {
        let sheet = reader.read_sheet(sheet_name)?;
        let document = self.renderer.render_document(&sheet, source_name);

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(document.as_bytes())?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), rows = sheet.row_count(), "sheet written");
        Ok(())
    }

    /// 出力ディレクトリを決定する
    ///
    /// 指定がない場合は入力ファイルの親ディレクトリ（親がなければカレントディレクトリ）。
    /// 指定がある場合は、存在しなければ作成する。
    fn resolve_output_dir(&self, input: &Path) -> Result<PathBuf, Xl2MdError> {
        match &self.config.output_dir {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|source| Xl2MdError::OutputDirectory {
                    path: dir.clone(),
                    source,
                })?;
                Ok(dir.clone())
            }
            None => Ok(match input.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }),
        }
    }
}

/// 変換結果をまとめ、サマリー行を出力する
fn finish(outcome: Result<Vec<PathBuf>, Xl2MdError>, sink: &dyn LogSink) -> ConversionResult {
    match outcome {
        Ok(written) => {
            sink.emit(&format!(
                "✅ Conversion complete: {} files created",
                written.len()
            ));
            ConversionResult {
                written,
                success: true,
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "conversion failed");
            sink.emit(&format!("❌ Conversion failed: {} (0 files created)", e));
            ConversionResult {
                written: Vec::new(),
                success: false,
            }
        }
    }
}

fn lossy(part: Option<&std::ffi::OsStr>) -> String {
    part.map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// ワークブックの各シートをMarkdownファイルに変換する
///
/// `output_dir`が`None`の場合は入力ファイルと同じディレクトリに書き出します。
/// ワークブックを開けなかった場合、または出力ディレクトリを作成できなかった場合に`false`を返します。
/// エラーは戻り値ではなく`sink`に出力されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::path::Path;
/// use xl2md::{convert, ConsoleSink};
///
/// let ok = convert("report.xlsx", Some(Path::new("out")), &ConsoleSink);
/// assert!(ok);
/// ```
pub fn convert(input: impl AsRef<Path>, output_dir: Option<&Path>, sink: &dyn LogSink) -> bool {
    let mut builder = ConverterBuilder::new();
    if let Some(dir) = output_dir {
        builder = builder.with_output_dir(dir);
    }

    match builder.build() {
        Ok(converter) => converter.convert(input, sink).success,
        Err(e) => {
            sink.emit(&format!("❌ Conversion failed: {} (0 files created)", e));
            false
        }
    }
}
