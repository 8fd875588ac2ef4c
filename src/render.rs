//! Table Renderer
//!
//! `Sheet`をパイプ区切りのMarkdownテーブルに変換するモジュール。

use crate::api::DateFormat;
use crate::formatter::CellFormatter;
use crate::types::Sheet;

/// データ行が1件もないテーブルの出力
pub const EMPTY_TABLE_MARKER: &str = "*Table is empty.*";

/// 表データを持たないシートのドキュメント本文
pub const EMPTY_SHEET_MARKER: &str = "*This sheet is empty.*";

/// Markdownテーブルレンダラー
///
/// 出力形式:
///
/// ```markdown
/// | A | B |
/// | --- | --- |
/// | 1 | x\|y |
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableRenderer {
    formatter: CellFormatter,
}

impl TableRenderer {
    /// 指定した日付形式でレンダラーを生成
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            formatter: CellFormatter::new(date_format),
        }
    }

    /// シートをMarkdownテーブル文字列に変換する
    ///
    /// - データ行が0件の場合は、ヘッダーの有無にかかわらず`EMPTY_TABLE_MARKER`を返す
    /// - ヘッダーはエスケープせずにそのまま出力する
    /// - データセルは`|`→`\|`、改行→`<br>`の順にエスケープする
    /// - 行の要素数はそのまま出力する（パディング・切り詰めはしない）
    ///
    /// 行は`\n`で連結され、末尾に改行は付きません。
    pub fn render(&self, sheet: &Sheet) -> String {
        if sheet.rows.is_empty() {
            return EMPTY_TABLE_MARKER.to_string();
        }

        let mut lines = Vec::with_capacity(sheet.rows.len() + 2);

        lines.push(table_row(sheet.headers.iter().cloned()));
        lines.push(table_row(sheet.headers.iter().map(|_| "---".to_string())));

        for row in &sheet.rows {
            lines.push(table_row(
                row.iter()
                    .map(|value| escape_cell(&self.formatter.format(value))),
            ));
        }

        lines.join("\n")
    }

    /// シート1枚分のMarkdownドキュメントを生成する
    ///
    /// 見出し、ソースファイル名、シート名、水平線に続けてテーブルを出力します。
    /// シート名はサニタイズせずにそのまま使います。
    ///
    /// ```markdown
    /// # Sheet1
    /// *Source file: report.xlsx*
    /// *Sheet name: Sheet1*
    /// ---
    ///
    /// | A | B |
    /// | --- | --- |
    /// ```
    pub fn render_document(&self, sheet: &Sheet, source_file_name: &str) -> String {
        let body = if sheet.is_empty() {
            EMPTY_SHEET_MARKER.to_string()
        } else {
            self.render(sheet)
        };

        format!(
            "# {name}\n*Source file: {source}*\n*Sheet name: {name}*\n---\n\n{body}\n",
            name = sheet.name,
            source = source_file_name,
            body = body,
        )
    }
}

/// デフォルト設定（ISO 8601日付）でシートをMarkdownテーブルに変換する
///
/// # 使用例
///
/// ```rust
/// use xl2md::{render_table, CellValue, Sheet};
///
/// let sheet = Sheet::new(
///     "Data",
///     vec!["A".to_string(), "B".to_string()],
///     vec![vec![CellValue::from(1.0), CellValue::from("x|y")]],
/// );
/// assert_eq!(render_table(&sheet), "| A | B |\n| --- | --- |\n| 1 | x\\|y |");
/// ```
pub fn render_table(sheet: &Sheet) -> String {
    TableRenderer::default().render(sheet)
}

/// `| a | b | c |`形式の1行を生成
fn table_row(cells: impl Iterator<Item = String>) -> String {
    let cells: Vec<String> = cells.collect();
    format!("| {} |", cells.join(" | "))
}

/// テーブルセル内で構造を壊す文字をエスケープ
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', "<br>")
}
