//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 日付の出力形式
///
/// 日付・時刻セルをMarkdownに変換する際の出力形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式（デフォルト）
    ///
    /// 時刻成分が0時0分0秒の場合は日付のみ、それ以外は日時を出力します。
    ///
    /// 例: `2025-11-20`、`2025-11-20 13:45:00`
    #[default]
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// chrono互換のフォーマット文字列を使用して、カスタム日付形式を指定します。
    /// 書式文字列は`ConverterBuilder::build()`時に検証されます。
    ///
    /// # フォーマット指定子（主要なもの）
    ///
    /// - `%Y`: 4桁の年（例: 2025）
    /// - `%m`: 2桁の月（01-12）
    /// - `%d`: 2桁の日（01-31）
    /// - `%H`: 24時間形式の時（00-23）
    /// - `%M`: 分（00-59）
    /// - `%S`: 秒（00-59）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xl2md::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), xl2md::Xl2MdError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}
