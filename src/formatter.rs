//! Formatter Module
//!
//! セル値の変換・フォーマット処理を提供するモジュール。
//! calamineのセルデータを`CellValue`へ変換し、`CellValue`を文字列化します。

use std::fmt::Write as _;

use calamine::Data;
use chrono::format::{Item, StrftimeItems};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::api::DateFormat;
use crate::error::Xl2MdError;
use crate::types::CellValue;

/// セルフォーマッター
///
/// `CellValue`の文字列化を担当します。
/// 日付以外の値は設定によらず同じ文字列になります。
#[derive(Debug, Clone, Default)]
pub(crate) struct CellFormatter {
    /// 日付形式
    date_format: DateFormat,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new(date_format: DateFormat) -> Self {
        Self { date_format }
    }

    /// セル値を文字列化する
    ///
    /// # 変換ルール
    ///
    /// - `Empty` → 空文字列
    /// - `Number` → `f64`の標準表記（`1.0` → `1`）
    /// - `Bool` → `TRUE` / `FALSE`
    /// - `DateTime` → `DateFormat`に従う
    /// - `Text` → そのまま
    pub fn format(&self, value: &CellValue) -> String {
        match value {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::DateTime(dt) => self.format_datetime(dt),
            CellValue::Empty => String::new(),
        }
    }

    fn format_datetime(&self, dt: &NaiveDateTime) -> String {
        match &self.date_format {
            DateFormat::Iso8601 => iso8601(dt),
            DateFormat::Custom(pattern) => {
                // 不正な書式はbuild()で弾かれるが、直接生成された場合はISO 8601へフォールバック
                let mut out = String::new();
                match write!(out, "{}", dt.format(pattern)) {
                    Ok(()) => out,
                    Err(_) => iso8601(dt),
                }
            }
        }
    }
}

fn iso8601(dt: &NaiveDateTime) -> String {
    if dt.time().num_seconds_from_midnight() == 0 && dt.time().nanosecond() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// calamineのセルデータを`CellValue`に変換
///
/// 日付・時刻の変換はcalamineに任せます（ワークブックの1900年 / 1904年システムを反映）。
/// 期間（duration）は`H:MM:SS`形式の文字列になります。
/// 日時として表せないシリアル値は数値のまま残します。
pub(crate) fn cell_value_from_data(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                dt.as_duration()
                    .map(|d| CellValue::Text(format_duration(d)))
                    .unwrap_or(CellValue::Number(dt.as_f64()))
            } else {
                dt.as_datetime()
                    .map(CellValue::DateTime)
                    .unwrap_or(CellValue::Number(dt.as_f64()))
            }
        }
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

/// 期間を`H:MM:SS`形式に変換（ミリ秒は四捨五入）
fn format_duration(duration: Duration) -> String {
    let millis = duration.num_milliseconds();
    let total = (millis.unsigned_abs() + 500) / 1000;
    let sign = if millis < 0 { "-" } else { "" };
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// ISO 8601形式の日時（または日付）文字列をパース
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| s.parse::<NaiveDate>().ok()?.and_hms_opt(0, 0, 0))
}

/// カスタム日付形式を検証
///
/// 空文字列、またはchronoが解釈できない指定子を含む書式はエラーになります。
pub(crate) fn validate_date_format(pattern: &str) -> Result<(), Xl2MdError> {
    if pattern.is_empty() {
        return Err(Xl2MdError::Config(
            "Invalid date format string: ''".to_string(),
        ));
    }

    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(Xl2MdError::Config(format!(
            "Invalid date format string: '{}'",
            pattern
        )));
    }

    Ok(())
}
