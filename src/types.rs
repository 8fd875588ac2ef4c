//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::api::DateFormat;
use crate::formatter::CellFormatter;

/// セルの値を表す列挙型
///
/// 文字列化のルールは`CellFormatter`に集約されています。
/// `Display`実装はデフォルトの日付形式（ISO 8601）を使用します。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 日付・日時
    DateTime(NaiveDateTime),

    /// 空セル（欠損値）
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CellFormatter::new(DateFormat::Iso8601).format(self))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::DateTime(d.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// シート（ヘッダー行 + データ行）
///
/// ワークブックから読み込まれた1シート分の表データです。
/// 行は通常ヘッダー数と同じ要素数を持ちますが、不揃いな行もそのまま保持します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    /// シート名（サニタイズ前）
    pub name: String,

    /// 列ヘッダー
    pub headers: Vec<String>,

    /// データ行
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// 新しいシートを生成
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// データ行の数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列（ヘッダー）の数
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// 出力すべき表データを持たないかどうか
    ///
    /// データ行が0件、または列が0件の場合に`true`を返します。
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }
}

/// 1回の変換呼び出しの結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionResult {
    /// 書き出しに成功したファイル（ワークブック内のシート順）
    pub written: Vec<std::path::PathBuf>,

    /// ワークブックを開けたかどうか（シート単位の失敗は影響しない）
    pub success: bool,
}
