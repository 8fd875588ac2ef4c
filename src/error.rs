//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// xl2mdクレート全体で使用するエラー型
///
/// ワークブックの読み込み、シートの変換、Markdownファイルの書き出し中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類と扱い
///
/// - `InputNotFound` / `WorkbookOpen` / `InputTooLarge`: ワークブック単位のエラー。
///   変換全体が失敗し、ファイルは一切書き出されません。
/// - `OutputDirectory`: 出力ディレクトリを作成できなかったエラー。変換全体が失敗します。
/// - `Sheet` / `Io`: シート単位のエラー。ログに記録され、次のシートの処理が続行されます。
/// - `Config`: `ConverterBuilder::build()`時の設定検証エラー。
///
/// # 使用例
///
/// ```rust,no_run
/// use xl2md::Xl2MdError;
/// use std::fs::File;
///
/// fn touch(path: &str) -> Result<(), Xl2MdError> {
///     let _file = File::create(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Xl2MdError {
    /// 入力ファイルが存在しない
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// ワークブックとして開けなかったエラー
    ///
    /// calamineがファイルを解析できなかった場合（破損したファイル、
    /// サポートされていない形式など）に発生します。
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(#[from] calamine::Error),

    /// 入力ファイルのサイズが上限を超えたエラー
    #[error("Input file size exceeds maximum: {size} bytes (max: {limit} bytes)")]
    InputTooLarge {
        /// 実際のファイルサイズ（バイト）
        size: u64,
        /// 許容される最大サイズ（バイト）
        limit: u64,
    },

    /// 出力ディレクトリの作成に失敗したエラー
    #[error("Failed to create output directory '{}': {source}", path.display())]
    OutputDirectory {
        /// 作成しようとしたディレクトリ
        path: PathBuf,
        /// 元のI/Oエラー
        source: std::io::Error,
    },

    /// 単一シートの読み込みに失敗したエラー
    ///
    /// このエラーはシート境界で捕捉され、変換全体は継続されます。
    #[error("Failed to read sheet '{sheet}': {message}")]
    Sheet {
        /// エラーが発生したシート名
        sheet: String,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xl2md::{ConverterBuilder, DateFormat, Xl2MdError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom(String::new()))
    ///     .build();
    ///
    /// if let Err(Xl2MdError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),
}
