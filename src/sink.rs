//! Log Sink Module
//!
//! 変換エンジンの進捗・エラーメッセージの出力先を抽象化するモジュール。
//! エンジンは標準出力へ直接書き込まず、呼び出し側が渡した`LogSink`にのみ行を送ります。

use std::sync::Mutex;

/// 進捗メッセージの受け取り先
///
/// 1行ずつ`emit`が呼ばれます。表示・保存・破棄のいずれを行うかは実装次第です。
///
/// クロージャ（`Fn(&str)`）もそのまま`LogSink`として使えます。
///
/// ```rust
/// use std::cell::RefCell;
/// use xl2md::LogSink;
///
/// let lines = RefCell::new(Vec::new());
/// let sink = |line: &str| lines.borrow_mut().push(line.to_string());
/// sink.emit("hello");
/// assert_eq!(lines.borrow().as_slice(), ["hello"]);
/// ```
pub trait LogSink {
    /// 1行分のメッセージを受け取る
    fn emit(&self, line: &str);
}

impl<F: Fn(&str)> LogSink for F {
    fn emit(&self, line: &str) {
        self(line)
    }
}

/// すべてのメッセージを破棄する（デフォルト）
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn emit(&self, _line: &str) {}
}

/// 標準出力に1行ずつ書き出す
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn emit(&self, line: &str) {
        println!("{}", line);
    }
}

/// `tracing`のINFOイベントとして転送する
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::info!(target: "xl2md::progress", "{}", line);
    }
}

/// メッセージをメモリ上に蓄積する
///
/// テストや、変換後にまとめてログを表示したい呼び出し側向けです。
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// 空のシンクを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに受け取った行のコピー
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 指定した部分文字列を含む行があるか
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn emit(&self, line: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(line.to_string());
    }
}
