//! Background Worker
//!
//! 変換処理をワーカースレッドで実行し、進捗をチャネル経由で通知するモジュール。
//! GUIなど応答性が必要な呼び出し側は、UIスレッドからイベントをポーリングします。

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, RecvError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::builder::Converter;
use crate::sink::LogSink;

/// ワーカーから通知されるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionEvent {
    /// 進捗ログ1行
    Log(String),

    /// 変換完了（最後に1回だけ送られる）
    Finished {
        /// ワークブックを開けたかどうか
        success: bool,
        /// 書き出したファイル
        files: Vec<PathBuf>,
    },
}

/// ログ行を`ConversionEvent::Log`としてチャネルに送るシンク
///
/// 受信側が既に破棄されている場合、送信エラーは無視されます。
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<ConversionEvent>,
}

impl ChannelSink {
    /// 送信側を指定してシンクを生成
    pub fn new(sender: Sender<ConversionEvent>) -> Self {
        Self { sender }
    }
}

impl LogSink for ChannelSink {
    fn emit(&self, line: &str) {
        let _ = self.sender.send(ConversionEvent::Log(line.to_string()));
    }
}

/// 実行中の変換へのハンドル
#[derive(Debug)]
pub struct ConversionHandle {
    events: Receiver<ConversionEvent>,
    thread: Option<JoinHandle<()>>,
}

impl ConversionHandle {
    /// 次のイベントを取得する（ノンブロッキング）
    ///
    /// イベントがまだない場合、またはワーカーが終了済みの場合は`None`を返します。
    pub fn try_next_event(&self) -> Option<ConversionEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// 次のイベントを待つ（ブロッキング）
    ///
    /// すべてのイベントを受信し終えた後は`None`を返します。
    pub fn recv_event(&self) -> Option<ConversionEvent> {
        match self.events.recv() {
            Ok(event) => Some(event),
            Err(RecvError) => None,
        }
    }

    /// ワーカースレッドの終了を待ち、未受信のイベントをすべて返す
    pub fn join(mut self) -> Vec<ConversionEvent> {
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::warn!("conversion worker panicked");
            }
        }
        self.events.try_iter().collect()
    }
}

/// 変換をワーカースレッドで開始する
///
/// ログ行は`ConversionEvent::Log`として、完了は`ConversionEvent::Finished`として届きます。
/// 同じ出力先に対する複数の変換を同時に走らせないことは呼び出し側の責任です。
///
/// # 使用例
///
/// ```rust,no_run
/// use xl2md::{spawn_conversion, ConversionEvent, ConverterBuilder};
///
/// # fn main() -> Result<(), xl2md::Xl2MdError> {
/// let converter = ConverterBuilder::new().build()?;
/// let handle = spawn_conversion(converter, "report.xlsx");
///
/// while let Some(event) = handle.recv_event() {
///     match event {
///         ConversionEvent::Log(line) => println!("{}", line),
///         ConversionEvent::Finished { success, .. } => println!("done: {}", success),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn spawn_conversion(converter: Converter, input: impl Into<PathBuf>) -> ConversionHandle {
    let input = input.into();
    let (sender, events) = channel();

    let thread = thread::spawn(move || {
        let sink = ChannelSink::new(sender.clone());
        let result = converter.convert(&input, &sink);
        let _ = sender.send(ConversionEvent::Finished {
            success: result.success,
            files: result.written,
        });
    });

    ConversionHandle {
        events,
        thread: Some(thread),
    }
}
