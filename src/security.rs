//! Security Module
//!
//! 入力ファイルの読み込み時に適用する制限を実装するモジュール。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Xl2MdError;

/// 入力ファイルの最大サイズのデフォルト値: 2GB (2_147_483_648 bytes)
pub(crate) const DEFAULT_MAX_INPUT_FILE_SIZE: u64 = 2_147_483_648;

/// セキュリティ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_FILE_SIZE,
        }
    }
}

impl SecurityConfig {
    /// サイズ上限を確認したうえで、ファイル全体をメモリに読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - ファイルの内容
    /// * `Err(Xl2MdError::InputTooLarge)` - サイズ上限を超えた場合
    /// * `Err(Xl2MdError::Io)` - 読み込みに失敗した場合
    pub fn read_input(&self, path: &Path) -> Result<Vec<u8>, Xl2MdError> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        self.check_size(size)?;

        // メタデータ取得後にファイルが伸びても上限+1バイトまでしか読まない
        let mut buffer = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
        file.take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        self.check_size(buffer.len() as u64)?;

        Ok(buffer)
    }

    fn check_size(&self, size: u64) -> Result<(), Xl2MdError> {
        if size > self.max_input_file_size {
            return Err(Xl2MdError::InputTooLarge {
                size,
                limit: self.max_input_file_size,
            });
        }
        Ok(())
    }
}
