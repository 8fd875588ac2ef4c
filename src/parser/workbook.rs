//! Workbook Reader
//!
//! calamineを使用したワークブック読み込みの実装。
//! シート名の列挙と、シートごとのヘッダー行・データ行の取得を提供します。

use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::error::Xl2MdError;
use crate::formatter::cell_value_from_data;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Sheet};

/// ワークブックの読み込み元
///
/// 変換エンジンが必要とする最小限の操作です。
/// この契約を満たす実装であれば、calamine以外のバックエンドにも差し替えられます。
pub trait WorkbookReader {
    /// ワークブック内のシート名（ワークブック内の順序）
    fn sheet_names(&self) -> Vec<String>;

    /// 指定したシートのヘッダー行とデータ行を読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(Sheet)` - 読み込みに成功した場合
    /// * `Err(Xl2MdError)` - シートが存在しない、または読み込みに失敗した場合
    fn read_sheet(&mut self, name: &str) -> Result<Sheet, Xl2MdError>;
}

/// calamineによるワークブックリーダー
///
/// ファイル全体をメモリに読み込み、形式（xlsx / xlsm / xlsb / xls / ods）を自動判別して開きます。
pub struct CalamineWorkbook {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl CalamineWorkbook {
    /// デフォルトのサイズ上限でワークブックを開く
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Xl2MdError> {
        Self::open_with_config(path.as_ref(), &SecurityConfig::default())
    }

    /// セキュリティ設定を指定してワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(CalamineWorkbook)` - ワークブックの読み込みに成功した場合
    /// * `Err(Xl2MdError::InputTooLarge)` - ファイルサイズが上限を超えた場合
    /// * `Err(Xl2MdError::WorkbookOpen)` - ワークブックとして解析できなかった場合
    pub(crate) fn open_with_config(
        path: &Path,
        security: &SecurityConfig,
    ) -> Result<Self, Xl2MdError> {
        let buffer = security.read_input(path)?;
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        tracing::debug!(path = %path.display(), "workbook opened");

        Ok(Self { workbook })
    }
}

impl WorkbookReader for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet, Xl2MdError> {
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| Xl2MdError::Sheet {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(sheet_from_range(name, &range))
    }
}

/// セル範囲から`Sheet`を構築する
///
/// 1行目をヘッダー行、2行目以降をデータ行として扱います。
/// 使用範囲が空のシートは、ヘッダー・データ行ともに空になります。
pub(crate) fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut rows = range.rows();

    let headers = match rows.next() {
        Some(header_row) => unique_headers(header_row),
        None => Vec::new(),
    };

    let data_rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value_from_data).collect())
        .collect();

    tracing::debug!(
        sheet = name,
        columns = headers.len(),
        rows = data_rows.len(),
        "sheet loaded"
    );

    Sheet::new(name, headers, data_rows)
}

/// ヘッダー行の各セルを列名に変換する
///
/// - 空のヘッダーセルは`Unnamed: {列番号}`（0始まり）
/// - 重複する列名には`.1`、`.2`…のサフィックスを付けて一意にする
fn unique_headers(cells: &[Data]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(cells.len());

    for (idx, cell) in cells.iter().enumerate() {
        let base = match cell_value_from_data(cell) {
            CellValue::Empty => format!("Unnamed: {}", idx),
            value => value.to_string(),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}
