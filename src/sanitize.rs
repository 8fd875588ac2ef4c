//! Filename Sanitizer
//!
//! シート名を、どのOSでもファイル名の一部として使える文字列に変換する。

/// Windowsでファイル名に使用できない文字
const RESERVED_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// 置換に使う文字
const REPLACEMENT: char = '_';

/// シート名をファイル名として安全な文字列に変換する
///
/// 1. 予約文字（`< > : " / \ | ? *`）を`_`に置換
/// 2. 空白を`_`に置換
/// 3. 連続する`_`を1つにまとめる
/// 4. 先頭・末尾の`_`を除去
///
/// 予約文字と空白だけからなる名前は空文字列になります。
/// この場合の出力ファイル名は`{base}_.md`です。
///
/// # 使用例
///
/// ```rust
/// use xl2md::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Q1 Report: Final"), "Q1_Report_Final");
/// assert_eq!(sanitize_filename("a / b"), "a_b");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let mut result = String::with_capacity(name.len());

    for ch in name.chars() {
        let ch = if ch == ' ' || RESERVED_CHARS.contains(&ch) {
            REPLACEMENT
        } else {
            ch
        };

        // 直前も`_`なら追加しない（連続する`_`の圧縮）
        if ch == REPLACEMENT && result.ends_with(REPLACEMENT) {
            continue;
        }
        result.push(ch);
    }

    result.trim_matches(REPLACEMENT).to_string()
}

/// 出力ファイル名`{base}_{サニタイズ済みシート名}.md`を生成する
///
/// `base`はワークブックのファイル名から拡張子を除いたものです。
///
/// ```rust
/// use xl2md::output_file_name;
///
/// assert_eq!(output_file_name("report", "Sheet 2"), "report_Sheet_2.md");
/// assert_eq!(output_file_name("report", "???"), "report_.md");
/// ```
pub fn output_file_name(base: &str, sheet_name: &str) -> String {
    format!("{}_{}.md", base, sanitize_filename(sheet_name))
}
