//! ファイル入出力アダプタ
//!
//! セッションが環境に求めるのは2つだけ:
//! - CSVファイルの全文を読み込む
//! - 書き出し用テキストをファイル名付きで保存する

use crate::error::{AppError, Result};
use book_csv_common::export_file_name;
use std::path::{Path, PathBuf};

/// 拡張子が `.csv` か（大文字小文字を区別しない）
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// CSVファイルを読み込む
///
/// 拡張子チェックはパース前に行う
pub fn read_csv_file(path: &Path) -> Result<String> {
    if !is_csv_path(path) {
        return Err(AppError::InvalidFileType(path.display().to_string()));
    }
    if !path.exists() {
        return Err(AppError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// 今日の日付（UTC, `YYYY-MM-DD`）
pub fn today_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// 既定の書き出し先（`<dir>/edited-books-<日付>.csv`）
pub fn default_export_path(dir: &Path, iso_date: &str) -> PathBuf {
    dir.join(export_file_name(iso_date))
}

/// 書き出しテキストを保存
pub fn write_export(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}
