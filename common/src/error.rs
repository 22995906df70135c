//! エラー型定義

use thiserror::Error;

use crate::types::Field;

/// CSVインポート全体を失敗させるエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no data")]
    NoData,

    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("no valid rows")]
    NoValidRows,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid year: {0}")]
    InvalidYear(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown record: {0}")]
    UnknownRecord(String),

    #[error("line breaks are not allowed in {0}")]
    LineBreak(Field),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
