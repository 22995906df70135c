use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("CSVファイルではありません: {0}")]
    InvalidFileType(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("書き出すデータがありません")]
    NoData,

    #[error("編集指定が不正: {0}")]
    InvalidEdit(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] book_csv_common::Error),
}

impl From<book_csv_common::ParseError> for AppError {
    fn from(err: book_csv_common::ParseError) -> Self {
        AppError::Common(err.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
