use crate::error::AppError;
use book_csv_common::{Field, RecordId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "book-csv")]
#[command(about = "書籍カタログCSVの編集・絞り込み・書き出しツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// CSVを読み込んで1ページ分を表示
    View {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 検索語（Title/Author/Genre/ISBN、大文字小文字を区別しない）
        #[arg(short, long, default_value = "")]
        search: String,

        /// ジャンルで絞り込み（all で解除）
        #[arg(short, long, default_value = "all")]
        genre: String,

        /// 出版年で絞り込み（all で解除）
        #[arg(short, long, default_value = "all")]
        year: String,

        /// ソート列（省略時は設定値）
        #[arg(long)]
        sort: Option<Field>,

        /// 降順
        #[arg(long)]
        desc: bool,

        /// ページ番号（1始まり）
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// 1ページの件数（省略時は設定値）
        #[arg(long)]
        page_size: Option<usize>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// ジャンル・出版年の一覧を表示
    Facets {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// セルを一括編集して書き出し
    Set {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 編集内容（row-N:列=値、複数指定可）
        #[arg(short, long = "edit", required = true)]
        edits: Vec<EditSpec>,

        /// 出力ファイル（省略時: 出力先/edited-books-<日付>.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 対話的に表示・編集
    Edit {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（省略時: 出力先/edited-books-<日付>.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 1ページの件数を設定
        #[arg(long)]
        set_page_size: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// `row-N:列=値` 形式の編集指定
#[derive(Clone, Debug, PartialEq)]
pub struct EditSpec {
    pub id: RecordId,
    pub field: Field,
    pub value: String,
}

impl std::str::FromStr for EditSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidEdit(format!("{} (row-N:Field=value)", s));

        let (target, value) = s.split_once('=').ok_or_else(invalid)?;
        let (id, field) = target.split_once(':').ok_or_else(invalid)?;

        Ok(EditSpec {
            id: id.parse().map_err(|_| invalid())?,
            field: field.parse().map_err(|_| invalid())?,
            value: value.to_string(),
        })
    }
}
