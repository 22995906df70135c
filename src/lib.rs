//! Book CSV Editor
//!
//! 書籍カタログCSVを読み込み、検索・絞り込み・ソート・ページ表示しながら
//! セルを編集し、編集後のCSVを書き出すCLI

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod io;
pub mod logging;
pub mod table;
pub mod workflow;
