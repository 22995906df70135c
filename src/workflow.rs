//! CLIの各コマンドが共有する処理
//!
//! 読み込み → セッション生成 → 表示条件/編集の適用 → 書き出し

use crate::cli::EditSpec;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::io;
use book_csv_common::{Field, Filter, RowSkipped, Session, SortDirection};
use std::path::Path;
use tracing::warn;

/// `view` コマンドの表示条件
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub search: String,
    pub genre: Filter,
    pub year: Filter,
    pub sort: Option<Field>,
    pub desc: bool,
    pub page: usize,
    pub page_size: Option<usize>,
}

/// CSVファイルを読み込んでセッションを作る
pub fn open(path: &Path, config: &Config) -> Result<(Session, Vec<RowSkipped>)> {
    let text = io::read_csv_file(path)?;
    let mut session = Session::with_page_size(config.page_size);
    let warnings = session.import(&text)?;
    session.set_sort(config.sort_field, config.sort_direction);
    Ok((session, warnings))
}

/// 表示条件を適用（ページ指定は最後）
pub fn apply_view_options(mut session: Session, options: &ViewOptions, config: &Config) -> Session {
    if let Some(page_size) = options.page_size {
        session.set_page_size(page_size);
    }
    session.set_search(options.search.clone());
    session.set_genre_filter(options.genre.clone());
    session.set_year_filter(options.year.clone());

    let field = options.sort.unwrap_or(config.sort_field);
    let direction = match (options.sort, options.desc) {
        (_, true) => SortDirection::Desc,
        (Some(_), false) => SortDirection::Asc,
        (None, false) => config.sort_direction,
    };
    session.set_sort(field, direction);
    session.go_to_page(options.page);
    session
}

/// 編集指定を順に適用し、反映できた件数を返す
///
/// 存在しない行は警告して読み飛ばす。年が不正な場合や値に改行を含む場合はエラー。
pub fn apply_edits(session: &mut Session, edits: &[EditSpec]) -> Result<usize> {
    let mut applied = 0;
    for edit in edits {
        if session.edit_cell(edit.id, edit.field, &edit.value)? {
            applied += 1;
        } else {
            warn!(id = %edit.id, "edit target not found, skipped");
        }
    }
    Ok(applied)
}

/// 作業セットを書き出す（データがなければエラー）
pub fn export(session: &Session, path: &Path) -> Result<()> {
    if session.is_empty() {
        return Err(AppError::NoData);
    }
    io::write_export(path, &session.export_csv()?)
}
