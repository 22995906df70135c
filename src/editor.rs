//! 対話式CSV編集モジュール
//!
//! 1ページずつ表を表示し、コマンド入力で検索・絞り込み・ソート・セル編集を行う。

use crate::error::{AppError, Result};
use crate::table::{render_page, render_summary};
use book_csv_common::{Field, Filter, RecordId, Session};
use dialoguer::Input;
use std::path::Path;

const HELP: &str = "操作: [n]次 [p]前 [page N] [/語]検索 [genre G|all] [year Y|all] \
[sort 列] [edit row-N 列 値] [reset] [facets] [w]保存して終了 [q]保存せず終了";

/// 対話コマンド
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    NextPage,
    PrevPage,
    GoToPage(usize),
    Search(String),
    Genre(Filter),
    Year(Filter),
    Sort(Field),
    Edit { id: RecordId, field: Field, value: String },
    Reset,
    Facets,
    Help,
    /// 保存して終了
    Write,
    /// 保存せず終了
    Quit,
}

/// コマンド実行後の継続判定
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue(Option<String>),
    Save,
    Discard,
}

/// 入力行をコマンドに変換
pub fn parse_command(input: &str) -> Result<EditorCommand> {
    let trimmed = input.trim();

    if let Some(term) = trimmed.strip_prefix('/') {
        return Ok(EditorCommand::Search(term.to_string()));
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head {
        "" | "n" => Ok(EditorCommand::NextPage),
        "p" => Ok(EditorCommand::PrevPage),
        "page" => rest
            .parse()
            .map(EditorCommand::GoToPage)
            .map_err(|_| AppError::CliExecution(format!("ページ番号が不正: {}", rest))),
        "genre" if !rest.is_empty() => Ok(EditorCommand::Genre(Filter::from(rest))),
        "year" if !rest.is_empty() => Ok(EditorCommand::Year(Filter::from(rest))),
        "sort" => Ok(EditorCommand::Sort(rest.parse()?)),
        "edit" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let id = parts.next().unwrap_or_default().parse()?;
            let field = parts
                .next()
                .ok_or_else(|| AppError::CliExecution("列名がありません".into()))?
                .parse()?;
            let value = parts.next().unwrap_or_default().trim().to_string();
            Ok(EditorCommand::Edit { id, field, value })
        }
        "reset" => Ok(EditorCommand::Reset),
        "facets" => Ok(EditorCommand::Facets),
        "?" | "help" => Ok(EditorCommand::Help),
        "w" => Ok(EditorCommand::Write),
        "q" | "Q" => Ok(EditorCommand::Quit),
        _ => Err(AppError::CliExecution(format!("不明なコマンド: {}", trimmed))),
    }
}

/// コマンドをセッションに適用
pub fn apply_command(session: &mut Session, command: EditorCommand) -> Result<Outcome> {
    let message = match command {
        EditorCommand::NextPage => (!session.next_page()).then(|| "最終ページです".to_string()),
        EditorCommand::PrevPage => (!session.prev_page()).then(|| "先頭ページです".to_string()),
        EditorCommand::GoToPage(page) => {
            session.go_to_page(page);
            None
        }
        EditorCommand::Search(term) => {
            session.set_search(term);
            None
        }
        EditorCommand::Genre(filter) => {
            session.set_genre_filter(filter);
            None
        }
        EditorCommand::Year(filter) => {
            session.set_year_filter(filter);
            None
        }
        EditorCommand::Sort(field) => {
            session.toggle_sort(field);
            None
        }
        EditorCommand::Edit { id, field, value } => {
            if session.edit_cell(id, field, &value)? {
                let modified = session
                    .store()
                    .get(id)
                    .map(|r| r.is_modified)
                    .unwrap_or(false);
                Some(format!(
                    "{} {} → {}{}",
                    id,
                    field,
                    value,
                    if modified { " (modified)" } else { "" }
                ))
            } else {
                Some(format!("{} が見つかりません", id))
            }
        }
        EditorCommand::Reset => {
            session.reset_all();
            Some("すべての変更を元に戻しました".to_string())
        }
        EditorCommand::Facets => Some(render_facets(session)),
        EditorCommand::Help => Some(HELP.to_string()),
        EditorCommand::Write => return Ok(Outcome::Save),
        EditorCommand::Quit => return Ok(Outcome::Discard),
    };
    Ok(Outcome::Continue(message))
}

/// ジャンル・出版年の選択肢
pub fn render_facets(session: &Session) -> String {
    let genres = session.store().distinct_genres();
    let years: Vec<String> = session
        .store()
        .distinct_years()
        .iter()
        .map(|y| y.to_string())
        .collect();
    format!("Genres: {}\nYears: {}", genres.join(", "), years.join(", "))
}

/// 対話式で編集
///
/// `w` で `output` に書き出して終了、`q` で破棄して終了
pub fn run_interactive_editor(session: &mut Session, source: &Path, output: &Path) -> Result<bool> {
    println!("📚 {} ({}件)", source.display(), session.stats().total);
    println!("{}", HELP);
    println!("---\n");

    loop {
        let view = session.view();
        print!("{}", render_page(&view));
        println!("{}\n", render_summary(&view, &session.stats()));

        let input: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::CliExecution(e.to_string()))?;

        let command = match parse_command(&input) {
            Ok(command) => command,
            Err(e) => {
                println!("  ✗ {}\n", e);
                continue;
            }
        };

        match apply_command(session, command) {
            Ok(Outcome::Continue(Some(message))) => println!("  → {}\n", message),
            Ok(Outcome::Continue(None)) => {}
            Ok(Outcome::Save) => {
                crate::io::write_export(output, &session.export_csv()?)?;
                println!("\n✓ 保存しました: {}", output.display());
                return Ok(true);
            }
            Ok(Outcome::Discard) => {
                println!("保存せずに終了します");
                return Ok(false);
            }
            Err(e) => println!("  ✗ {}\n", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use book_csv_common::SortDirection;

    const CSV: &str = "Title,Author,Genre,PublishedYear,ISBN\n\
                       Dune,Frank Herbert,Science Fiction,1965,978-0-441-17271-9\n\
                       Emma,Jane Austen,Romance,1815,978-0-14-143958-7\n\
                       Persuasion,Jane Austen,Romance,1817,978-0-14-143968-6";

    fn session() -> Session {
        let mut session = Session::with_page_size(2);
        session.import(CSV).unwrap();
        session
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_command("").unwrap(), EditorCommand::NextPage);
        assert_eq!(parse_command("n").unwrap(), EditorCommand::NextPage);
        assert_eq!(parse_command(" p ").unwrap(), EditorCommand::PrevPage);
        assert_eq!(parse_command("page 3").unwrap(), EditorCommand::GoToPage(3));
        assert!(parse_command("page x").is_err());
    }

    #[test]
    fn test_parse_search_and_filters() {
        assert_eq!(parse_command("/dune").unwrap(), EditorCommand::Search("dune".into()));
        assert_eq!(parse_command("/").unwrap(), EditorCommand::Search(String::new()));
        assert_eq!(
            parse_command("genre Science Fiction").unwrap(),
            EditorCommand::Genre(Filter::Only("Science Fiction".into()))
        );
        assert_eq!(parse_command("year all").unwrap(), EditorCommand::Year(Filter::All));
        assert_eq!(parse_command("sort PublishedYear").unwrap(), EditorCommand::Sort(Field::PublishedYear));
        assert!(parse_command("sort Pages").is_err());
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(
            parse_command("edit row-2 Title The Left Hand of Darkness").unwrap(),
            EditorCommand::Edit {
                id: RecordId(2),
                field: Field::Title,
                value: "The Left Hand of Darkness".into(),
            }
        );
        assert!(parse_command("edit 2 Title x").is_err());
        assert!(parse_command("edit row-2").is_err());
        assert!(parse_command("bogus").is_err());
    }

    #[test]
    fn test_apply_edit_and_reset() {
        let mut session = session();
        let outcome = apply_command(&mut session, parse_command("edit row-0 PublishedYear 1966").unwrap()).unwrap();
        assert_eq!(outcome, Outcome::Continue(Some("row-0 PublishedYear → 1966 (modified)".into())));
        assert_eq!(session.stats().modified, 1);

        apply_command(&mut session, EditorCommand::Reset).unwrap();
        assert_eq!(session.stats().modified, 0);
    }

    #[test]
    fn test_apply_edit_invalid_year() {
        let mut session = session();
        let command = parse_command("edit row-0 PublishedYear soon").unwrap();
        assert!(apply_command(&mut session, command).is_err());
        assert_eq!(session.stats().modified, 0);
    }

    #[test]
    fn test_apply_navigation_bounds() {
        let mut session = session();
        let outcome = apply_command(&mut session, EditorCommand::PrevPage).unwrap();
        assert_eq!(outcome, Outcome::Continue(Some("先頭ページです".into())));

        apply_command(&mut session, EditorCommand::NextPage).unwrap();
        assert_eq!(session.view().page, 2);
        let outcome = apply_command(&mut session, EditorCommand::NextPage).unwrap();
        assert_eq!(outcome, Outcome::Continue(Some("最終ページです".into())));
    }

    #[test]
    fn test_apply_sort_toggles() {
        let mut session = session();
        apply_command(&mut session, EditorCommand::Sort(Field::Title)).unwrap();
        assert_eq!(session.params().sort_direction, SortDirection::Desc);
        assert_eq!(session.view().records[0].book.title, "Persuasion");
    }

    #[test]
    fn test_apply_exit_commands() {
        let mut session = session();
        assert_eq!(apply_command(&mut session, EditorCommand::Write).unwrap(), Outcome::Save);
        assert_eq!(apply_command(&mut session, EditorCommand::Quit).unwrap(), Outcome::Discard);
    }

    #[test]
    fn test_render_facets() {
        let session = session();
        assert_eq!(
            render_facets(&session),
            "Genres: Romance, Science Fiction\nYears: 1965, 1817, 1815"
        );
    }
}
