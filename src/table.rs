//! 端末向けの表描画

use book_csv_common::{PageView, SessionStats};

const COLUMNS: &[(&str, usize)] = &[
    ("Title", 32),
    ("Author", 22),
    ("Genre", 16),
    ("Year", 6),
    ("ISBN", 20),
];

/// 1ページ分を表形式の文字列にする
///
/// 変更ありの行は先頭に `*` を付ける
pub fn render_page(view: &PageView) -> String {
    let mut out = String::new();

    let mut header = format!("  {:>6} {:<8}", "#", "ID");
    for (name, width) in COLUMNS {
        header.push(' ');
        header.push_str(&pad(name, *width));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    if view.records.is_empty() {
        out.push_str("  (No data to display)\n");
        return out;
    }

    for (i, record) in view.records.iter().enumerate() {
        let marker = if record.is_modified { '*' } else { ' ' };
        let year = record.book.published_year.to_string();
        let cells = [
            record.book.title.as_str(),
            record.book.author.as_str(),
            record.book.genre.as_str(),
            year.as_str(),
            record.book.isbn.as_str(),
        ];

        let mut line = format!(
            "{} {:>6} {:<8}",
            marker,
            view.first_row_number + i,
            record.id.to_string()
        );
        for (value, (_, width)) in cells.iter().zip(COLUMNS) {
            line.push(' ');
            line.push_str(&pad(value, *width));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// ページ位置と件数の1行サマリ
pub fn render_summary(view: &PageView, stats: &SessionStats) -> String {
    let (from, to) = if view.records.is_empty() {
        (0, 0)
    } else {
        (view.first_row_number, view.first_row_number + view.records.len() - 1)
    };
    let mut summary = format!(
        "Page {} of {} | showing {}-{} of {} filtered | {} records",
        view.page,
        view.total_pages.max(1),
        from,
        to,
        view.total_filtered,
        stats.total
    );
    if stats.modified > 0 {
        summary.push_str(&format!(" | {} modified", stats.modified));
    }
    summary
}

/// 幅に合わせて切り詰め・空白埋め（文字数単位）
fn pad(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count > width {
        let truncated: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    } else {
        format!("{}{}", value, " ".repeat(width - count))
    }
}
