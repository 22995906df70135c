//! 表示ビューの導出
//!
//! 作業セットと検索・絞り込み・ソート・ページ条件から、
//! 表示する1ページ分のレコードを純関数として求める。
//!
//! 処理順は固定: 検索 → ジャンル → 出版年 → ソート（安定） → ページ分割

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::{Field, Record, SortDirection};

/// 1ページの既定件数
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// 絞り込み条件（"all" で無効）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Only(String),
}

impl Filter {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            Filter::All => None,
            Filter::Only(v) => Some(v),
        }
    }
}

impl From<&str> for Filter {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Filter::All
        } else {
            Filter::Only(s.to_string())
        }
    }
}

/// ビュー導出の入力条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewParams {
    pub search: String,
    pub genre: Filter,
    pub year: Filter,
    pub sort_field: Field,
    pub sort_direction: SortDirection,
    /// 1始まり
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            genre: Filter::All,
            year: Filter::All,
            sort_field: Field::Title,
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// 導出結果（1ページ分）
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub records: Vec<Record>,
    /// 実際に表示しているページ（1始まり）
    pub page: usize,
    pub total_filtered: usize,
    pub total_pages: usize,
    /// 表示上の先頭行番号
    pub first_row_number: usize,
}

impl PageView {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// 検索・絞り込み・ソート済みの全件（ページ分割前）
pub fn filter_and_sort<'a>(records: &'a [Record], params: &ViewParams) -> Vec<&'a Record> {
    let term = params.search.to_lowercase();

    let mut filtered: Vec<&Record> = records
        .iter()
        .filter(|r| term.is_empty() || matches_search(r, &term))
        .filter(|r| params.genre.matches(&r.book.genre))
        .filter(|r| params.year.matches(&r.book.published_year.to_string()))
        .collect();

    // sort_by は安定ソート
    filtered.sort_by(|a, b| {
        let ordering = compare_field(a, b, params.sort_field);
        match params.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    filtered
}

/// 1ページ分のビューを導出
pub fn derive(records: &[Record], params: &ViewParams) -> PageView {
    let filtered = filter_and_sort(records, params);
    let page_size = params.page_size.max(1);
    let total_filtered = filtered.len();
    let total_pages = total_filtered.div_ceil(page_size);
    let page = params.page.clamp(1, total_pages.max(1));

    let start = (page - 1) * page_size;
    let page_records = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    PageView {
        records: page_records,
        page,
        total_filtered,
        total_pages,
        first_row_number: start + 1,
    }
}

/// 小文字化した検索語がTitle/Author/Genre/ISBNのいずれかに含まれるか
fn matches_search(record: &Record, term: &str) -> bool {
    [Field::Title, Field::Author, Field::Genre, Field::Isbn]
        .into_iter()
        .filter_map(|field| record.book.text(field))
        .any(|value| value.to_lowercase().contains(term))
}

fn compare_field(a: &Record, b: &Record, field: Field) -> Ordering {
    match (a.book.text(field), b.book.text(field)) {
        (Some(x), Some(y)) => locale_compare(x, y),
        _ => a.book.published_year.cmp(&b.book.published_year),
    }
}

/// ロケールを考慮した文字列比較
///
/// 1. 分音記号と大文字小文字を無視して比較（`É` は `e` と同列）
/// 2. 同じなら記号なしを先（`e` < `é`）
/// 3. 同じなら小文字を先、最後にコードポイント順
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| {
            let case_rank = |c: char| if c.is_uppercase() { 1u8 } else { 0u8 };
            a.chars().map(case_rank).cmp(b.chars().map(case_rank))
        })
        .then_with(|| a.cmp(b))
}

/// 分音記号を除いた小文字列
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(fold_letter)
}

/// 分音記号を残した小文字列（NFD）
fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// NFDで分解されないラテン文字を基底文字に寄せる
fn fold_letter(c: char) -> char {
    match c {
        'ø' => 'o',
        'ł' => 'l',
        'đ' | 'ð' => 'd',
        'ħ' => 'h',
        'ı' => 'i',
        _ => c,
    }
}
