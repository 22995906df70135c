//! 書籍レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Field: 固定スキーマの列（Title, Author, Genre, PublishedYear, ISBN）
//! - BookRecord: CSV 1行分の値
//! - Record: 作業セット上の1行（ID・変更フラグ付き）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// ジャンル選択肢（一覧外の値もそのまま受け入れて保持する）
pub const GENRES: &[&str] = &[
    "Fiction",
    "Non-Fiction",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Fantasy",
    "Biography",
    "History",
    "Self-Help",
    "Business",
    "Technology",
    "Health",
    "Travel",
    "Cooking",
    "Art",
    "Philosophy",
    "Psychology",
    "Education",
    "Children",
    "Young Adult",
    "Horror",
    "Thriller",
    "Poetry",
    "Drama",
];

/// スキーマの列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Title,
    Author,
    Genre,
    PublishedYear,
    #[serde(rename = "ISBN")]
    Isbn,
}

impl Field {
    /// 出力時の列順
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Author,
        Field::Genre,
        Field::PublishedYear,
        Field::Isbn,
    ];

    /// CSVヘッダー名
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Genre => "Genre",
            Field::PublishedYear => "PublishedYear",
            Field::Isbn => "ISBN",
        }
    }

    /// 数値列かどうか
    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::PublishedYear)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// 列の値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Year(i64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Year(y) => write!(f, "{}", y),
        }
    }
}

/// 書籍1件分の値
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "PublishedYear")]
    pub published_year: i64,
    #[serde(rename = "ISBN")]
    pub isbn: String,
}

impl BookRecord {
    /// 列の値を取得
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Title => FieldValue::Text(self.title.clone()),
            Field::Author => FieldValue::Text(self.author.clone()),
            Field::Genre => FieldValue::Text(self.genre.clone()),
            Field::PublishedYear => FieldValue::Year(self.published_year),
            Field::Isbn => FieldValue::Text(self.isbn.clone()),
        }
    }

    /// 文字列列の参照（PublishedYearはNone）
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(&self.title),
            Field::Author => Some(&self.author),
            Field::Genre => Some(&self.genre),
            Field::PublishedYear => None,
            Field::Isbn => Some(&self.isbn),
        }
    }

    /// 列に値を設定
    ///
    /// 値の種類が列と合わない場合は何もせず `false` を返す
    pub fn set(&mut self, field: Field, value: FieldValue) -> bool {
        match (field, value) {
            (Field::PublishedYear, FieldValue::Year(y)) => self.published_year = y,
            (Field::Title, FieldValue::Text(s)) => self.title = s,
            (Field::Author, FieldValue::Text(s)) => self.author = s,
            (Field::Genre, FieldValue::Text(s)) => self.genre = s,
            (Field::Isbn, FieldValue::Text(s)) => self.isbn = s,
            _ => return false,
        }
        true
    }
}

/// インポート順から採番される行ID（`row-0`, `row-1`, …）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub usize);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix("row-")
            .and_then(|n| n.parse().ok())
            .map(RecordId)
            .ok_or_else(|| Error::UnknownRecord(s.to_string()))
    }
}

impl Serialize for RecordId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// 作業セット上の1行
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub book: BookRecord,
    /// スナップショットと1列でも異なればtrue
    pub is_modified: bool,
}

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "a" => Ok(SortDirection::Asc),
            "desc" | "d" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown direction: {}. Use asc or desc", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> BookRecord {
        BookRecord {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            published_year: 1965,
            isbn: "978-0-441-17271-9".to_string(),
        }
    }

    #[test]
    fn test_field_from_header_name() {
        assert_eq!("Title".parse::<Field>().unwrap(), Field::Title);
        assert_eq!("ISBN".parse::<Field>().unwrap(), Field::Isbn);
        assert_eq!("publishedyear".parse::<Field>().unwrap(), Field::PublishedYear);
        assert!(matches!("Pages".parse::<Field>(), Err(Error::UnknownField(_))));
    }

    #[test]
    fn test_field_order() {
        let names: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, vec!["Title", "Author", "Genre", "PublishedYear", "ISBN"]);
        assert!(Field::PublishedYear.is_numeric());
        assert!(!Field::Isbn.is_numeric());
    }

    #[test]
    fn test_set_rejects_mismatched_kind() {
        let mut book = dune();
        assert!(!book.set(Field::PublishedYear, FieldValue::Text("1966".into())));
        assert!(!book.set(Field::Title, FieldValue::Year(1)));
        assert_eq!(book, dune());

        assert!(book.set(Field::PublishedYear, FieldValue::Year(1966)));
        assert_eq!(book.published_year, 1966);
    }

    #[test]
    fn test_record_id_display_and_parse() {
        assert_eq!(RecordId(12).to_string(), "row-12");
        assert_eq!("row-3".parse::<RecordId>().unwrap(), RecordId(3));
        assert!("3".parse::<RecordId>().is_err());
        assert!("row-x".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_record_serialize() {
        let record = Record { id: RecordId(0), book: dune(), is_modified: true };
        let json = serde_json::to_string(&record).expect("シリアライズ失敗");
        assert!(json.contains("\"id\":\"row-0\""));
        assert!(json.contains("\"Title\":\"Dune\""));
        assert!(json.contains("\"PublishedYear\":1965"));
        assert!(json.contains("\"isModified\":true"));
    }

    #[test]
    fn test_sort_direction_toggle() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled().toggled(), SortDirection::Desc);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
    }
}
