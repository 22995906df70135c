//! CSVコーデック
//!
//! アップロードされたCSVテキストを書籍レコード列に変換し、
//! 編集後のレコード列をCSVテキストへ書き戻す。
//!
//! 方言はカンマ区切り・ダブルクォート囲みのみ。

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::{debug, warn};

use crate::error::{Error, ParseError};
use crate::types::{BookRecord, Field};

/// 年の解析に失敗した場合の既定値
pub const DEFAULT_YEAR: i64 = 2000;

/// 出力CSVの固定ヘッダー
pub const HEADER: &str = "Title,Author,Genre,PublishedYear,ISBN";

/// 取り込みを止めない行単位の不備
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSkipped {
    /// 列数がヘッダーと一致しないため行を破棄
    ColumnCount {
        line: usize,
        found: usize,
        expected: usize,
    },
    /// 年が数値でないため既定値を採用（行自体は取り込む）
    InvalidYear { line: usize, value: String },
}

impl std::fmt::Display for RowSkipped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowSkipped::ColumnCount { line, found, expected } => write!(
                f,
                "Row {} has {} columns, expected {}. Skipping.",
                line, found, expected
            ),
            RowSkipped::InvalidYear { line, value } => write!(
                f,
                "Invalid year \"{}\" in row {}. Using {}.",
                value, line, DEFAULT_YEAR
            ),
        }
    }
}

/// パース結果
#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub records: Vec<BookRecord>,
    pub skipped: Vec<RowSkipped>,
}

/// CSVテキストをパース
///
/// # Arguments
/// * `text` - CSVファイル全体の文字列
///
/// # Returns
/// * `Ok(ParsedCsv)` - 取り込めたレコードと行単位の警告
/// * `Err(ParseError)` - データ不足・必須列欠落・有効行なし
///
/// # Examples
/// ```
/// use book_csv_common::codec::parse;
///
/// let text = "Title,Author,Genre,PublishedYear,ISBN\nDune,Frank Herbert,Science Fiction,1965,978-0-441-17271-9";
/// let parsed = parse(text).unwrap();
/// assert_eq!(parsed.records.len(), 1);
/// assert_eq!(parsed.records[0].published_year, 1965);
/// ```
pub fn parse(text: &str) -> Result<ParsedCsv, ParseError> {
    // (1始まりの行番号, 行)
    let lines: Vec<(usize, &str)> = text
        .split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(ParseError::NoData);
    }

    let headers: Vec<String> = lines[0]
        .1
        .split(',')
        .map(|h| h.trim().replace('"', ""))
        .collect();

    let missing: Vec<String> = Field::ALL
        .iter()
        .filter(|field| !headers.iter().any(|h| h == field.as_str()))
        .map(|field| field.as_str().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::MissingColumns(missing));
    }

    // ヘッダー位置 → 列（未知の列はNone）
    let columns: Vec<Option<Field>> = headers
        .iter()
        .map(|h| Field::ALL.into_iter().find(|f| f.as_str() == h))
        .collect();

    let mut parsed = ParsedCsv::default();

    for &(line_no, line) in &lines[1..] {
        let values = split_fields(line);

        if values.len() != headers.len() {
            let skipped = RowSkipped::ColumnCount {
                line: line_no,
                found: values.len(),
                expected: headers.len(),
            };
            warn!("{}", skipped);
            parsed.skipped.push(skipped);
            continue;
        }

        let mut book = BookRecord::default();
        for (column, value) in columns.iter().zip(values) {
            let Some(field) = column else { continue };
            match field {
                Field::Title => book.title = value,
                Field::Author => book.author = value,
                Field::Genre => book.genre = value,
                Field::Isbn => book.isbn = value,
                Field::PublishedYear => {
                    book.published_year = match parse_year(&value) {
                        Some(year) => year,
                        None => {
                            let skipped = RowSkipped::InvalidYear { line: line_no, value };
                            warn!("{}", skipped);
                            parsed.skipped.push(skipped);
                            DEFAULT_YEAR
                        }
                    };
                }
            }
        }
        parsed.records.push(book);
    }

    if parsed.records.is_empty() {
        return Err(ParseError::NoValidRows);
    }

    debug!(
        records = parsed.records.len(),
        skipped = parsed.skipped.len(),
        "CSV parsed"
    );
    Ok(parsed)
}

/// クォートを考慮して1行をフィールドに分割
///
/// クォート文字は「クォート内」状態を切り替えるだけで値には含めない。
/// そのため `""` のエスケープは復元されない（内部のクォートは失われる）。
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(finish_field(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(finish_field(&mut current));

    fields
}

fn finish_field(current: &mut String) -> String {
    let field = std::mem::take(current);
    let s = field.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.to_string()
}

/// 先頭の整数部分を年として解析
///
/// 空白・符号に続く数字列のみを読み、後続の文字は無視する
/// （`"1965abc"` → 1965, `"3.7"` → 3）。数字がなければNone。
/// 範囲外の値は `i64::MAX` / `-i64::MAX` に丸める。
pub fn parse_year(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // i64 に収まらない桁数は飽和させる
    let year = rest[..digits_end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    Some(if negative { -year } else { year })
}

/// レコード列をCSVテキストに変換
///
/// 固定ヘッダーと列順で出力し、行は `\n` で連結する（末尾改行なし）。
/// カンマ・ダブルクォート・改行を含む値のみクォートする。
pub fn serialize<'a, I>(records: I) -> Result<String, Error>
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER.split(','))?;
    for book in records {
        let year = book.published_year.to_string();
        writer.write_record([
            book.title.as_str(),
            book.author.as_str(),
            book.genre.as_str(),
            year.as_str(),
            book.isbn.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Csv(e.into_error().into()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// ダウンロード用ファイル名（`edited-books-<ISO日付>.csv`）
pub fn export_file_name(iso_date: &str) -> String {
    format!("edited-books-{}.csv", iso_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUNE_CSV: &str =
        "Title,Author,Genre,PublishedYear,ISBN\nDune,Frank Herbert,Science Fiction,1965,978-0-441-17271-9";

    fn book(title: &str, year: i64) -> BookRecord {
        BookRecord {
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            genre: "Fantasy".to_string(),
            published_year: year,
            isbn: "978-0-553-38304-2".to_string(),
        }
    }

    // =============================================
    // parse テスト
    // =============================================

    #[test]
    fn test_parse_single_row() {
        let parsed = parse(DUNE_CSV).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.skipped.is_empty());

        let dune = &parsed.records[0];
        assert_eq!(dune.title, "Dune");
        assert_eq!(dune.author, "Frank Herbert");
        assert_eq!(dune.genre, "Science Fiction");
        assert_eq!(dune.published_year, 1965);
        assert_eq!(dune.isbn, "978-0-441-17271-9");
    }

    #[test]
    fn test_parse_header_only_is_no_data() {
        assert_eq!(parse("Title,Author,Genre,PublishedYear,ISBN\n").unwrap_err(), ParseError::NoData);
        assert_eq!(parse("").unwrap_err(), ParseError::NoData);
        assert_eq!(parse("\n\n  \n").unwrap_err(), ParseError::NoData);
    }

    #[test]
    fn test_parse_missing_columns_named() {
        let err = parse("Title,Author,Genre,PublishedYear\nDune,Frank Herbert,SF,1965").unwrap_err();
        assert_eq!(err, ParseError::MissingColumns(vec!["ISBN".to_string()]));

        let err = parse("Title,Author\nDune,Frank Herbert").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumns(vec![
                "Genre".to_string(),
                "PublishedYear".to_string(),
                "ISBN".to_string(),
            ])
        );
    }

    #[test]
    fn test_parse_reordered_and_extra_columns() {
        let text = "\"ISBN\", Pages ,Title,Genre,Author,PublishedYear\n\
                    111,320,Dune,Science Fiction,Frank Herbert,1965";
        let parsed = parse(text).unwrap();
        let dune = &parsed.records[0];
        assert_eq!(dune.isbn, "111");
        assert_eq!(dune.title, "Dune");
        assert_eq!(dune.author, "Frank Herbert");
        assert_eq!(dune.published_year, 1965);
    }

    #[test]
    fn test_parse_quoted_comma() {
        let text = "Title,Author,Genre,PublishedYear,ISBN\n\"Hello, World\",Someone,Fiction,2001,123";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records[0].title, "Hello, World");
        assert_eq!(parsed.records[0].author, "Someone");
    }

    #[test]
    fn test_parse_doubled_quotes_are_lost() {
        // `""` はエスケープとして復元されない
        let text = "Title,Author,Genre,PublishedYear,ISBN\n\"He said, \"\"Hi\"\"\",A,Fiction,2001,1";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records[0].title, "He said, Hi");
    }

    #[test]
    fn test_parse_skips_wrong_column_count() {
        let text = "Title,Author,Genre,PublishedYear,ISBN\n\
                    Dune,Frank Herbert,Science Fiction,1965,1\n\
                    Broken,Row\n\
                    Emma,Jane Austen,Romance,1815,2";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].title, "Emma");
        assert_eq!(
            parsed.skipped,
            vec![RowSkipped::ColumnCount { line: 3, found: 2, expected: 5 }]
        );
    }

    #[test]
    fn test_parse_all_rows_skipped_is_fatal() {
        let text = "Title,Author,Genre,PublishedYear,ISBN\na,b\nc,d,e";
        assert_eq!(parse(text).unwrap_err(), ParseError::NoValidRows);
    }

    #[test]
    fn test_parse_invalid_year_defaults() {
        let text = "Title,Author,Genre,PublishedYear,ISBN\nDune,Frank Herbert,SF,unknown,1";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records[0].published_year, DEFAULT_YEAR);
        assert_eq!(
            parsed.skipped,
            vec![RowSkipped::InvalidYear { line: 2, value: "unknown".to_string() }]
        );
    }

    #[test]
    fn test_parse_crlf_and_blank_lines() {
        let text = "Title,Author,Genre,PublishedYear,ISBN\r\n\r\nDune,Frank Herbert,SF,1965,1\r\n";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].isbn, "1");
    }

    #[test]
    fn test_parse_fields_trimmed() {
        let text = "Title,Author,Genre,PublishedYear,ISBN\n  Dune ,  Frank Herbert,SF, 1965 ,1";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records[0].title, "Dune");
        assert_eq!(parsed.records[0].author, "Frank Herbert");
        assert_eq!(parsed.records[0].published_year, 1965);
    }

    #[test]
    fn test_parse_year_leading_integer() {
        assert_eq!(parse_year("1965"), Some(1965));
        assert_eq!(parse_year("  1965abc"), Some(1965));
        assert_eq!(parse_year("3.7"), Some(3));
        assert_eq!(parse_year("-44"), Some(-44));
        assert_eq!(parse_year("+12"), Some(12));
        assert_eq!(parse_year("abc"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("-"), None);
    }

    #[test]
    fn test_parse_year_saturates_on_overflow() {
        assert_eq!(parse_year("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_year("-99999999999999999999"), Some(-i64::MAX));

        let text = "Title,Author,Genre,PublishedYear,ISBN\nDune,Frank Herbert,SF,99999999999999999999,1";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records[0].published_year, i64::MAX);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_parse_duplicate_header_last_wins() {
        let text = "Title,Author,Genre,PublishedYear,ISBN,Title\n\
                    First,Frank Herbert,Science Fiction,1965,1,Second\n\
                    Short,Row,Fiction,2001,2";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].title, "Second");
        assert_eq!(parsed.records[0].author, "Frank Herbert");
        // 列数は重複列を含むヘッダー全体と比較
        assert_eq!(
            parsed.skipped,
            vec![RowSkipped::ColumnCount { line: 3, found: 5, expected: 6 }]
        );
    }

    // =============================================
    // serialize テスト
    // =============================================

    #[test]
    fn test_serialize_header_and_order() {
        let text = serialize(&[book("The Dispossessed", 1974)]).unwrap();
        assert_eq!(
            text,
            "Title,Author,Genre,PublishedYear,ISBN\nThe Dispossessed,Ursula K. Le Guin,Fantasy,1974,978-0-553-38304-2"
        );
    }

    #[test]
    fn test_serialize_empty() {
        let records: Vec<BookRecord> = Vec::new();
        assert_eq!(serialize(&records).unwrap(), HEADER);
    }

    #[test]
    fn test_serialize_quotes_only_when_needed() {
        let records = vec![
            book("plain", 2001),
            book("a, b", 2001),
            book("He said, \"Hi\"", 2001),
        ];
        let text = serialize(&records).unwrap();
        let rows: Vec<&str> = text.lines().skip(1).map(|l| l.split(",Ursula").next().unwrap()).collect();
        assert_eq!(rows, vec!["plain", "\"a, b\"", "\"He said, \"\"Hi\"\"\""]);
    }

    #[test]
    fn test_serialize_quotes_line_breaks() {
        let text = serialize(&[book("Part One\nPart Two", 2001)]).unwrap();
        assert!(text.contains("\"Part One\nPart Two\",Ursula"));

        let text = serialize(&[book("Carriage\rReturn", 2001)]).unwrap();
        assert!(text.contains("\"Carriage\rReturn\""));
    }

    #[test]
    fn test_round_trip() {
        let records = vec![
            book("A Wizard of Earthsea", 1968),
            book("Tales, Told", 2001),
            book("Gifts", -5),
        ];
        let parsed = parse(&serialize(&records).unwrap()).unwrap();
        assert_eq!(parsed.records, records);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_round_trip_loses_internal_quotes() {
        let records = vec![book("He said, \"Hi\"", 2001)];
        let parsed = parse(&serialize(&records).unwrap()).unwrap();
        assert_eq!(parsed.records[0].title, "He said, Hi");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("2024-05-01"), "edited-books-2024-05-01.csv");
    }
}
