//! レコードストア
//!
//! 編集中の作業セットと、インポート時点のスナップショットを保持する。
//! 変更フラグは常にスナップショットとの比較から導出する。

use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::types::{BookRecord, Field, FieldValue, Record, RecordId};

/// 作業セット + 元データのスナップショット
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    /// 作業セット（インポート順、並べ替えで変化しない）
    working: Vec<Record>,
    /// インポート時点のコピー（リセット・再インポート以外で変更しない）
    snapshot: Vec<Record>,
    /// ID → 位置
    index: HashMap<RecordId, usize>,
}

impl RecordStore {
    /// インポート結果から作業セットとスナップショットを生成
    ///
    /// IDは入力順に `row-0, row-1, …` と採番する
    pub fn seed(books: Vec<BookRecord>) -> Self {
        let working: Vec<Record> = books
            .into_iter()
            .enumerate()
            .map(|(i, book)| Record {
                id: RecordId(i),
                book,
                is_modified: false,
            })
            .collect();
        let index = working
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id, i))
            .collect();
        let snapshot = working.clone();

        Self { working, snapshot, index }
    }

    /// 1セルを更新して変更フラグを再計算
    ///
    /// 未知のIDや列と合わない値は何もせず `false` を返す
    pub fn mutate(&mut self, id: RecordId, field: Field, value: FieldValue) -> bool {
        let Some(&pos) = self.index.get(&id) else {
            debug!(%id, "mutate: unknown record id, ignored");
            return false;
        };

        let record = &mut self.working[pos];
        if !record.book.set(field, value) {
            debug!(%id, %field, "mutate: value kind does not match field, ignored");
            return false;
        }
        record.is_modified = record.book != self.snapshot[pos].book;
        true
    }

    /// 作業セットをスナップショットに戻す
    pub fn reset_all(&mut self) {
        self.working = self.snapshot.clone();
    }

    /// すべて破棄（アップロード画面へ戻る）
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn records(&self) -> &[Record] {
        &self.working
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.index.get(&id).map(|&pos| &self.working[pos])
    }

    /// スナップショット側のレコード
    pub fn original(&self, id: RecordId) -> Option<&Record> {
        self.index.get(&id).map(|&pos| &self.snapshot[pos])
    }

    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// 変更ありの件数
    pub fn modified_count(&self) -> usize {
        self.working.iter().filter(|r| r.is_modified).count()
    }

    /// ジャンル一覧（重複除去・昇順）
    pub fn distinct_genres(&self) -> Vec<String> {
        self.working
            .iter()
            .map(|r| r.book.genre.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 出版年一覧（重複除去・降順）
    pub fn distinct_years(&self) -> Vec<i64> {
        self.working
            .iter()
            .map(|r| r.book.published_year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    /// 出力用のレコード列（インポート順）
    pub fn books(&self) -> impl Iterator<Item = &BookRecord> {
        self.working.iter().map(|r| &r.book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordStore {
        RecordStore::seed(vec![
            BookRecord {
                title: "Dune".into(),
                author: "Frank Herbert".into(),
                genre: "Science Fiction".into(),
                published_year: 1965,
                isbn: "978-0-441-17271-9".into(),
            },
            BookRecord {
                title: "Emma".into(),
                author: "Jane Austen".into(),
                genre: "Romance".into(),
                published_year: 1815,
                isbn: "978-0-14-143958-7".into(),
            },
            BookRecord {
                title: "Persuasion".into(),
                author: "Jane Austen".into(),
                genre: "Romance".into(),
                published_year: 1817,
                isbn: "978-0-14-143968-6".into(),
            },
        ])
    }

    #[test]
    fn test_seed_assigns_sequential_ids() {
        let store = sample();
        let ids: Vec<String> = store.records().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["row-0", "row-1", "row-2"]);
        assert!(store.records().iter().all(|r| !r.is_modified));
        assert_eq!(store.modified_count(), 0);
    }

    #[test]
    fn test_mutate_sets_modified() {
        let mut store = sample();
        assert!(store.mutate(RecordId(0), Field::PublishedYear, FieldValue::Year(1966)));

        let dune = store.get(RecordId(0)).unwrap();
        assert_eq!(dune.book.published_year, 1966);
        assert!(dune.is_modified);
        assert_eq!(store.modified_count(), 1);

        // スナップショットは不変
        assert_eq!(store.original(RecordId(0)).unwrap().book.published_year, 1965);
    }

    #[test]
    fn test_mutate_back_clears_modified() {
        let mut store = sample();
        store.mutate(RecordId(1), Field::Title, FieldValue::Text("Emma!".into()));
        assert!(store.get(RecordId(1)).unwrap().is_modified);

        store.mutate(RecordId(1), Field::Title, FieldValue::Text("Emma".into()));
        assert!(!store.get(RecordId(1)).unwrap().is_modified);
    }

    #[test]
    fn test_mutate_unknown_id_is_noop() {
        let mut store = sample();
        let before = store.clone();
        assert!(!store.mutate(RecordId(99), Field::Title, FieldValue::Text("x".into())));
        assert_eq!(store, before);
    }

    #[test]
    fn test_mutate_mismatched_value_is_noop() {
        let mut store = sample();
        assert!(!store.mutate(RecordId(0), Field::PublishedYear, FieldValue::Text("1966".into())));
        assert!(!store.get(RecordId(0)).unwrap().is_modified);
    }

    #[test]
    fn test_reset_all_idempotent() {
        let mut store = sample();
        store.mutate(RecordId(0), Field::Genre, FieldValue::Text("Classic".into()));
        store.mutate(RecordId(2), Field::Author, FieldValue::Text("J. Austen".into()));
        assert_eq!(store.modified_count(), 2);

        store.reset_all();
        let once = store.clone();
        store.reset_all();
        assert_eq!(store, once);

        assert_eq!(store.modified_count(), 0);
        for record in store.records() {
            assert_eq!(record, store.original(record.id).unwrap());
        }
    }

    #[test]
    fn test_distinct_values() {
        let store = sample();
        assert_eq!(store.distinct_genres(), vec!["Romance", "Science Fiction"]);
        assert_eq!(store.distinct_years(), vec![1965, 1817, 1815]);
    }

    #[test]
    fn test_clear() {
        let mut store = sample();
        store.clear();
        assert!(store.is_empty());
        assert!(store.get(RecordId(0)).is_none());
    }
}
