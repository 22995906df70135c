//! 編集セッション
//!
//! 作業セット・スナップショット・表示条件を1つのコントローラにまとめる。
//! UI（CLI / Web）はこのセッションを排他的に所有し、操作後に `view()` で再導出する。

use serde::Serialize;
use tracing::info;

use crate::codec::{self, parse_year, ParsedCsv, RowSkipped};
use crate::error::{Error, Result};
use crate::store::RecordStore;
use crate::types::{Field, FieldValue, RecordId, SortDirection};
use crate::view::{self, Filter, PageView, ViewParams, DEFAULT_PAGE_SIZE};

/// 件数サマリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total: usize,
    pub modified: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    store: RecordStore,
    params: ViewParams,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl Session {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            store: RecordStore::default(),
            params: ViewParams {
                page_size: page_size.max(1),
                ..ViewParams::default()
            },
        }
    }

    /// CSVテキストを取り込んで作業セットを置き換える
    ///
    /// 失敗時はセッションを変更しない。成功時は表示条件を初期値に戻す
    /// （ページサイズは維持）。戻り値は行単位の警告。
    pub fn import(&mut self, text: &str) -> Result<Vec<RowSkipped>> {
        let ParsedCsv { records, skipped } = codec::parse(text)?;
        info!(records = records.len(), skipped = skipped.len(), "CSV imported");

        self.store = RecordStore::seed(records);
        self.params = ViewParams {
            page_size: self.params.page_size,
            ..ViewParams::default()
        };
        Ok(skipped)
    }

    /// アップロード画面へ戻る（データと表示条件をすべて破棄）
    pub fn clear(&mut self) {
        self.store.clear();
        self.params = ViewParams {
            page_size: self.params.page_size,
            ..ViewParams::default()
        };
    }

    /// セル編集（入力文字列を列の型に変換して反映）
    ///
    /// PublishedYearは先頭の整数部分を採用し、数値でなければ `InvalidYear`。
    /// 改行を含む値は `LineBreak`。
    /// 未知のIDは何もせず `Ok(false)`。
    pub fn edit_cell(&mut self, id: RecordId, field: Field, raw: &str) -> Result<bool> {
        if raw.contains(['\n', '\r']) {
            return Err(Error::LineBreak(field));
        }
        let value = if field.is_numeric() {
            let year = parse_year(raw).ok_or_else(|| Error::InvalidYear(raw.to_string()))?;
            FieldValue::Year(year)
        } else {
            FieldValue::Text(raw.to_string())
        };
        Ok(self.store.mutate(id, field, value))
    }

    pub fn reset_all(&mut self) {
        self.store.reset_all();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.params.search = term.into();
        self.params.page = 1;
    }

    pub fn set_genre_filter(&mut self, filter: Filter) {
        self.params.genre = filter;
        self.params.page = 1;
    }

    pub fn set_year_filter(&mut self, filter: Filter) {
        self.params.year = filter;
        self.params.page = 1;
    }

    pub fn set_sort(&mut self, field: Field, direction: SortDirection) {
        self.params.sort_field = field;
        self.params.sort_direction = direction;
        self.params.page = 1;
    }

    /// 列見出しクリック相当: 同じ列なら方向反転、別の列なら昇順
    pub fn toggle_sort(&mut self, field: Field) {
        let direction = if self.params.sort_field == field {
            self.params.sort_direction.toggled()
        } else {
            SortDirection::Asc
        };
        self.set_sort(field, direction);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.params.page_size = page_size.max(1);
        self.params.page = 1;
    }

    /// 指定ページへ移動（範囲外は丸める）
    pub fn go_to_page(&mut self, page: usize) {
        let total_pages = self.view().total_pages;
        self.params.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self) -> bool {
        let view = self.view();
        if view.has_next() {
            self.params.page = view.page + 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        let view = self.view();
        if view.has_prev() {
            self.params.page = view.page - 1;
            true
        } else {
            false
        }
    }

    /// 現在の表示ページを導出
    pub fn view(&self) -> PageView {
        view::derive(self.store.records(), &self.params)
    }

    /// 作業セット全体をCSVテキストに変換（インポート順）
    pub fn export_csv(&self) -> Result<String> {
        codec::serialize(self.store.books())
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            total: self.store.len(),
            modified: self.store.modified_count(),
        }
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
