//! メインアプリケーションコンポーネント

use crate::components::{
    data_table::DataTable,
    header::Header,
    notice::{Notice, NoticeBanner},
    pagination::Pagination,
    toolbar::Toolbar,
    upload_area::{UploadArea, UploadResult},
};
use crate::download::{download_text, today_iso};
use book_csv_common::{export_file_name, Error, Field, Filter, RecordId, Session};
use leptos::prelude::*;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let session = RwSignal::new(Session::default());
    let (notice, set_notice) = signal(None::<Notice>);
    let (is_processing, set_is_processing) = signal(false);

    // 派生状態
    let page = Memo::new(move |_| session.with(|s| s.view()));
    let stats = Memo::new(move |_| session.with(|s| s.stats()));
    let params = Memo::new(move |_| session.with(|s| s.params().clone()));
    let genres = Memo::new(move |_| session.with(|s| s.store().distinct_genres()));
    let years = Memo::new(move |_| session.with(|s| s.store().distinct_years()));

    // ファイル読み込みハンドラ
    let on_file_read = move |result: UploadResult| {
        let (file_name, text) = match result {
            Ok(read) => read,
            Err(message) => {
                set_notice.set(Some(Notice::error("Upload failed", message)));
                return;
            }
        };

        match session.try_update(|s| s.import(&text)) {
            Some(Ok(skipped)) => {
                for row in &skipped {
                    web_sys::console::warn_1(&row.to_string().into());
                }
                let total = session.with_untracked(|s| s.stats().total);
                set_notice.set(Some(Notice::info(
                    "File uploaded successfully",
                    format!("Loaded {} records from {}", total, file_name),
                )));
            }
            Some(Err(e)) => {
                set_notice.set(Some(Notice::error("Error parsing CSV", e.to_string())));
            }
            None => {}
        }
    };

    // セル編集ハンドラ
    let on_edit = move |id: RecordId, field: Field, raw: String| {
        match session.try_update(|s| s.edit_cell(id, field, &raw)) {
            Some(Err(Error::InvalidYear(value))) => {
                set_notice.set(Some(Notice::error(
                    "Invalid year",
                    format!("\"{}\" is not a valid year", value),
                )));
            }
            Some(Err(e)) => {
                set_notice.set(Some(Notice::error("Edit failed", e.to_string())));
            }
            _ => {}
        }
    };

    let on_search = move |term: String| session.update(|s| s.set_search(term));
    let on_genre = move |filter: Filter| session.update(|s| s.set_genre_filter(filter));
    let on_year = move |filter: Filter| session.update(|s| s.set_year_filter(filter));
    let on_sort = move |field: Field| session.update(|s| s.toggle_sort(field));

    let on_prev = move |_: ()| {
        session.update(|s| {
            s.prev_page();
        })
    };
    let on_next = move |_: ()| {
        session.update(|s| {
            s.next_page();
        })
    };

    let on_reset = move |_: ()| {
        session.update(|s| s.reset_all());
        set_notice.set(Some(Notice::info(
            "All changes reset",
            "All records have been restored to their original values",
        )));
    };

    // CSVダウンロードハンドラ
    let on_download = move |_: ()| {
        if session.with_untracked(|s| s.is_empty()) {
            set_notice.set(Some(Notice::error("No data to download", "Upload a CSV file first")));
            return;
        }
        let content = match session.with_untracked(|s| s.export_csv()) {
            Ok(content) => content,
            Err(e) => {
                set_notice.set(Some(Notice::error("Download failed", e.to_string())));
                return;
            }
        };
        let filename = export_file_name(&today_iso());
        match download_text(&content, &filename) {
            Ok(()) => set_notice.set(Some(Notice::info(
                "Download started",
                format!("Saved as {}", filename),
            ))),
            Err(e) => {
                web_sys::console::error_1(&e);
                set_notice.set(Some(Notice::error("Download failed", "Could not create the file")));
            }
        }
    };

    let on_back = move |_: ()| {
        session.update(|s| s.clear());
        set_notice.set(None);
    };

    view! {
        <div class="container">
            <Header stats=stats on_back=on_back />

            <NoticeBanner notice=notice set_notice=set_notice />

            <Show
                when=move || { stats.get().total > 0 }
                fallback=move || {
                    view! {
                        <UploadArea
                            is_processing=is_processing
                            set_is_processing=set_is_processing
                            on_file_read=on_file_read
                        />
                    }
                }
            >
                <Toolbar
                    params=params
                    stats=stats
                    genres=genres
                    years=years
                    on_search=on_search
                    on_genre=on_genre
                    on_year=on_year
                    on_reset=on_reset
                    on_download=on_download
                />
                <DataTable page=page params=params on_edit=on_edit on_sort=on_sort />
                <Pagination page=page on_prev=on_prev on_next=on_next />
            </Show>
        </div>
    }
}
