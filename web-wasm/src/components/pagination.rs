//! ページ送りコンポーネント

use book_csv_common::PageView;
use leptos::prelude::*;

#[component]
pub fn Pagination<FP, FN>(page: Memo<PageView>, on_prev: FP, on_next: FN) -> impl IntoView
where
    FP: Fn(()) + 'static + Clone + Send + Sync,
    FN: Fn(()) + 'static + Clone + Send + Sync,
{
    let range_text = move || {
        let p = page.get();
        let last = p.first_row_number + p.records.len().saturating_sub(1);
        format!("Showing {} to {} of {} results", p.first_row_number, last, p.total_filtered)
    };

    view! {
        <Show when=move || { page.get().total_pages > 1 }>
            <div class="pagination">
                <span class="text-muted">{range_text}</span>
                <button
                    class="btn btn-secondary"
                    disabled=move || !page.get().has_prev()
                    on:click={
                        let on_prev = on_prev.clone();
                        move |_| on_prev(())
                    }
                >
                    "Previous"
                </button>
                <span>{move || format!("Page {} of {}", page.get().page, page.get().total_pages)}</span>
                <button
                    class="btn btn-secondary"
                    disabled=move || !page.get().has_next()
                    on:click={
                        let on_next = on_next.clone();
                        move |_| on_next(())
                    }
                >
                    "Next"
                </button>
            </div>
        </Show>
    }
}
