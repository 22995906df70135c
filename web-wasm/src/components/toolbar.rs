//! 検索・絞り込み・操作ボタン

use book_csv_common::{Filter, SessionStats, ViewParams};
use leptos::prelude::*;

#[component]
pub fn Toolbar<FS, FG, FY, FR, FD>(
    params: Memo<ViewParams>,
    stats: Memo<SessionStats>,
    genres: Memo<Vec<String>>,
    years: Memo<Vec<i64>>,
    on_search: FS,
    on_genre: FG,
    on_year: FY,
    on_reset: FR,
    on_download: FD,
) -> impl IntoView
where
    FS: Fn(String) + 'static + Clone + Send + Sync,
    FG: Fn(Filter) + 'static + Clone + Send + Sync,
    FY: Fn(Filter) + 'static + Clone + Send + Sync,
    FR: Fn(()) + 'static + Clone + Send + Sync,
    FD: Fn(()) + 'static + Clone + Send + Sync,
{
    let selected = |filter: &Filter| filter.as_option().unwrap_or("all").to_string();

    view! {
        <div class="toolbar">
            <input
                class="search"
                type="text"
                placeholder="Search books, authors, genres, or ISBN..."
                prop:value=move || params.get().search
                on:input=move |ev| on_search(event_target_value(&ev))
            />

            <select
                prop:value=move || selected(&params.get().genre)
                on:change=move |ev| on_genre(Filter::from(event_target_value(&ev).as_str()))
            >
                <option value="all">"All Genres"</option>
                <For
                    each=move || genres.get()
                    key=|genre| genre.clone()
                    children=move |genre| view! { <option value=genre.clone()>{genre.clone()}</option> }
                />
            </select>

            <select
                prop:value=move || selected(&params.get().year)
                on:change=move |ev| on_year(Filter::from(event_target_value(&ev).as_str()))
            >
                <option value="all">"All Years"</option>
                <For
                    each=move || years.get()
                    key=|year| *year
                    children=move |year| view! { <option value=year.to_string()>{year}</option> }
                />
            </select>

            <button
                class="btn btn-secondary"
                disabled=move || stats.get().modified == 0
                on:click=move |_| on_reset(())
            >
                "Reset All"
            </button>

            <button class="btn btn-primary" on:click=move |_| on_download(())>
                "Download CSV"
            </button>
        </div>
    }
}
