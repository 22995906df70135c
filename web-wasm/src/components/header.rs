//! ヘッダーコンポーネント

use book_csv_common::SessionStats;
use leptos::prelude::*;

#[component]
pub fn Header<FB>(stats: Memo<SessionStats>, on_back: FB) -> impl IntoView
where
    FB: Fn(()) + 'static + Clone + Send + Sync,
{
    let has_data = move || stats.get().total > 0;

    view! {
        <header class="header">
            <Show when=has_data>
                <button
                    class="btn btn-ghost"
                    on:click={
                        let on_back = on_back.clone();
                        move |_| on_back(())
                    }
                >
                    "← Back to Upload"
                </button>
            </Show>
            <div>
                <h1>"CSV Handler"</h1>
                <p class="text-muted">"Upload, edit, and manage your book collection data"</p>
            </div>
            <Show when=has_data>
                <span class="badge">{move || format!("{} records", stats.get().total)}</span>
                <Show when=move || { stats.get().modified > 0 }>
                    <span class="badge badge-modified">
                        {move || format!("{} modified", stats.get().modified)}
                    </span>
                </Show>
            </Show>
        </header>
    }
}
