//! 通知バナーコンポーネント

use leptos::prelude::*;

/// ユーザー向けの通知
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), is_error: false }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), is_error: true }
    }
}

#[component]
pub fn NoticeBanner(notice: ReadSignal<Option<Notice>>, set_notice: WriteSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            let class = if n.is_error { "notice notice-error" } else { "notice" };
            view! {
                <div class=class>
                    <strong>{n.title}</strong>
                    <p>{n.description}</p>
                    <button class="btn btn-ghost" on:click=move |_| set_notice.set(None)>"✕"</button>
                </div>
            }
        })
    }
}
