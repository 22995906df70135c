//! アップロードエリアコンポーネント

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader};

/// 読み込み結果（ファイル名, 本文）またはエラーメッセージ
pub type UploadResult = Result<(String, String), String>;

#[component]
pub fn UploadArea<F>(
    is_processing: ReadSignal<bool>,
    set_is_processing: WriteSignal<bool>,
    on_file_read: F,
) -> impl IntoView
where
    F: Fn(UploadResult) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);

    // 読み込み中は次のファイルを受け付けない
    let handle_files = {
        let on_file_read = on_file_read.clone();
        move |files: FileList| {
            if is_processing.get_untracked() {
                return;
            }
            if let Some(file) = files.get(0) {
                handle_file(file, set_is_processing, on_file_read.clone());
            }
        }
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(dt) = ev.data_transfer() {
                if let Some(files) = dt.files() {
                    handle_files(files);
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = {
        let handle_files = handle_files.clone();
        move |_: web_sys::MouseEvent| {
            if is_processing.get_untracked() {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Ok(input) = document
                .create_element("input")
                .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().map_err(JsValue::from))
            else {
                return;
            };
            input.set_type("file");
            input.set_accept(".csv");

            let handle_files = handle_files.clone();
            let input_clone = input.clone();
            let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
                if let Some(files) = input_clone.files() {
                    handle_files(files);
                }
            }) as Box<dyn FnMut(_)>);

            input.set_onchange(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
            input.click();
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if is_processing.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <div class="upload-icon">"📄"</div>
            <h3>"Upload CSV File"</h3>
            <p>"Drag and drop your CSV file here, or click to browse"</p>
            <p class="text-muted">"Required columns: Title, Author, Genre, PublishedYear, ISBN"</p>
            <Show when=move || is_processing.get()>
                <p class="text-muted">"Processing..."</p>
            </Show>
        </div>
    }
}

/// 拡張子が `.csv` か（大文字小文字を区別しない）
pub fn is_csv_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".csv")
}

fn handle_file<F>(file: File, set_is_processing: WriteSignal<bool>, on_file_read: F)
where
    F: Fn(UploadResult) + 'static,
{
    let file_name = file.name();
    if !is_csv_file_name(&file_name) {
        on_file_read(Err("Invalid file type: Please upload a CSV file".to_string()));
        return;
    }

    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            on_file_read(Err(format!("File reader unavailable: {:?}", e)));
            return;
        }
    };
    set_is_processing.set(true);

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let text = reader_clone.result().ok().and_then(|result| result.as_string());
        match text {
            Some(text) => on_file_read(Ok((file_name.clone(), text))),
            None => on_file_read(Err(format!("Could not read {}", file_name))),
        }
        set_is_processing.set(false);
    }) as Box<dyn FnMut(_)>);

    // 失敗時も onloadend は呼ばれる
    reader.set_onloadend(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_text(&file) {
        set_is_processing.set(false);
        web_sys::console::error_1(&e);
    }
}
