//! 編集可能なデータテーブル

use book_csv_common::{Field, PageView, Record, RecordId, SortDirection, ViewParams, GENRES};
use leptos::prelude::*;
use web_sys::KeyboardEvent;

/// 編集中のセル
type EditingCell = Option<(RecordId, Field)>;

#[component]
pub fn DataTable<FE, FS>(
    page: Memo<PageView>,
    params: Memo<ViewParams>,
    on_edit: FE,
    on_sort: FS,
) -> impl IntoView
where
    FE: Fn(RecordId, Field, String) + 'static + Clone + Send + Sync,
    FS: Fn(Field) + 'static + Clone + Send + Sync,
{
    let editing = RwSignal::new(None::<(RecordId, Field)>);
    let edit_value = RwSignal::new(String::new());

    let headers = Field::ALL
        .into_iter()
        .map(|field| {
            let on_sort = on_sort.clone();
            let arrow = move || {
                let p = params.get();
                match (p.sort_field == field, p.sort_direction) {
                    (false, _) => "",
                    (true, SortDirection::Asc) => " ▲",
                    (true, SortDirection::Desc) => " ▼",
                }
            };
            view! {
                <th>
                    <button class="btn btn-ghost" on:click=move |_| on_sort(field)>
                        {field.as_str()}
                        {arrow}
                    </button>
                </th>
            }
        })
        .collect_view();

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"#"</th>
                    {headers}
                    <th>"Status"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || {
                        let p = page.get();
                        let first = p.first_row_number;
                        p.records
                            .into_iter()
                            .enumerate()
                            .map(|(i, record)| (first + i, record))
                            .collect::<Vec<_>>()
                    }
                    key=|(row_number, record)| (*row_number, record.clone())
                    children=move |(row_number, record)| {
                        let on_edit = on_edit.clone();
                        view! {
                            <BookRow
                                row_number=row_number
                                record=record
                                editing=editing
                                edit_value=edit_value
                                on_edit=on_edit
                            />
                        }
                    }
                />
            </tbody>
        </table>
        <Show when=move || page.get().records.is_empty()>
            <p class="text-muted">"No data to display"</p>
        </Show>
    }
}

#[component]
fn BookRow<FE>(
    row_number: usize,
    record: Record,
    editing: RwSignal<EditingCell>,
    edit_value: RwSignal<String>,
    on_edit: FE,
) -> impl IntoView
where
    FE: Fn(RecordId, Field, String) + 'static + Clone + Send + Sync,
{
    let is_modified = record.is_modified;
    let cells = Field::ALL
        .into_iter()
        .map(|field| {
            view! {
                <EditableCell
                    id=record.id
                    field=field
                    display=record.book.get(field).to_string()
                    is_modified=is_modified
                    editing=editing
                    edit_value=edit_value
                    on_edit=on_edit.clone()
                />
            }
        })
        .collect_view();

    view! {
        <tr class:modified=is_modified>
            <td class="row-number">{row_number}</td>
            {cells}
            <td>
                <Show when=move || is_modified>
                    <span class="badge badge-modified">"Modified"</span>
                </Show>
            </td>
        </tr>
    }
}

#[component]
fn EditableCell<FE>(
    id: RecordId,
    field: Field,
    display: String,
    is_modified: bool,
    editing: RwSignal<EditingCell>,
    edit_value: RwSignal<String>,
    on_edit: FE,
) -> impl IntoView
where
    FE: Fn(RecordId, Field, String) + 'static + Clone + Send + Sync,
{
    let content = move || {
        if editing.get() == Some((id, field)) {
            let on_edit = on_edit.clone();
            cell_editor(id, field, editing, edit_value, on_edit).into_any()
        } else {
            let label = display.clone();
            let initial = display.clone();
            view! {
                <span
                    class="cell-value"
                    on:click=move |_| {
                        edit_value.set(initial.clone());
                        editing.set(Some((id, field)));
                    }
                >
                    {label}
                </span>
            }
            .into_any()
        }
    };

    let class = if is_modified { "cell cell-modified" } else { "cell" };
    view! { <td class=class>{content}</td> }
}

fn cell_editor<FE>(
    id: RecordId,
    field: Field,
    editing: RwSignal<EditingCell>,
    edit_value: RwSignal<String>,
    on_edit: FE,
) -> impl IntoView
where
    FE: Fn(RecordId, Field, String) + 'static + Clone + Send + Sync,
{
    let save = move || {
        on_edit(id, field, edit_value.get_untracked());
        editing.set(None);
    };
    let cancel = move || editing.set(None);

    let on_keydown = {
        let save = save.clone();
        move |ev: KeyboardEvent| match ev.key().as_str() {
            "Enter" => save(),
            "Escape" => cancel(),
            _ => {}
        }
    };

    let input = if field == Field::Genre {
        // 一覧外の値も選択肢に残す
        let current = edit_value.get_untracked();
        let mut options: Vec<String> = GENRES.iter().map(|g| g.to_string()).collect();
        if !options.contains(&current) {
            options.insert(0, current.clone());
        }
        view! {
            <select on:change=move |ev| edit_value.set(event_target_value(&ev))>
                {options
                    .into_iter()
                    .map(|genre| {
                        let is_selected = genre == current;
                        view! { <option value=genre.clone() selected=is_selected>{genre.clone()}</option> }
                    })
                    .collect_view()}
            </select>
        }
        .into_any()
    } else {
        let input_type = if field.is_numeric() { "number" } else { "text" };
        view! {
            <input
                type=input_type
                prop:value=move || edit_value.get()
                on:input=move |ev| edit_value.set(event_target_value(&ev))
                on:keydown=on_keydown
                autofocus=true
            />
        }
        .into_any()
    };

    view! {
        <div class="cell-editor">
            {input}
            <button class="btn btn-small" on:click=move |_| save()>"✓"</button>
            <button class="btn btn-small" on:click=move |_| cancel()>"✕"</button>
        </div>
    }
}
