//! ダウンロード処理
//!
//! 編集後のCSVテキストをBlobにしてブラウザのダウンロードを起動する。

use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// テキストをファイルとしてダウンロード
///
/// # Arguments
/// * `content` - ファイル内容
/// * `filename` - ダウンロード時のファイル名
pub fn download_text(content: &str, filename: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document body is not available"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;

    Url::revoke_object_url(&url)
}

/// 現在日付（UTC, `YYYY-MM-DD`）
pub fn today_iso() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    date_part(&iso).to_string()
}

/// ISO 8601 日時文字列から日付部分を取り出す
pub fn date_part(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_today_iso_is_date() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
    }

    #[wasm_bindgen_test]
    fn wasm_download_text_succeeds() {
        let content = book_csv_common::serialize(std::iter::empty()).unwrap();
        assert!(download_text(&content, "edited-books-test.csv").is_ok());
    }
}
