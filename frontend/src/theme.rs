//! Browser side of the theme: storage, `matchMedia` and the document class.

use js_sys::Promise;
use notes_shared::Theme;
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaQueryList, Storage};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";
const DARK_CLASS: &str = "dark";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn dark_query() -> Option<MediaQueryList> {
    web_sys::window()?.match_media(DARK_QUERY).ok().flatten()
}

pub fn load_stored(key: &str) -> Option<Theme> {
    let stored = storage()?.get_item(key).ok().flatten()?;
    Theme::parse(&stored)
}

pub fn save(key: &str, theme: Theme) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(key, theme.as_str());
    }
}

pub fn clear(key: &str) {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn system_prefers_dark() -> bool {
    dark_query().is_some_and(|query| query.matches())
}

pub fn apply_to_document(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };

    let classes = root.class_list();
    let result = if theme.is_dark() {
        classes.add_1(DARK_CLASS)
    } else {
        classes.remove_1(DARK_CLASS)
    };
    if let Err(err) = result {
        tracing::warn!(error = ?err, "could not update document theme class");
    }
}

/// Resolves with the system dark-mode flag at its next change. Never resolves
/// when the browser has no `matchMedia`.
pub async fn next_system_change() -> bool {
    let Some(query) = dark_query() else {
        return std::future::pending::<bool>().await;
    };

    let promise = Promise::new(&mut |resolve, _reject| {
        query.set_onchange(Some(&resolve));
    });
    let _ = JsFuture::from(promise).await;
    query.set_onchange(None);

    query.matches()
}
