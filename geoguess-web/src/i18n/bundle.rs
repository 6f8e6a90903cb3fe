use serde_json::Value;
use std::cell::RefCell;

/// Languages with a bundled translation file.
pub const SUPPORTED_LANGS: &[&str] = &["en"];

pub struct I18nBundle {
    pub lang: String,
    pub translations: Value,
}

fn load_translations(lang: &str) -> Option<Value> {
    let raw = match lang {
        "en" => include_str!("../../static/i18n/en.json"),
        _ => return None,
    };
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::error!("translation bundle {lang} is malformed: {err}");
            None
        }
    }
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    Some(I18nBundle {
        lang: lang.to_string(),
        translations: load_translations(lang)?,
    })
}

fn fallback_bundle() -> I18nBundle {
    I18nBundle {
        lang: "en".to_string(),
        translations: Value::Object(serde_json::Map::new()),
    }
}

thread_local! {
    static CURRENT: RefCell<I18nBundle> =
        RefCell::new(build_bundle("en").unwrap_or_else(fallback_bundle));
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Switch the active bundle and update `<html lang>`.
///
/// Unknown languages leave the current bundle in place.
pub fn set_lang(lang: &str) {
    let Some(bundle) = build_bundle(lang) else {
        log::warn!("no translations for {lang}; keeping {}", current_lang());
        return;
    };
    CURRENT.with(|cell| cell.replace(bundle));
    #[cfg(target_arch = "wasm32")]
    if let Some(el) = crate::dom::document().and_then(|doc| doc.document_element()) {
        let _ = el.set_attribute("lang", lang);
        let _ = el.set_attribute("dir", "ltr");
    }
}

#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}
