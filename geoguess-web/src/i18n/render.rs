use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn interpolate(mut text: String, args: Option<&BTreeMap<&str, &str>>) -> String {
    if let Some(args) = args {
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
    }
    text
}

/// Translate `key`, falling back to the key itself when missing.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate `key` and substitute `{name}` placeholders.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(Value::as_str)
            .map_or_else(
                || key.to_string(),
                |text| interpolate(text.to_string(), args),
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_keys_resolve() {
        crate::i18n::set_lang("en");
        assert_eq!(t("puzzle.submit"), "Submit");
        assert_eq!(t("missing.key"), "missing.key");
    }

    #[test]
    fn placeholders_are_substituted() {
        crate::i18n::set_lang("en");
        let mut args = BTreeMap::new();
        args.insert("position", "2");
        args.insert("total", "6");
        assert_eq!(tr("puzzle.cell_label", Some(&args)), "Letter 2 of 6");
    }
}
