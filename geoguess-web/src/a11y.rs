// Accessibility helpers

/// Id of the polite live region that announces round results.
pub const STATUS_REGION_ID: &str = "game-status";

/// Focus ring styles plus the screen-reader-only utility class.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #1E88E5;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Update the live region status for screen readers.
pub fn set_status(msg: &str) {
    if let Some(node) = crate::dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_css_includes_sr_only() {
        let css = visible_focus_css();
        assert!(css.contains(":focus"));
        assert!(css.contains(".sr-only"));
    }
}
