//! Keyboard and focus helpers for the letter grid.

/// DOM id of the input for cell `index`.
#[must_use]
pub fn cell_input_id(index: usize) -> String {
    format!("letter-cell-{index}")
}

#[must_use]
pub fn is_backspace(key: &str) -> bool {
    key == "Backspace"
}

/// Focus the input for cell `index`, if it is on the page.
pub fn focus_cell(index: usize) -> bool {
    crate::dom::focus_element(&cell_input_id(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_ids_are_stable() {
        assert_eq!(cell_input_id(0), "letter-cell-0");
        assert_eq!(cell_input_id(12), "letter-cell-12");
    }

    #[test]
    fn key_names_match_dom_values() {
        assert!(is_backspace("Backspace"));
        assert!(!is_backspace("Delete"));
    }
}
