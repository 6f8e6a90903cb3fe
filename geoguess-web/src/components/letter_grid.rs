use crate::game::Round;
use crate::i18n::{t, tr};
use crate::input::{cell_input_id, is_backspace};
use std::collections::BTreeMap;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// How one position of the country name is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    /// Whitespace between words.
    Gap,
    Revealed(char),
    Editable { value: Option<char> },
}

#[must_use]
pub fn cells_for_round(round: &Round) -> Vec<CellView> {
    round
        .country
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            if round.mask.contains(index) {
                CellView::Editable {
                    value: round.buffer.get(index),
                }
            } else if ch.is_whitespace() {
                CellView::Gap
            } else {
                CellView::Revealed(ch)
            }
        })
        .collect()
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub cells: Vec<CellView>,
    /// Input is ignored while the next round is pending.
    #[prop_or_default]
    pub frozen: bool,
    pub on_input: Callback<(usize, String)>,
    pub on_backspace: Callback<usize>,
    pub on_submit: Callback<()>,
}

fn editable_cell(p: &Props, index: usize, value: Option<char>) -> Html {
    let oninput = {
        let cb = p.on_input.clone();
        Callback::from(move |e: InputEvent| {
            cb.emit((index, e.target_unchecked_into::<HtmlInputElement>().value()));
        })
    };
    let onkeydown = {
        let cb = p.on_backspace.clone();
        Callback::from(move |e: KeyboardEvent| {
            if is_backspace(&e.key()) {
                cb.emit(index);
            }
        })
    };
    let position = (index + 1).to_string();
    let total = p.cells.len().to_string();
    let mut args = BTreeMap::new();
    args.insert("position", position.as_str());
    args.insert("total", total.as_str());
    let label = tr("puzzle.cell_label", Some(&args));

    html! {
        <input
            id={cell_input_id(index)}
            class="letter-cell editable"
            type="text"
            maxlength="1"
            autocomplete="off"
            aria-label={label}
            value={value.map(String::from).unwrap_or_default()}
            disabled={p.frozen}
            {oninput}
            {onkeydown}
        />
    }
}

#[function_component(LetterGrid)]
pub fn letter_grid(p: &Props) -> Html {
    let onsubmit = {
        let cb = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit(());
        })
    };

    let cells = p.cells.iter().enumerate().map(|(index, cell)| match *cell {
        CellView::Gap => html! { <span class="letter-gap" aria-hidden="true"></span> },
        CellView::Revealed(ch) => html! {
            <span class="letter-cell revealed">{ ch.to_string() }</span>
        },
        CellView::Editable { value } => editable_cell(p, index, value),
    });

    html! {
        <form class="letter-grid" {onsubmit}>
            <p class="instructions">{ t("puzzle.instructions") }</p>
            <div class="letters" role="group">{ for cells }</div>
            <button type="submit" class="btn" disabled={p.frozen}>{ t("puzzle.submit") }</button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Puzzle;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props(cells: Vec<CellView>, frozen: bool) -> Props {
        Props {
            cells,
            frozen,
            on_input: Callback::noop(),
            on_backspace: Callback::noop(),
            on_submit: Callback::noop(),
        }
    }

    #[test]
    fn cells_follow_mask_and_buffer() {
        let mut puzzle = Puzzle::with_seed(3);
        let round = puzzle.select_round().clone();
        let cells = cells_for_round(&round);
        assert_eq!(cells.len(), round.country.chars().count());
        for (index, cell) in cells.iter().enumerate() {
            if round.mask.contains(index) {
                assert_eq!(*cell, CellView::Editable { value: None });
            } else {
                assert!(matches!(cell, CellView::Revealed(_) | CellView::Gap));
            }
        }
    }

    #[test]
    fn grid_renders_inputs_only_for_masked_cells() {
        crate::i18n::set_lang("en");
        let cells = vec![
            CellView::Revealed('C'),
            CellView::Editable { value: Some('A') },
            CellView::Gap,
            CellView::Editable { value: None },
        ];
        let html = block_on(LocalServerRenderer::<LetterGrid>::with_props(props(cells, false)).render());
        assert!(html.contains("letter-cell-1"));
        assert!(html.contains("letter-cell-3"));
        assert!(!html.contains("letter-cell-0"));
        assert!(html.contains("letter-gap"));
        assert!(html.contains("Letter 2 of 4"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn frozen_grid_disables_input() {
        crate::i18n::set_lang("en");
        let cells = vec![CellView::Editable { value: None }];
        let html = block_on(LocalServerRenderer::<LetterGrid>::with_props(props(cells, true)).render());
        assert!(html.contains("disabled"));
    }
}
