use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    /// `button` unless the button submits its form.
    #[prop_or(AttrValue::from("button"))]
    pub kind: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
}

#[function_component(Button)]
pub fn button(p: &Props) -> Html {
    let onclick = p.onclick.clone();
    html! {
        <button id={p.id.clone()} type={p.kind.clone()} class="btn" disabled={p.disabled} {onclick}>
            { p.label.clone() }
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn button_renders_label_and_type() {
        let props = Props {
            label: AttrValue::from("Confirm"),
            id: None,
            kind: AttrValue::from("submit"),
            disabled: false,
            onclick: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<Button>::with_props(props).render());
        assert!(html.contains("Confirm"));
        assert!(html.contains(r#"type="submit""#));
    }
}
