use crate::components::button::Button;
use crate::i18n::t;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub value: String,
    pub on_input: Callback<String>,
    pub on_submit: Callback<()>,
}

#[function_component(NameForm)]
pub fn name_form(p: &Props) -> Html {
    let oninput = {
        let cb = p.on_input.clone();
        Callback::from(move |e: InputEvent| {
            cb.emit(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let onsubmit = {
        let cb = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit(());
        })
    };
    let blank = p.value.trim().is_empty();

    html! {
        <form class="name-form" {onsubmit}>
            <label for="player-name" class="sr-only">{ t("name.label") }</label>
            <input
                id="player-name"
                type="text"
                autocomplete="name"
                placeholder={t("name.placeholder")}
                value={p.value.clone()}
                {oninput}
            />
            <Button
                id={AttrValue::from("name-submit")}
                label={AttrValue::from(t("name.submit"))}
                kind={AttrValue::from("submit")}
                disabled={blank}
            />
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(value: &str) -> String {
        crate::i18n::set_lang("en");
        let props = Props {
            value: value.to_string(),
            on_input: Callback::noop(),
            on_submit: Callback::noop(),
        };
        block_on(LocalServerRenderer::<NameForm>::with_props(props).render())
    }

    #[test]
    fn blank_name_disables_submit() {
        let html = render("  ");
        assert!(html.contains("Enter your name"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn typed_name_enables_submit() {
        let html = render("Ada");
        assert!(html.contains("Submit Name"));
        assert!(!html.contains("disabled"));
    }
}
