use crate::i18n::t;
use yew::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ t("app.skip_to_content") }</a>
            <h1>{ t("app.title") }</h1>
        </header>
    }
}
