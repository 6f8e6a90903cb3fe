use crate::components::button::Button;
use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub denied: bool,
    /// The runtime has no geolocation at all.
    #[prop_or_default]
    pub unsupported: bool,
    pub on_request: Callback<()>,
}

#[function_component(LocationPrompt)]
pub fn location_prompt(p: &Props) -> Html {
    let onclick = {
        let cb = p.on_request.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let guidance = if p.unsupported {
        html! { <p class="location-guidance" role="alert">{ t("location.unsupported") }</p> }
    } else if p.denied {
        html! { <p class="location-guidance" role="alert">{ t("location.denied") }</p> }
    } else {
        Html::default()
    };

    html! {
        <section class="location-prompt" aria-labelledby="location-heading">
            <p id="location-heading">{ t("location.prompt") }</p>
            <Button
                id={AttrValue::from("allow-location")}
                label={AttrValue::from(t("location.button"))}
                {onclick}
            />
            { guidance }
        </section>
    }
}
