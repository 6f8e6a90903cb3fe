use crate::game::Feedback;
use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub feedback: Option<Feedback>,
}

#[must_use]
pub const fn feedback_key(feedback: Feedback) -> &'static str {
    match feedback {
        Feedback::Correct => "result.correct",
        Feedback::TryAgain => "result.try_again",
    }
}

#[function_component(ResultMessage)]
pub fn result_message(p: &Props) -> Html {
    let Some(feedback) = p.feedback else {
        return html! { <p class="result-message" aria-hidden="true"></p> };
    };
    let class = classes!(
        "result-message",
        match feedback {
            Feedback::Correct => "correct",
            Feedback::TryAgain => "try-again",
        }
    );
    html! { <p {class}>{ t(feedback_key(feedback)) }</p> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(feedback: Option<Feedback>) -> String {
        crate::i18n::set_lang("en");
        block_on(LocalServerRenderer::<ResultMessage>::with_props(Props { feedback }).render())
    }

    #[test]
    fn feedback_renders_message() {
        assert!(render(Some(Feedback::Correct)).contains("Correct!"));
        assert!(render(Some(Feedback::TryAgain)).contains("Try again."));
    }

    #[test]
    fn no_feedback_renders_empty_slot() {
        let html = render(None);
        assert!(!html.contains("Correct"));
        assert!(!html.contains("Try again"));
    }
}
