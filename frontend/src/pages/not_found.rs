use crate::i18n::{use_locale, use_translations};
use emyux_shared::TextProvider;
use yew::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    let t = use_translations("NotFound");
    let locale = use_locale();

    html! {
        <div class="not-found">
            <h1>{ t.text("title") }</h1>
            <a href={format!("/{}", locale.code())}>{ t.text("back") }</a>
        </div>
    }
}
