use crate::contact::ContactModal;
use crate::i18n::use_translations;
use emyux_shared::TextProvider;
use yew::prelude::*;

#[function_component]
pub fn ImprovedCta() -> Html {
    let t = use_translations("ImprovedCTA");

    html! {
        <section class="cta">
            <h2>
                { t.text("title_part1") }{" "}
                <span class="highlight">{ t.text("title_highlight") }</span>
                { t.text("title_part2") }
            </h2>
            <p>{ t.text("subtext") }</p>
            <ContactModal>
                <button class="cta-button">{ t.text("cta") }</button>
            </ContactModal>
            <div class="feature-chips">
                { for t.entries("features").into_iter().map(|(key, item)| html! {
                    <div class="chip" key={key}>{"✓ "}{ item }</div>
                }) }
            </div>
        </section>
    }
}
