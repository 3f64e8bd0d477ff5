use crate::i18n::use_translations;
use emyux_shared::TextProvider;
use yew::prelude::*;

const ICONS: [&str; 4] = ["⚡", "🔗", "⏱", "♥"];

#[function_component]
pub fn ProblemsSection() -> Html {
    let t = use_translations("ProblemsSection");

    html! {
        <section class="problems">
            <div class="section-intro">
                <h2>{ t.text("title") }</h2>
                <p>{ t.text("subtext1") }</p>
                <p>{ t.text("subtext2") }</p>
                <p class="accent strong">{ t.text("highlight") }</p>
            </div>
            <div class="card-grid">
                { for t.keys("problems").into_iter().enumerate().map(|(i, key)| html! {
                    <div class="card" key={key.clone()}>
                        <div class="card-icon">{ ICONS[i % ICONS.len()] }</div>
                        <h3>{ t.text(&format!("problems.{}.title", key)) }</h3>
                        <p>{ t.text(&format!("problems.{}.desc", key)) }</p>
                    </div>
                }) }
            </div>
        </section>
    }
}
