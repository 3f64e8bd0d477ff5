use crate::i18n::use_translations;
use emyux_shared::TextProvider;
use yew::prelude::*;

#[function_component]
pub fn ServicesSection() -> Html {
    let t = use_translations("ServicesSection");

    html! {
        <section class="services" id="services">
            <div class="section-intro">
                <h2>{ t.text("title") }</h2>
                <p>{ t.text("subtext") }</p>
            </div>
            <div class="card-grid">
                { for t.keys("services").into_iter().map(|key| html! {
                    <div class="card" key={key.clone()}>
                        <h3>{ t.text(&format!("services.{}.title", key)) }</h3>
                        <p>{ t.text(&format!("services.{}.desc", key)) }</p>
                    </div>
                }) }
            </div>
        </section>
    }
}
