use crate::i18n::{use_locale, use_translations};
use chrono::Datelike;
use emyux_shared::TextProvider;
use yew::prelude::*;

const LEGAL_PAGES: [(&str, &str); 3] = [
    ("privacy-policy", "legal.privacy"),
    ("terms", "legal.terms"),
    ("cookies", "legal.cookies"),
];

#[function_component]
pub fn Footer() -> Html {
    let t = use_translations("Footer");
    let locale = use_locale();
    let current_year = chrono::Local::now().year();

    html! {
        <footer class="site-footer">
            <div class="footer-grid">
                <div>
                    <h3>{ t.text("contact.title") }</h3>
                    <address>
                        <p>
                            <strong>{"Emyux Software"}</strong><br/>
                            {"Av. Tecnológica 1234, Piso 8"}<br/>
                            {"Barcelona, 08025"}<br/>
                            {"España"}
                        </p>
                        <p>
                            <strong>{ format!("{}:", t.text("contact.phone")) }</strong>
                            {" +34 123 456 789"}
                        </p>
                        <a href="mailto:team@emyux.com">{"team@emyux.com"}</a>
                    </address>
                </div>
                <div>
                    <h3>{ t.text("legal.title") }</h3>
                    <ul>
                        { for LEGAL_PAGES.iter().map(|(path, key)| html! {
                            <li key={*path}>
                                <a href={format!("/{}/{}", locale.code(), path)} target="_blank">
                                    { t.text(key) }
                                </a>
                            </li>
                        }) }
                    </ul>
                </div>
                <div class="footer-quote">
                    <h3>{ t.text("quote.title") }</h3>
                    <blockquote>{ t.text("quote.quote") }</blockquote>
                    <p>{ t.text("quote.subtitle") }</p>
                </div>
            </div>
            <div class="footer-bottom">
                <p>{ format!("© {} Emyux Software. {}", current_year, t.text("copyright")) }</p>
            </div>
        </footer>
    }
}
