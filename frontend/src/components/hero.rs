use crate::contact::ContactModal;
use crate::i18n::use_translations;
use emyux_shared::TextProvider;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

fn dim_factor(scroll_y: f64) -> f64 {
    (scroll_y / 500.0).min(1.0) * 0.6
}

#[function_component]
pub fn HeroSection() -> Html {
    let t = use_translations("HeroSection");
    let dim_opacity = use_state(|| 0.0);
    // Darken the backdrop as the visitor scrolls past the hero
    {
        let dim_opacity = dim_opacity.clone();
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    let callback = Closure::<dyn Fn()>::new({
                        let dim_opacity = dim_opacity.clone();
                        move || {
                            if let Some(win) = web_sys::window() {
                                if let Ok(scroll_y) = win.scroll_y() {
                                    dim_opacity.set(dim_factor(scroll_y));
                                }
                            }
                        }
                    });
                    if let Err(e) = window
                        .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                    {
                        log::warn!("Could not attach scroll listener: {:?}", e);
                    }
                    if let Ok(scroll_y) = window.scroll_y() {
                        dim_opacity.set(dim_factor(scroll_y));
                    }
                    Box::new(move || {
                        if let Some(win) = web_sys::window() {
                            let _ = win.remove_event_listener_with_callback(
                                "scroll",
                                callback.as_ref().unchecked_ref(),
                            );
                        }
                    })
                } else {
                    Box::new(|| ())
                };
                move || destructor()
            },
            (),
        );
    }

    html! {
        <section class="hero">
            <div class="hero-copy">
                <h1 class="hero-title">
                    { t.text("title_part1") }{" "}
                    <span class="accent">{ t.text("title_part2") }</span>
                </h1>
                <p class="hero-subtitle">
                    <span class="accent strong">{ t.text("subtext_highlight") }</span>{" "}
                    { t.text("subtext_rest") }
                </p>
                <div class="hero-cta-group">
                    <ContactModal>
                        <button class="hero-cta">{ t.text("cta_contact") }</button>
                    </ContactModal>
                    <a class="forward-link" href="#services">
                        { t.text("cta_portfolio") }{" →"}
                    </a>
                </div>
                <div class="achievements">
                    <h3>{ t.text("achievements_title") }</h3>
                    <ul>
                        { for t.entries("achievements").into_iter().map(|(key, item)| html! {
                            <li key={key}>{"→ "}{ item }</li>
                        }) }
                    </ul>
                </div>
            </div>
            <div class="hero-visual" role="img" aria-label={t.text("image_alt")}>
                <div class="hero-background"></div>
                <div class="hero-overlay" style={format!("opacity: {};", *dim_opacity)}></div>
            </div>
        </section>
    }
}
