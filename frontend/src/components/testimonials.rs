use crate::i18n::use_translations;
use emyux_shared::TextProvider;
use yew::prelude::*;

#[function_component]
pub fn TestimonialsSection() -> Html {
    let t = use_translations("TestimonialsSection");

    html! {
        <section class="testimonials">
            <h2>{ t.text("title") }</h2>
            <div class="card-grid">
                { for t.keys("testimonials").into_iter().map(|key| html! {
                    <figure class="testimonial" key={key.clone()}>
                        <blockquote>{ t.text(&format!("testimonials.{}.quote", key)) }</blockquote>
                        <figcaption>
                            <span class="author">{ t.text(&format!("testimonials.{}.author", key)) }</span>
                            <span class="role">{ t.text(&format!("testimonials.{}.role", key)) }</span>
                        </figcaption>
                    </figure>
                }) }
            </div>
        </section>
    }
}
