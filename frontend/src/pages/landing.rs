use crate::components::{
    Footer, HeroSection, ImprovedCta, ProblemsSection, ServicesSection, TestimonialsSection,
};
use yew::prelude::*;

#[function_component(Landing)]
pub fn landing() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <div class="landing-page">
            <main class="landing-main">
                <HeroSection />
                <ProblemsSection />
                <ServicesSection />
                <TestimonialsSection />
                <ImprovedCta />
            </main>
            <Footer />
        </div>
    }
}
