use emyux_shared::Locale;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod config;
mod contact;
mod i18n;
mod pages {
    pub mod landing;
    pub mod not_found;
}
mod utils {
    pub mod api;
}

use i18n::LocaleProvider;
use pages::{landing::Landing, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/:locale")]
    Home { locale: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Root => html! {
            <Redirect<Route> to={Route::Home { locale: Locale::DEFAULT.code().to_string() }} />
        },
        Route::Home { locale } => match Locale::parse(&locale).filter(|l| l.code() == locale) {
            Some(locale) => html! {
                <LocaleProvider {locale}>
                    <Landing />
                </LocaleProvider>
            },
            None => html! {
                <LocaleProvider locale={Locale::DEFAULT}>
                    <NotFound />
                </LocaleProvider>
            },
        },
        Route::NotFound => html! {
            <LocaleProvider locale={Locale::DEFAULT}>
                <NotFound />
            </LocaleProvider>
        },
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("Starting Emyux site");
    yew::Renderer::<App>::new().render();
}
