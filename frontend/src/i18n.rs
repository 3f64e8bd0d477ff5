use emyux_shared::{Catalog, Locale, Translator};
use std::sync::Arc;
use yew::prelude::*;

/// The active locale's catalog, shared with every component below a
/// [`LocaleProvider`].
#[derive(Clone)]
pub struct I18n {
    catalog: Arc<Catalog>,
}

impl I18n {
    pub fn new(locale: Locale) -> Self {
        Self {
            catalog: Catalog::for_locale(locale),
        }
    }

    pub fn locale(&self) -> Locale {
        self.catalog.locale()
    }
}

impl PartialEq for I18n {
    fn eq(&self, other: &Self) -> bool {
        self.locale() == other.locale()
    }
}

#[derive(Properties, PartialEq)]
pub struct LocaleProviderProps {
    pub locale: Locale,
    #[prop_or_default]
    pub children: Children,
}

#[function_component]
pub fn LocaleProvider(props: &LocaleProviderProps) -> Html {
    let locale = props.locale;
    use_effect_with_deps(
        move |locale| {
            if let Some(root) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.document_element())
            {
                let _ = root.set_attribute("lang", locale.code());
            }
            || ()
        },
        locale,
    );

    html! {
        <ContextProvider<I18n> context={I18n::new(locale)}>
            { for props.children.iter() }
        </ContextProvider<I18n>>
    }
}

/// Text lookups scoped to `namespace`, e.g. `use_translations("Footer")`.
#[hook]
pub fn use_translations(namespace: &'static str) -> Translator {
    let i18n = use_context::<I18n>().unwrap_or_else(|| I18n::new(Locale::DEFAULT));
    i18n.catalog.scoped(namespace)
}

#[hook]
pub fn use_locale() -> Locale {
    use_context::<I18n>()
        .map(|i18n| i18n.locale())
        .unwrap_or(Locale::DEFAULT)
}
