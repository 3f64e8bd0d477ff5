//! Localized text lookup.
//!
//! Each locale ships one JSON document whose top-level keys are component
//! namespaces (`HeroSection`, `ContactModal`, ...). Lookups use dotted
//! paths, and object order in the document is preserved so option lists
//! render in the order they were written.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog for {locale} is not valid JSON: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
    #[error("Catalog for {0} must be a JSON object at the top level")]
    NotAnObject(Locale),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    Es,
    En,
}

impl Locale {
    pub const DEFAULT: Locale = Locale::Es;
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Accepts a bare language code or a tag such as `en-GB`.
    pub fn parse(raw: &str) -> Option<Self> {
        let lang = raw.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == lang)
    }

    /// Picks the best supported locale from an `Accept-Language` header,
    /// honouring `q` weights. Falls back to [`Locale::DEFAULT`].
    pub fn negotiate(accept_language: &str) -> Self {
        let mut best: Option<(Locale, f32)> = None;
        for part in accept_language.split(',') {
            let mut pieces = part.split(';');
            let tag = pieces.next().unwrap_or_default();
            let weight = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            if let Some(locale) = Locale::parse(tag) {
                if best.map_or(true, |(_, w)| weight > w) {
                    best = Some((locale, weight));
                }
            }
        }
        best.map(|(l, _)| l).unwrap_or(Self::DEFAULT)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Anything that can turn a dotted key into display text.
pub trait TextProvider {
    /// Resolves `key` to a string. Missing keys come back as the key itself.
    fn text(&self, key: &str) -> String;

    /// Resolves `key` to an ordered list of `(child key, text)` pairs.
    /// Arrays use their index as the child key.
    fn entries(&self, key: &str) -> Vec<(String, String)>;

    /// Child keys of an object node, in document order.
    fn keys(&self, key: &str) -> Vec<String>;
}

pub struct Catalog {
    locale: Locale,
    root: Value,
}

static ES: Lazy<Arc<Catalog>> =
    Lazy::new(|| Arc::new(Catalog::embedded(Locale::Es, include_str!("../locales/es.json"))));
static EN: Lazy<Arc<Catalog>> =
    Lazy::new(|| Arc::new(Catalog::embedded(Locale::En, include_str!("../locales/en.json"))));

impl Catalog {
    pub fn parse(locale: Locale, source: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(source)
            .map_err(|source| CatalogError::Parse { locale, source })?;
        if !root.is_object() {
            return Err(CatalogError::NotAnObject(locale));
        }
        Ok(Self { locale, root })
    }

    fn embedded(locale: Locale, source: &str) -> Self {
        Self::parse(locale, source).unwrap_or_else(|e| {
            log::error!("{}", e);
            Self {
                locale,
                root: Value::Object(Default::default()),
            }
        })
    }

    /// The compiled-in catalog for `locale`. Parsed once per process.
    pub fn for_locale(locale: Locale) -> Arc<Catalog> {
        match locale {
            Locale::Es => ES.clone(),
            Locale::En => EN.clone(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.root, |node, segment| match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }

    pub fn scoped(self: &Arc<Self>, namespace: &str) -> Translator {
        Translator {
            catalog: Arc::clone(self),
            namespace: namespace.to_string(),
        }
    }
}

impl TextProvider for Catalog {
    fn text(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                log::warn!("Missing {} translation for '{}'", self.locale, key);
                key.to_string()
            }
        }
    }

    fn entries(&self, key: &str) -> Vec<(String, String)> {
        match self.lookup(key) {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.as_str().map(|s| (i.to_string(), s.to_string())))
                .collect(),
            _ => {
                log::warn!("Missing {} translation list for '{}'", self.locale, key);
                Vec::new()
            }
        }
    }

    fn keys(&self, key: &str) -> Vec<String> {
        match self.lookup(key) {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            Some(Value::Array(items)) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

/// A catalog narrowed to one namespace, so `t.text("title")` reads
/// `<namespace>.title`.
#[derive(Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    namespace: String,
}

impl Translator {
    pub fn locale(&self) -> Locale {
        self.catalog.locale()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}.{}", self.namespace, key)
    }
}

impl PartialEq for Translator {
    fn eq(&self, other: &Self) -> bool {
        self.catalog.locale() == other.catalog.locale() && self.namespace == other.namespace
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.catalog.locale())
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl TextProvider for Translator {
    fn text(&self, key: &str) -> String {
        self.catalog.text(&self.full_key(key))
    }

    fn entries(&self, key: &str) -> Vec<(String, String)> {
        self.catalog.entries(&self.full_key(key))
    }

    fn keys(&self, key: &str) -> Vec<String> {
        self.catalog.keys(&self.full_key(key))
    }
}
