//! Localization: translated UI strings and request locale negotiation.

mod locale;

use std::collections::HashMap;

use anyhow::{Context, Result};

pub use locale::{LANGUAGE_PARAM, Locale, negotiate, requested_language};

/// Message catalogs bundled into the binary, keyed by language.
const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.toml")),
    ("ja", include_str!("../../locales/ja.toml")),
    ("vi", include_str!("../../locales/vi.toml")),
];

/// Translated messages for every bundled language.
#[derive(Debug, Clone)]
pub struct Catalogs {
    /// Language consulted when a key is missing.
    fallback: String,
    /// `language -> key -> message`.
    messages: HashMap<String, HashMap<String, String>>,
}

impl Catalogs {
    /// Parses the bundled catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled catalog is not a flat TOML table of
    /// strings.
    pub fn embedded(fallback: &str) -> Result<Self> {
        let mut messages = HashMap::with_capacity(EMBEDDED.len());
        for (lang, source) in EMBEDDED {
            let table: HashMap<String, String> = toml::from_str(source)
                .with_context(|| format!("failed to parse message catalog '{lang}'"))?;
            messages.insert(String::from(*lang), table);
        }
        Ok(Self {
            fallback: String::from(fallback),
            messages,
        })
    }

    /// Languages with a bundled catalog.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Returns a translator bound to `lang`.
    #[must_use]
    pub fn translator<'a>(&'a self, lang: &'a str) -> Translator<'a> {
        Translator {
            catalogs: self,
            lang,
        }
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

/// Message lookup for one language.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    catalogs: &'a Catalogs,
    lang: &'a str,
}

impl<'a> Translator<'a> {
    /// Language this translator renders.
    #[must_use]
    pub const fn lang(&self) -> &'a str {
        self.lang
    }

    /// Returns the message for `key`, falling back to the fallback
    /// language and finally to the key itself.
    #[must_use]
    pub fn t(&self, key: &'a str) -> &'a str {
        self.catalogs
            .lookup(self.lang, key)
            .or_else(|| self.catalogs.lookup(&self.catalogs.fallback, key))
            .unwrap_or_else(|| {
                tracing::debug!(key, lang = self.lang, "missing translation");
                key
            })
    }

    /// Returns the message for `key` with `{{name}}` placeholders replaced.
    #[must_use]
    pub fn t_with(&self, key: &'a str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(String::from(self.t(key)), |message, (name, value)| {
                message.replace(&format!("{{{{{name}}}}}"), value)
            })
    }
}
