//! Keyed translation lookup backed by JSON bundles embedded at build time.
//! Every lookup is scoped to a namespace prefix (the login page uses `login`),
//! falls back to English, and finally to the key itself so a missing entry is
//! visible rather than blank.

use super::errors::AppError;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

const EN_BUNDLE: &str = include_str!("../../locales/en.json");
const ZH_BUNDLE: &str = include_str!("../../locales/zh.json");

/// Namespace holding every string rendered by the login page.
pub const LOGIN_NAMESPACE: &str = "login";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Maps a BCP 47 tag such as `zh-CN` or `en_US` to a bundled locale.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Self::En),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }

    fn bundle(self) -> &'static str {
        match self {
            Self::En => EN_BUNDLE,
            Self::Zh => ZH_BUNDLE,
        }
    }
}

type Entries = Arc<HashMap<String, String>>;

/// Translation table for one namespace.
#[derive(Clone, Debug)]
pub struct Translator {
    locale: Locale,
    entries: Entries,
    fallback: Entries,
}

impl Translator {
    /// Loads the namespace from the locale bundle and the English fallback.
    pub fn new(locale: Locale, namespace: &str) -> Result<Self, AppError> {
        let entries = load_namespace(locale.bundle(), namespace)?;
        let fallback = if locale == Locale::En {
            Arc::clone(&entries)
        } else {
            load_namespace(Locale::En.bundle(), namespace)?
        };
        Ok(Self {
            locale,
            entries,
            fallback,
        })
    }

    /// Table without entries; every lookup returns its key.
    pub fn empty() -> Self {
        let entries: Entries = Arc::default();
        Self {
            locale: Locale::En,
            fallback: Arc::clone(&entries),
            entries,
        }
    }

    /// Picks the first supported locale from the configured tag and the
    /// browser languages, defaulting to English.
    pub fn negotiate<'a>(
        configured: Option<&'a str>,
        browser: impl IntoIterator<Item = &'a str>,
        namespace: &str,
    ) -> Result<Self, AppError> {
        let locale = configured
            .into_iter()
            .chain(browser)
            .find_map(Locale::from_tag)
            .unwrap_or_default();
        Self::new(locale, namespace)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolves `key` within the namespace.
    pub fn t(&self, key: &str) -> String {
        self.entries
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
            .unwrap_or_else(|| {
                tracing::debug!(key, "missing translation");
                key.to_string()
            })
    }
}

fn load_namespace(bundle: &str, namespace: &str) -> Result<Entries, AppError> {
    let root: Value = serde_json::from_str(bundle)
        .map_err(|err| AppError::Parse(format!("Invalid translation bundle: {err}")))?;
    let scope = root
        .get(namespace)
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::Config(format!("Missing translation namespace `{namespace}`.")))?;

    let entries = scope
        .iter()
        .filter_map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
        .collect();
    Ok(Arc::new(entries))
}
