//! Translation lookup over the embedded locale tables.
//!
//! Keys are dotted paths such as `login.title`. Resolution walks the
//! active locale's nested table one segment at a time; a miss restarts
//! the walk on English, and a miss there returns the key itself, so
//! callers always get something printable.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::Value;

use crate::storage::{KeyValueStore, StorageError};

/// Durable preference key holding the interface language tag.
pub const LOCALE_KEY: &str = "locale";

static EN_TABLE: &str = include_str!("../locales/en.toml");
static KO_TABLE: &str = include_str!("../locales/ko.toml");

/// Interface languages shipped with the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ko];

    /// Parse a stored tag. Unknown values are treated as unset.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        match tag {
            "en" => Some(Locale::En),
            "ko" => Some(Locale::Ko),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ko => "ko",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when an embedded locale table fails to parse.
#[derive(Debug, Error)]
#[error("invalid locale table for {locale}: {source}")]
pub struct LocaleTableError {
    locale: &'static str,
    #[source]
    source: toml::de::Error,
}

/// Parsed locale tables for every supported [`Locale`].
pub struct Translations {
    en: Value,
    ko: Value,
}

impl Translations {
    /// Parse the embedded tables. The tables ship inside the binary, so
    /// a failure here means the build itself carries a broken asset.
    pub fn load() -> Result<Self, LocaleTableError> {
        let en = toml::from_str(EN_TABLE).map_err(|source| LocaleTableError {
            locale: "en",
            source,
        })?;
        let ko = toml::from_str(KO_TABLE).map_err(|source| LocaleTableError {
            locale: "ko",
            source,
        })?;
        Ok(Self { en, ko })
    }

    fn table(&self, locale: Locale) -> &Value {
        match locale {
            Locale::En => &self.en,
            Locale::Ko => &self.ko,
        }
    }

    /// Resolve `key` in `locale`, falling back to English and finally
    /// to the raw key.
    pub fn translate(&self, locale: Locale, key: &str) -> String {
        if let Some(text) = lookup(self.table(locale), key) {
            return text.to_string();
        }
        if let Some(text) = lookup(&self.en, key) {
            return text.to_string();
        }
        key.to_string()
    }
}

/// Walk a dotted key through a nested table. Non-string and empty
/// leaves count as missing.
fn lookup<'a>(table: &'a Value, key: &str) -> Option<&'a str> {
    let mut current = table;
    for segment in key.split('.') {
        current = current.get(segment)?;
    }
    match current.as_str() {
        Some(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}

/// Read the saved locale preference, defaulting to English when the
/// key is absent or holds an unknown tag.
pub fn saved_locale(prefs: &dyn KeyValueStore) -> Result<Locale, StorageError> {
    Ok(prefs
        .get(LOCALE_KEY)?
        .and_then(|tag| Locale::from_tag(&tag))
        .unwrap_or_default())
}

/// Persist the locale preference.
pub fn save_locale(prefs: &dyn KeyValueStore, locale: Locale) -> Result<(), StorageError> {
    prefs.set(LOCALE_KEY, locale.as_str())
}
