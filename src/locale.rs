//! Language selection and the bundled translation table.
//!
//! The selected language lives in an explicit [`LanguageSelector`] that owns
//! its [`PreferenceStore`]; there is no global "current language".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// Key of the single persisted preference slot.
pub const STORAGE_KEY: &str = "selectedLanguage";

const BUNDLED: &str = include_str!("../assets/translations.json");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Od,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Od];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Od => "od",
        }
    }

    /// Text for the selector button.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Hi => "HI",
            Language::Od => "OD",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code.trim())
    }

    /// Unknown or missing codes resolve to the default language.
    pub fn resolve(code: Option<&str>) -> Self {
        code.and_then(Self::from_code).unwrap_or_default()
    }
}

/// The single external key/value slot.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PageError>;
}

/// Process-local store; what the page falls back to when `localStorage` is blocked.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct LanguageSelector<S> {
    store: S,
    current: Language,
}

impl<S: PreferenceStore> LanguageSelector<S> {
    /// Read the persisted preference once.
    pub fn load(store: S) -> Self {
        let current = Language::resolve(store.get(STORAGE_KEY).as_deref());
        Self { store, current }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    /// Switch language and persist it. Unknown codes select the default.
    pub fn select(&mut self, code: &str) -> Language {
        let lang = Language::resolve(Some(code));
        self.current = lang;
        if let Err(err) = self.store.set(STORAGE_KEY, lang.code()) {
            log::warn!("could not persist language {}: {err}", lang.code());
        }
        lang
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Language → (key → text), read-only.
#[derive(Clone, Debug, Default)]
pub struct Translations {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl Translations {
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(BUNDLED)
    }

    /// Tables for unknown language codes are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)?;
        let tables = raw
            .into_iter()
            .filter_map(|(code, table)| Language::from_code(&code).map(|l| (l, table)))
            .collect();
        Ok(Self { tables })
    }

    pub fn lookup(&self, lang: Language, key: &str) -> Option<&str> {
        self.tables.get(&lang)?.get(key).map(String::as_str)
    }

    pub fn keys(&self, lang: Language) -> impl Iterator<Item = &str> {
        self.tables.get(&lang).into_iter().flat_map(|t| t.keys().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_behave_like_default() {
        assert_eq!(Language::resolve(Some("fr")), Language::En);
        assert_eq!(Language::resolve(Some("")), Language::En);
        assert_eq!(Language::resolve(None), Language::En);
        assert_eq!(Language::resolve(Some("hi")), Language::Hi);
    }

    #[test]
    fn selection_round_trips_through_store() {
        let mut selector = LanguageSelector::load(MemoryStore::default());
        assert_eq!(selector.current(), Language::En);
        selector.select("od");
        let reloaded = LanguageSelector::load(selector.into_store());
        assert_eq!(reloaded.current(), Language::Od);
    }

    #[test]
    fn selecting_unknown_code_persists_default() {
        let mut selector = LanguageSelector::load(MemoryStore::default());
        selector.select("hi");
        assert_eq!(selector.select("xx"), Language::En);
        assert_eq!(selector.store().get(STORAGE_KEY).as_deref(), Some("en"));
    }

    #[test]
    fn bundled_tables_share_keys() {
        let t = Translations::bundled().unwrap();
        let mut en: Vec<&str> = t.keys(Language::En).collect();
        en.sort_unstable();
        assert!(!en.is_empty());
        for lang in [Language::Hi, Language::Od] {
            let mut other: Vec<&str> = t.keys(lang).collect();
            other.sort_unstable();
            assert_eq!(en, other, "{lang:?} keys differ");
        }
        assert_eq!(t.lookup(Language::En, "nav-home"), Some("Home"));
        assert!(t.lookup(Language::En, "missing-key").is_none());
    }
}
