// Integration tests (native) for language selection and persistence.

use learnquest_page::PageError;
use learnquest_page::locale::{Language, LanguageSelector, MemoryStore, PreferenceStore, STORAGE_KEY, Translations};

/// Store whose writes always fail, like `localStorage` in a locked-down browser.
#[derive(Default)]
struct ReadOnlyStore(Option<String>);

impl PreferenceStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Option<String> {
        self.0.clone()
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PageError> {
        Err(PageError::Storage("quota exceeded".into()))
    }
}

#[test]
fn persisted_choice_survives_reload() {
    let mut store = MemoryStore::default();
    store.set(STORAGE_KEY, "hi").unwrap();
    let selector = LanguageSelector::load(store);
    assert_eq!(selector.current(), Language::Hi);
    assert_eq!(selector.current().label(), "HI");
}

#[test]
fn garbage_in_storage_behaves_like_english() {
    let mut store = MemoryStore::default();
    store.set(STORAGE_KEY, "klingon").unwrap();
    assert_eq!(LanguageSelector::load(store).current(), Language::En);
}

#[test]
fn failed_write_still_switches_for_this_page() {
    let mut selector = LanguageSelector::load(ReadOnlyStore(Some("od".into())));
    assert_eq!(selector.current(), Language::Od);
    assert_eq!(selector.select("hi"), Language::Hi);
    assert_eq!(selector.current(), Language::Hi);
}

#[test]
fn every_language_translates_the_hero() {
    let t = Translations::bundled().unwrap();
    for lang in Language::ALL {
        for key in ["nav-home", "hero-title-line1", "hero-btn-primary", "stat-success"] {
            assert!(t.lookup(lang, key).is_some(), "{} missing {key}", lang.code());
        }
    }
    assert_eq!(t.lookup(Language::Hi, "nav-home"), Some("होम"));
    assert_eq!(t.lookup(Language::Od, "nav-home"), Some("ହୋମ"));
}

#[test]
fn tables_for_unknown_codes_are_ignored() {
    let t = Translations::from_json(r#"{"en": {"k": "v"}, "xx": {"k": "w"}}"#).unwrap();
    assert_eq!(t.lookup(Language::En, "k"), Some("v"));
    assert_eq!(t.keys(Language::Hi).count(), 0);
}
