use web_sys::Storage;

use crate::error::PageError;
use crate::locale::{MemoryStore, PreferenceStore};

/// `localStorage` when the browser allows it, an in-memory map otherwise.
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => BrowserStore::Local(storage),
            None => {
                log::warn!("localStorage unavailable, language choice will not persist");
                BrowserStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            BrowserStore::Local(s) => s.get_item(key).ok().flatten(),
            BrowserStore::Memory(m) => m.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PageError> {
        match self {
            BrowserStore::Local(s) => s
                .set_item(key, value)
                .map_err(|e| PageError::Storage(e.as_string().unwrap_or_else(|| format!("{e:?}")))),
            BrowserStore::Memory(m) => m.set(key, value),
        }
    }
}
