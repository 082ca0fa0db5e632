//! In-memory store.

use std::collections::HashMap;

use super::{CartStore, StoreError};

/// A store backed by a `HashMap`. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_owned(), value.to_owned());
        store
    }

    /// Raw value under `key`, bypassing the trait.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl CartStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("carrinho").unwrap(), None);

        store.set("carrinho", "[]").unwrap();
        assert_eq!(store.get("carrinho").unwrap().as_deref(), Some("[]"));

        store.set("carrinho", "[1]").unwrap();
        assert_eq!(store.raw("carrinho"), Some("[1]"));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = MemoryStore::with_entry("a", "1");
        store.set("b", "2").unwrap();
        assert_eq!(store.raw("a"), Some("1"));
        assert_eq!(store.raw("b"), Some("2"));
    }
}
