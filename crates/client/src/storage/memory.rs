//! In-memory store implementations.

use std::collections::HashMap;

use super::{CookieAttributes, CookieStore, KeyValueStore, StorageError};

/// HashMap-backed cookie store.
///
/// Used in tests and in contexts without a real cookie jar; attributes are
/// recorded so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: HashMap<String, (String, CookieAttributes)>,
}

impl MemoryCookieStore {
    /// Create an empty cookie store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one cookie, for startup scenarios.
    #[must_use]
    pub fn with_cookie(name: &str, value: &str, attributes: CookieAttributes) -> Self {
        let mut store = Self::new();
        store.set(name, value, attributes);
        store
    }

    /// The attributes recorded for a cookie, if present.
    #[must_use]
    pub fn attributes(&self, name: &str) -> Option<CookieAttributes> {
        self.cookies.get(name).map(|(_, attrs)| *attrs)
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).map(|(value, _)| value.clone())
    }

    fn set(&mut self, name: &str, value: &str, attributes: CookieAttributes) {
        self.cookies
            .insert(name.to_owned(), (value.to_owned(), attributes));
    }

    fn remove(&mut self, name: &str) {
        self.cookies.remove(name);
    }
}

/// HashMap-backed key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one entry, for startup scenarios.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
