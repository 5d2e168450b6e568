//! Durable string store behind a narrow trait.
//!
//! The browser backs this with localStorage; tests and other embeddings use
//! [`MemoryStore`]. Writes are synchronous and last-writer-wins per key;
//! entries are never expired.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Get/set/remove over the durable store.
///
/// Implementations take `&self`; the store is only ever touched from the
/// single browser thread, so interior mutability is enough.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store used by tests and non-browser embeddings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));
        store.set("k", "w");
        assert_eq!(store.get("k"), Some("w".to_string()));
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_shared_store_through_rc() {
        let store = Rc::new(MemoryStore::new());
        let alias = Rc::clone(&store);
        alias.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));
    }
}
