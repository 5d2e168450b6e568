//! Durable open/closed state for collapsible elements.
//!
//! Every disclosure element carries an item key; the store remembers the
//! user's last choice under that raw key so it survives reloads and
//! fragment swaps. The stored value is `"open"` or empty; anything else
//! (a truncated write, a stale format) reads as closed.

use crate::keys::{FieldKey, GroupId, ItemKey};
use crate::store::KeyValueStore;

/// Fixed durable-store key for the contributor-list filter text.
pub const CONTRIBUTOR_FILTER_KEY: &str = "cfilter";

const OPEN: &str = "open";

/// Open/closed state of one disclosure element or group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disclosure {
    Open,
    Closed,
}

impl Disclosure {
    /// Parse a stored value. Absent and malformed both read as closed.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some(OPEN) => Self::Open,
            _ => Self::Closed,
        }
    }

    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    /// Value written back to the store.
    pub fn as_stored(self) -> &'static str {
        match self {
            Self::Open => OPEN,
            Self::Closed => "",
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Compute the flip a disclosure element needs, if any.
///
/// `force_open` is the one-shot flag the server sets to reveal a freshly
/// created item. Returns the open state the element must be moved to, or
/// `None` when its current state already matches.
pub fn reconcile(stored: Disclosure, force_open: bool, currently_open: bool) -> Option<bool> {
    let must_be_open = stored.is_open() || force_open;
    (currently_open != must_be_open).then_some(must_be_open)
}

/// Durable disclosure state, addressed by the identifiers the fragments
/// carry. Also hosts the two filter-text entries that share the store.
pub struct DisclosureStore<S> {
    store: S,
}

impl<S: KeyValueStore> DisclosureStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn item(&self, key: &ItemKey) -> Disclosure {
        Disclosure::from_stored(self.store.get(key.as_str()).as_deref())
    }

    pub fn set_item(&self, key: &ItemKey, state: Disclosure) {
        self.store.set(key.as_str(), state.as_stored());
    }

    pub fn group(&self, gid: &GroupId) -> Disclosure {
        Disclosure::from_stored(self.store.get(&gid.storage_key()).as_deref())
    }

    pub fn set_group(&self, gid: &GroupId, state: Disclosure) {
        self.store.set(&gid.storage_key(), state.as_stored());
    }

    pub fn filter_text(&self, field: &FieldKey) -> String {
        self.store.get(&field.filter_key()).unwrap_or_default()
    }

    pub fn set_filter_text(&self, field: &FieldKey, text: &str) {
        self.store.set(&field.filter_key(), text);
    }

    pub fn contributor_filter(&self) -> String {
        self.store.get(CONTRIBUTOR_FILTER_KEY).unwrap_or_default()
    }

    pub fn set_contributor_filter(&self, text: &str) {
        self.store.set(CONTRIBUTOR_FILTER_KEY, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_stored_value_parsing() {
        assert_eq!(Disclosure::from_stored(Some("open")), Disclosure::Open);
        assert_eq!(Disclosure::from_stored(Some("")), Disclosure::Closed);
        assert_eq!(Disclosure::from_stored(None), Disclosure::Closed);
        // Malformed values fail open to the default.
        assert_eq!(Disclosure::from_stored(Some("garbage")), Disclosure::Closed);
    }

    #[test]
    fn test_reconcile() {
        assert_eq!(reconcile(Disclosure::Open, false, false), Some(true));
        assert_eq!(reconcile(Disclosure::Closed, true, false), Some(true));
        assert_eq!(reconcile(Disclosure::Closed, false, true), Some(false));
        assert_eq!(reconcile(Disclosure::Open, false, true), None);
        assert_eq!(reconcile(Disclosure::Closed, false, false), None);
    }

    #[test]
    fn test_item_state_survives_store() {
        let disclosure = DisclosureStore::new(MemoryStore::new());
        let key = ItemKey::new("contrib/42");
        assert_eq!(disclosure.item(&key), Disclosure::Closed);
        disclosure.set_item(&key, Disclosure::Open);
        assert_eq!(disclosure.item(&key), Disclosure::Open);
        disclosure.set_item(&key, Disclosure::Closed);
        assert_eq!(disclosure.item(&key), Disclosure::Closed);
    }

    #[test]
    fn test_group_key_is_scoped() {
        let store = MemoryStore::new();
        let disclosure = DisclosureStore::new(store);
        disclosure.set_group(&GroupId::new("g1"), Disclosure::Open);
        // The raw item key "g1" is untouched by the group write.
        assert_eq!(disclosure.item(&ItemKey::new("g1")), Disclosure::Closed);
        assert_eq!(disclosure.group(&GroupId::new("g1")), Disclosure::Open);
    }

    #[test]
    fn test_filter_text_defaults_empty() {
        let disclosure = DisclosureStore::new(MemoryStore::new());
        let field = FieldKey::new("contrib", "9", "country");
        assert_eq!(disclosure.filter_text(&field), "");
        disclosure.set_filter_text(&field, "nether");
        assert_eq!(disclosure.filter_text(&field), "nether");
        assert_eq!(disclosure.contributor_filter(), "");
        disclosure.set_contributor_filter("ann");
        assert_eq!(disclosure.contributor_filter(), "ann");
    }
}
