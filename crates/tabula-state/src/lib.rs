//! State layer for the Tabula client.
//!
//! Tabula pages are rendered server-side and updated by swapping fragments
//! of markup in place. Everything that has to survive a swap or a reload
//! lives here: which collapsibles are open, which group branches the user
//! expanded, whether an edited field differs from the value it was rendered
//! with, and what the sidebar's tri-state options currently say.
//!
//! This crate is deliberately free of DOM types so the state machines can
//! be exercised on any target; the `tabula-dom` crate binds them to the
//! browser.

pub mod disclosure;
pub mod error;
pub mod field;
pub mod groups;
pub mod keys;
pub mod options;
pub mod store;

pub use disclosure::{Disclosure, DisclosureStore};
pub use error::Error;
pub use field::{Baseline, Candidate, SaveDecision};
pub use groups::GroupHierarchy;
pub use keys::{FieldAction, FieldKey, GroupId, ItemKey};
pub use options::TriState;
pub use store::{KeyValueStore, MemoryStore};
