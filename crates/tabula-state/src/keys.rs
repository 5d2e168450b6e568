//! Identifiers discovered in fragment markup.
//!
//! None of these are created by the client; they are read off attributes
//! each time a fragment is inserted and used to address durable state and
//! the field endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one collapsible element's persisted open/closed flag.
///
/// The raw key doubles as the durable-store key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a set of rows toggled together as a unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Durable-store key for the group's open flag.
    pub fn storage_key(&self) -> String {
        format!("group{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which rendering of a field a fetch asks the server for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldAction {
    View,
    Edit,
}

impl FieldAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }
}

/// Coordinates of one editable value: table, entity id, field name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub table: String,
    pub entity: String,
    pub field: String,
}

impl FieldKey {
    pub fn new(
        table: impl Into<String>,
        entity: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Field endpoint for this key.
    pub fn endpoint(&self, action: FieldAction) -> String {
        format!(
            "/api/{}/item/{}/field/{}?action={}",
            self.table,
            self.entity,
            self.field,
            action.as_str()
        )
    }

    /// Durable-store key for the relation widget's filter text.
    pub fn filter_key(&self) -> String {
        format!("{}/{}/{}/filter", self.table, self.entity, self.field)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.table, self.entity, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_format() {
        let key = FieldKey::new("post", "7", "title");
        assert_eq!(
            key.endpoint(FieldAction::View),
            "/api/post/item/7/field/title?action=view"
        );
        assert_eq!(
            key.endpoint(FieldAction::Edit),
            "/api/post/item/7/field/title?action=edit"
        );
    }

    #[test]
    fn test_storage_keys() {
        assert_eq!(GroupId::new("g1").storage_key(), "groupg1");
        assert_eq!(
            FieldKey::new("post", "7", "title").filter_key(),
            "post/7/title/filter"
        );
    }

    #[test]
    fn test_field_key_display() {
        assert_eq!(FieldKey::new("post", "7", "title").to_string(), "post:7.title");
    }
}
