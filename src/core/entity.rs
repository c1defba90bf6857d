use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the counterparty that issued an instruction.
///
/// Free text. Rankings group instructions by exact identifier and use
/// its ordering to settle ties between equal totals.
///
/// # Examples
///
/// ```
/// use fx_settlement_reporting::core::entity::EntityId;
///
/// let foo = EntityId::new("foo");
/// let bar = EntityId::new("bar");
/// assert_ne!(foo, bar);
/// assert!(bar < foo);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new entity identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this entity ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
