use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an outcome (expense) record.
///
/// Wraps a UUID to provide type safety and prevent mixing up
/// outcome keys with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeKey(Uuid);

impl OutcomeKey {
    /// Creates a new random outcome key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an outcome key from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OutcomeKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OutcomeKey {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<OutcomeKey> for Uuid {
    fn from(key: OutcomeKey) -> Self {
        key.0
    }
}

/// Identifies the user that owns a record or issues a query.
///
/// Every store access is scoped by an owner key, so data belonging to one
/// user is structurally unreachable from another user's operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerKey(Uuid);

impl OwnerKey {
    /// Creates a new random owner key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an owner key from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OwnerKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OwnerKey {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<OwnerKey> for Uuid {
    fn from(key: OwnerKey) -> Self {
        key.0
    }
}

/// Unique identifier for a category label.
///
/// Category metadata (name, color, icon) lives with an external
/// collaborator; outcome records only hold these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(Uuid);

impl CategoryKey {
    /// Creates a new random category key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a category key from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CategoryKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CategoryKey {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<CategoryKey> for Uuid {
    fn from(key: CategoryKey) -> Self {
        key.0
    }
}
