//! Category metadata contract and an in-memory provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{CategoryKey, OwnerKey};
use domain::Color;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::Result;

/// Descriptive metadata of a category, owned by an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub key: CategoryKey,
    pub name: String,
    pub description: String,
    pub color: Color,
    pub icon: String,
}

/// Read access to category metadata, scoped by owner.
///
/// Returns `None` when the key does not exist *or* belongs to a different
/// owner; callers decide whether that is an error (point lookups) or
/// something to tolerate (display joins).
#[async_trait]
pub trait CategoryProvider: Send + Sync {
    /// Fetches the metadata snapshot for one category.
    async fn snapshot(
        &self,
        owner: OwnerKey,
        key: CategoryKey,
    ) -> Result<Option<CategorySnapshot>>;
}

/// In-memory category provider for tests and single-process setups.
#[derive(Clone, Default)]
pub struct InMemoryCategoryProvider {
    categories: Arc<RwLock<HashMap<OwnerKey, HashMap<CategoryKey, CategorySnapshot>>>>,
}

impl InMemoryCategoryProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a category for an owner, replacing any previous snapshot.
    pub async fn insert(&self, owner: OwnerKey, snapshot: CategorySnapshot) {
        self.categories
            .write()
            .await
            .entry(owner)
            .or_default()
            .insert(snapshot.key, snapshot);
    }
}

#[async_trait]
impl CategoryProvider for InMemoryCategoryProvider {
    async fn snapshot(
        &self,
        owner: OwnerKey,
        key: CategoryKey,
    ) -> Result<Option<CategorySnapshot>> {
        let categories = self.categories.read().await;
        Ok(categories
            .get(&owner)
            .and_then(|snapshots| snapshots.get(&key))
            .cloned())
    }
}
