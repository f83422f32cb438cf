//! The read-model store: owner-scoped record persistence.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{CategoryKey, OutcomeKey, OwnerKey};
use tokio::sync::RwLock;

use crate::Result;
use crate::model::Period;
use crate::record::OutcomeRecord;

/// Predicate for store scans.
///
/// All criteria are conjunctive; an empty filter matches every record of
/// the owner.
#[derive(Debug, Clone, Default)]
pub struct OutcomeFilter {
    period: Option<Period>,
    category: Option<CategoryKey>,
    description: Option<String>,
}

impl OutcomeFilter {
    /// Matches every record of the owner.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches records whose date falls into the period.
    pub fn in_period(period: impl Into<Period>) -> Self {
        Self {
            period: Some(period.into()),
            ..Self::default()
        }
    }

    /// Additionally requires the given category to be assigned.
    /// `None` leaves the filter unchanged.
    pub fn with_category(mut self, category: Option<CategoryKey>) -> Self {
        self.category = category;
        self
    }

    /// Additionally requires the description to contain the given text,
    /// case-insensitively.
    pub fn description_contains(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Evaluates the filter against one record.
    pub fn matches(&self, record: &OutcomeRecord) -> bool {
        if let Some(period) = &self.period
            && !period.contains(record.when)
        {
            return false;
        }
        if let Some(category) = self.category
            && !record.has_category(category)
        {
            return false;
        }
        if let Some(text) = &self.description
            && !record
                .description
                .to_lowercase()
                .contains(&text.to_lowercase())
        {
            return false;
        }
        true
    }
}

/// Owner-scoped storage for outcome records.
///
/// Every operation takes the owner key (directly or inside the record),
/// so one user's data is structurally unreachable from another user's
/// calls. Implementations must serialize writes to a single record and
/// must never expose a partially-applied mutation to readers.
#[async_trait]
pub trait OutcomeStore: Send + Sync {
    /// Inserts a new record. Returns false (and leaves the store
    /// untouched) if a record with the same key already exists.
    async fn insert(&self, record: OutcomeRecord) -> Result<bool>;

    /// Point lookup by key.
    async fn get(&self, owner: OwnerKey, key: OutcomeKey) -> Result<Option<OutcomeRecord>>;

    /// Replaces an existing record wholesale. Returns false if no record
    /// with that key exists for the owner.
    async fn replace(&self, record: OutcomeRecord) -> Result<bool>;

    /// Removes a record and its category associations. Returns false if
    /// nothing was there.
    async fn remove(&self, owner: OwnerKey, key: OutcomeKey) -> Result<bool>;

    /// Returns all records of the owner matching the filter. Order is
    /// unspecified; callers sort.
    async fn scan(&self, owner: OwnerKey, filter: OutcomeFilter) -> Result<Vec<OutcomeRecord>>;

    /// Drops all records of all owners, e.g. before a projection rebuild.
    async fn clear(&self) -> Result<()>;
}

/// In-memory store implementation.
///
/// Serves as the reference backend for tests and as the documentation of
/// store semantics. A single lock over the whole map serializes writes,
/// which subsumes the per-record serialization requirement.
#[derive(Clone, Default)]
pub struct InMemoryOutcomeStore {
    records: Arc<RwLock<HashMap<OwnerKey, HashMap<OutcomeKey, OutcomeRecord>>>>,
}

impl InMemoryOutcomeStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records held for the owner.
    pub async fn count(&self, owner: OwnerKey) -> usize {
        self.records
            .read()
            .await
            .get(&owner)
            .map(|records| records.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl OutcomeStore for InMemoryOutcomeStore {
    async fn insert(&self, record: OutcomeRecord) -> Result<bool> {
        let mut store = self.records.write().await;
        let records = store.entry(record.owner).or_default();
        if records.contains_key(&record.key) {
            return Ok(false);
        }
        records.insert(record.key, record);
        Ok(true)
    }

    async fn get(&self, owner: OwnerKey, key: OutcomeKey) -> Result<Option<OutcomeRecord>> {
        let store = self.records.read().await;
        Ok(store.get(&owner).and_then(|records| records.get(&key)).cloned())
    }

    async fn replace(&self, record: OutcomeRecord) -> Result<bool> {
        let mut store = self.records.write().await;
        match store
            .get_mut(&record.owner)
            .and_then(|records| records.get_mut(&record.key))
        {
            Some(existing) => {
                *existing = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, owner: OwnerKey, key: OutcomeKey) -> Result<bool> {
        let mut store = self.records.write().await;
        Ok(store
            .get_mut(&owner)
            .and_then(|records| records.remove(&key))
            .is_some())
    }

    async fn scan(&self, owner: OwnerKey, filter: OutcomeFilter) -> Result<Vec<OutcomeRecord>> {
        let store = self.records.read().await;
        Ok(store
            .get(&owner)
            .map(|records| {
                records
                    .values()
                    .filter(|record| filter.matches(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn clear(&self) -> Result<()> {
        self.records.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::Price;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(owner: OwnerKey, when: NaiveDate, description: &str) -> OutcomeRecord {
        OutcomeRecord::new(
            OutcomeKey::new(),
            owner,
            Price::new(1000, "EUR"),
            when,
            description,
        )
    }

    #[tokio::test]
    async fn insert_then_get() {
        let store = InMemoryOutcomeStore::new();
        let owner = OwnerKey::new();
        let rec = record(owner, date(2024, 3, 5), "lunch");
        let key = rec.key;

        assert!(store.insert(rec.clone()).await.unwrap());
        assert_eq!(store.get(owner, key).await.unwrap(), Some(rec));
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected_and_preserves_original() {
        let store = InMemoryOutcomeStore::new();
        let owner = OwnerKey::new();
        let original = record(owner, date(2024, 3, 5), "lunch");
        let key = original.key;

        let mut duplicate = original.clone();
        duplicate.description = "not lunch".to_string();

        assert!(store.insert(original.clone()).await.unwrap());
        assert!(!store.insert(duplicate).await.unwrap());
        assert_eq!(
            store.get(owner, key).await.unwrap().unwrap().description,
            "lunch"
        );
    }

    #[tokio::test]
    async fn replace_missing_record_returns_false() {
        let store = InMemoryOutcomeStore::new();
        let owner = OwnerKey::new();
        assert!(!store.replace(record(owner, date(2024, 3, 5), "x")).await.unwrap());
    }

    #[tokio::test]
    async fn remove_reports_whether_anything_was_there() {
        let store = InMemoryOutcomeStore::new();
        let owner = OwnerKey::new();
        let rec = record(owner, date(2024, 3, 5), "lunch");
        let key = rec.key;

        assert!(!store.remove(owner, key).await.unwrap());
        store.insert(rec).await.unwrap();
        assert!(store.remove(owner, key).await.unwrap());
        assert_eq!(store.get(owner, key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn records_are_invisible_to_other_owners() {
        let store = InMemoryOutcomeStore::new();
        let alice = OwnerKey::new();
        let bob = OwnerKey::new();
        let rec = record(alice, date(2024, 3, 5), "lunch");
        let key = rec.key;
        store.insert(rec).await.unwrap();

        assert_eq!(store.get(bob, key).await.unwrap(), None);
        assert!(!store.remove(bob, key).await.unwrap());
        assert!(store.scan(bob, OutcomeFilter::all()).await.unwrap().is_empty());
        assert_eq!(store.count(alice).await, 1);
    }

    #[tokio::test]
    async fn scan_filters_by_period() {
        let store = InMemoryOutcomeStore::new();
        let owner = OwnerKey::new();
        store.insert(record(owner, date(2024, 3, 5), "march")).await.unwrap();
        store.insert(record(owner, date(2024, 4, 5), "april")).await.unwrap();
        store.insert(record(owner, date(2023, 3, 5), "last year")).await.unwrap();

        let march = crate::model::MonthPeriod::new(2024, 3).unwrap();
        let hits = store
            .scan(owner, OutcomeFilter::in_period(march))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "march");

        let year = crate::model::YearPeriod::new(2024);
        let hits = store
            .scan(owner, OutcomeFilter::in_period(year))
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn scan_filters_by_category_membership() {
        let store = InMemoryOutcomeStore::new();
        let owner = OwnerKey::new();
        let food = CategoryKey::new();

        let mut tagged = record(owner, date(2024, 3, 5), "lunch");
        tagged.add_category(food);
        let untagged = record(owner, date(2024, 3, 6), "fuel");

        store.insert(tagged.clone()).await.unwrap();
        store.insert(untagged).await.unwrap();

        let hits = store
            .scan(owner, OutcomeFilter::all().with_category(Some(food)))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, tagged.key);

        // No category restriction returns both.
        let hits = store
            .scan(owner, OutcomeFilter::all().with_category(None))
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn scan_description_match_is_case_insensitive() {
        let store = InMemoryOutcomeStore::new();
        let owner = OwnerKey::new();
        store.insert(record(owner, date(2024, 3, 5), "Grocery Shopping")).await.unwrap();
        store.insert(record(owner, date(2024, 3, 6), "fuel")).await.unwrap();

        let hits = store
            .scan(owner, OutcomeFilter::all().description_contains("groCERY"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "Grocery Shopping");
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let store = InMemoryOutcomeStore::new();
        let owner = OwnerKey::new();
        store.insert(record(owner, date(2024, 3, 5), "lunch")).await.unwrap();

        store.clear().await.unwrap();
        assert_eq!(store.count(owner).await, 0);
    }
}
