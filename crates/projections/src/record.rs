//! The outcome record and the pure per-record event fold.

use chrono::NaiveDate;
use common::{CategoryKey, OutcomeKey, OwnerKey};
use domain::{OutcomeEvent, Price, PriceFixed};
use serde::{Deserialize, Serialize};

/// One expense as materialized in the read model.
///
/// The category list has set semantics (no duplicates) but preserves
/// insertion order, so "the first associated category" is a stable notion
/// for display sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Globally unique identifier, assigned at creation.
    pub key: OutcomeKey,

    /// The owning user. Immutable.
    pub owner: OwnerKey,

    /// Amount in its source currency, not normalized.
    pub amount: Price,

    /// The calendar date the expense happened on.
    pub when: NaiveDate,

    /// Free-form description.
    pub description: String,

    categories: Vec<CategoryKey>,
}

impl OutcomeRecord {
    /// Creates a record with an empty category set.
    pub fn new(
        key: OutcomeKey,
        owner: OwnerKey,
        amount: Price,
        when: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key,
            owner,
            amount,
            when,
            description: description.into(),
            categories: Vec::new(),
        }
    }

    /// The categories assigned to this record, in assignment order.
    pub fn categories(&self) -> &[CategoryKey] {
        &self.categories
    }

    /// Returns true if the record carries the given category.
    pub fn has_category(&self, category: CategoryKey) -> bool {
        self.categories.contains(&category)
    }

    /// The first assigned category, if any.
    pub fn first_category(&self) -> Option<CategoryKey> {
        self.categories.first().copied()
    }

    /// Adds a category. Set semantics: adding an already-present key is a
    /// no-op. Returns true if the set changed.
    pub fn add_category(&mut self, category: CategoryKey) -> bool {
        if self.categories.contains(&category) {
            return false;
        }
        self.categories.push(category);
        true
    }

    /// The amount paired with the record's date, as conversion input.
    pub fn price_fixed(&self) -> PriceFixed {
        PriceFixed::new(self.amount.clone(), self.when)
    }
}

/// Applies one lifecycle event to the state of a single record.
///
/// This is the pure projection function: `None` means "no record exists".
/// Replays and events for missing or already-deleted records fall through
/// unchanged, which is what makes at-least-once, possibly-reordered
/// delivery safe.
///
/// `OutcomeCreated` yields a record with an *empty* category set; linking
/// the creation category is a second, separate step (see
/// [`OutcomesView`](crate::views::OutcomesView)).
pub fn apply(
    key: OutcomeKey,
    owner: OwnerKey,
    state: Option<OutcomeRecord>,
    event: &OutcomeEvent,
) -> Option<OutcomeRecord> {
    match (state, event) {
        (None, OutcomeEvent::OutcomeCreated(data)) => Some(OutcomeRecord::new(
            key,
            owner,
            data.amount.clone(),
            data.when,
            data.description.clone(),
        )),
        // Replayed creation: keep what is already there.
        (Some(record), OutcomeEvent::OutcomeCreated(_)) => Some(record),
        (Some(mut record), OutcomeEvent::OutcomeCategoryAdded(data)) => {
            record.add_category(data.category_key);
            Some(record)
        }
        (Some(mut record), OutcomeEvent::OutcomeAmountChanged(data)) => {
            record.amount = data.new_amount.clone();
            Some(record)
        }
        (Some(mut record), OutcomeEvent::OutcomeDescriptionChanged(data)) => {
            record.description = data.description.clone();
            Some(record)
        }
        (Some(mut record), OutcomeEvent::OutcomeWhenChanged(data)) => {
            record.when = data.when;
            Some(record)
        }
        (Some(_), OutcomeEvent::OutcomeDeleted) => None,
        // Mutations of a record that does not exist are silent no-ops.
        (None, _) => None,
    }
}
