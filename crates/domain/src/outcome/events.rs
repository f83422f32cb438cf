//! Outcome lifecycle events.

use chrono::NaiveDate;
use common::CategoryKey;
use serde::{Deserialize, Serialize};

use crate::event::DomainEvent;

use super::Price;

/// Events that can occur on an outcome aggregate.
///
/// The outcome key and owner key travel in the [`EventEnvelope`], not in
/// the payload; every event applies to exactly one record of one owner.
///
/// [`EventEnvelope`]: crate::EventEnvelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OutcomeEvent {
    /// A new expense was recorded.
    OutcomeCreated(OutcomeCreatedData),

    /// A category was assigned to the expense.
    OutcomeCategoryAdded(OutcomeCategoryAddedData),

    /// The amount (value and currency) was changed.
    OutcomeAmountChanged(OutcomeAmountChangedData),

    /// The free-form description was changed.
    OutcomeDescriptionChanged(OutcomeDescriptionChangedData),

    /// The date the expense happened on was changed.
    OutcomeWhenChanged(OutcomeWhenChangedData),

    /// The expense was deleted.
    OutcomeDeleted,
}

impl DomainEvent for OutcomeEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OutcomeEvent::OutcomeCreated(_) => "OutcomeCreated",
            OutcomeEvent::OutcomeCategoryAdded(_) => "OutcomeCategoryAdded",
            OutcomeEvent::OutcomeAmountChanged(_) => "OutcomeAmountChanged",
            OutcomeEvent::OutcomeDescriptionChanged(_) => "OutcomeDescriptionChanged",
            OutcomeEvent::OutcomeWhenChanged(_) => "OutcomeWhenChanged",
            OutcomeEvent::OutcomeDeleted => "OutcomeDeleted",
        }
    }
}

/// Data for OutcomeCreated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeCreatedData {
    /// Amount in its source currency.
    pub amount: Price,

    /// The calendar date the expense happened on.
    pub when: NaiveDate,

    /// Free-form description.
    pub description: String,

    /// The category assigned at creation time.
    ///
    /// Linking this category is a separate projection step from inserting
    /// the record; a record may briefly exist without it.
    pub category_key: CategoryKey,
}

/// Data for OutcomeCategoryAdded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeCategoryAddedData {
    /// The category that was assigned.
    pub category_key: CategoryKey,
}

/// Data for OutcomeAmountChanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeAmountChangedData {
    /// The new amount, value and currency.
    pub new_amount: Price,
}

/// Data for OutcomeDescriptionChanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeDescriptionChangedData {
    /// The new description.
    pub description: String,
}

/// Data for OutcomeWhenChanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeWhenChangedData {
    /// The new date.
    pub when: NaiveDate,
}

// Convenience constructors for events
impl OutcomeEvent {
    /// Creates an OutcomeCreated event.
    pub fn created(
        amount: Price,
        when: NaiveDate,
        description: impl Into<String>,
        category_key: CategoryKey,
    ) -> Self {
        OutcomeEvent::OutcomeCreated(OutcomeCreatedData {
            amount,
            when,
            description: description.into(),
            category_key,
        })
    }

    /// Creates an OutcomeCategoryAdded event.
    pub fn category_added(category_key: CategoryKey) -> Self {
        OutcomeEvent::OutcomeCategoryAdded(OutcomeCategoryAddedData { category_key })
    }

    /// Creates an OutcomeAmountChanged event.
    pub fn amount_changed(new_amount: Price) -> Self {
        OutcomeEvent::OutcomeAmountChanged(OutcomeAmountChangedData { new_amount })
    }

    /// Creates an OutcomeDescriptionChanged event.
    pub fn description_changed(description: impl Into<String>) -> Self {
        OutcomeEvent::OutcomeDescriptionChanged(OutcomeDescriptionChangedData {
            description: description.into(),
        })
    }

    /// Creates an OutcomeWhenChanged event.
    pub fn when_changed(when: NaiveDate) -> Self {
        OutcomeEvent::OutcomeWhenChanged(OutcomeWhenChangedData { when })
    }

    /// Creates an OutcomeDeleted event.
    pub fn deleted() -> Self {
        OutcomeEvent::OutcomeDeleted
    }
}
