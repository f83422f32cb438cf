//! The outcome (expense) domain: lifecycle events and value objects.

pub mod events;
pub mod value_objects;

pub use events::{
    OutcomeAmountChangedData, OutcomeCategoryAddedData, OutcomeCreatedData,
    OutcomeDescriptionChangedData, OutcomeEvent, OutcomeWhenChangedData,
};
pub use value_objects::{Color, CurrencyCode, Price, PriceError, PriceFixed};
