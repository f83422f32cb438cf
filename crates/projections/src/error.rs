//! Read-model error types.

use common::CategoryKey;
use domain::{CurrencyCode, PriceError};
use thiserror::Error;

/// Errors that can occur while projecting events or answering queries.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A category lookup referenced a key that does not exist or is not
    /// owned by the caller.
    #[error("No such category with key '{0}'")]
    CategoryNotFound(CategoryKey),

    /// A query asked for a sort field this engine does not know.
    #[error("Unsupported sort field: {0}")]
    UnsupportedSort(String),

    /// The storage backend failed; propagated unchanged, never retried here.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Failed to deserialize an event payload.
    #[error("Event deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Price arithmetic failed.
    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    /// The converter has no rate for a currency pair.
    #[error("No exchange rate from {from} to {to}")]
    MissingRate {
        from: CurrencyCode,
        to: CurrencyCode,
    },
}

/// Result type for read-model operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
