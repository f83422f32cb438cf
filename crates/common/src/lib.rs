//! Shared key types for the outcome read model.
//!
//! Every piece of data in the system is addressed by one of three keys:
//! - [`OutcomeKey`] identifies a single expense record
//! - [`OwnerKey`] identifies the user whose data is being touched
//! - [`CategoryKey`] identifies a category label

pub mod types;

pub use types::{CategoryKey, OutcomeKey, OwnerKey};
