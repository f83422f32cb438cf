//! Projections writing to the read-model store.

pub mod outcomes;

pub use outcomes::OutcomesView;
