//! Read model and query engine for outcome (expense) records.
//!
//! This crate is the query side of the system:
//! - [`Projection`] trait and [`ProjectionProcessor`] for routing events
//! - [`OutcomesView`] — the projector, sole writer of the store
//! - [`OutcomeStore`] trait with an in-memory reference implementation
//! - [`OutcomeQueries`] — the query engine, plus the wire-level
//!   [`OutcomeQuery`] dispatch
//! - collaborator contracts: [`PriceConverter`], [`CategoryProvider`]

pub mod categories;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod paging;
pub mod prices;
pub mod processor;
pub mod projection;
pub mod queries;
pub mod record;
pub mod sorting;
pub mod store;
pub mod views;

pub use categories::{CategoryProvider, CategorySnapshot, InMemoryCategoryProvider};
pub use dispatch::{OutcomeQuery, QueryResponse, SortRequest};
pub use error::{ProjectionError, Result};
pub use model::{CategoryTotal, MonthPeriod, OutcomeOverview, Period, YearPeriod};
pub use paging::PAGE_SIZE;
pub use prices::{PriceConverter, StaticRateConverter};
pub use processor::ProjectionProcessor;
pub use projection::Projection;
pub use queries::OutcomeQueries;
pub use record::OutcomeRecord;
pub use sorting::{OutcomeSortField, SortDescriptor, SortDirection};
pub use store::{InMemoryOutcomeStore, OutcomeFilter, OutcomeStore};
pub use views::OutcomesView;
