//! Core projection trait.

use async_trait::async_trait;
use domain::EventEnvelope;

use crate::Result;

/// A projection that processes events and updates a read model.
///
/// Projections are the mechanism by which events are transformed into
/// denormalized read models optimized for queries. Delivery is
/// at-least-once and may be reordered across aggregates, so handlers must
/// tolerate replays and events for records they have never seen.
#[async_trait]
pub trait Projection: Send + Sync {
    /// Returns the name of this projection.
    fn name(&self) -> &'static str;

    /// Handles a single event, updating the projection's read model.
    async fn handle(&self, envelope: &EventEnvelope) -> Result<()>;

    /// Resets the projection to its initial state, e.g. before a rebuild.
    async fn reset(&self) -> Result<()>;
}
