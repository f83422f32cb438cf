//! Routes delivered events to registered projections.

use domain::EventEnvelope;

use crate::Result;
use crate::projection::Projection;

/// Delivers events to projections, one envelope at a time.
///
/// The processor owns no event storage; the hosting environment feeds it
/// whatever its pipeline delivers. It supports:
/// - Single event delivery to all registered projections
/// - Replay: reset every projection and re-deliver a recorded sequence
pub struct ProjectionProcessor {
    projections: Vec<Box<dyn Projection>>,
}

impl ProjectionProcessor {
    /// Creates a processor with no projections registered.
    pub fn new() -> Self {
        Self {
            projections: Vec::new(),
        }
    }

    /// Registers a projection with this processor.
    pub fn register(&mut self, projection: Box<dyn Projection>) {
        self.projections.push(projection);
    }

    /// Returns the number of registered projections.
    pub fn projection_count(&self) -> usize {
        self.projections.len()
    }

    /// Delivers a single event to all registered projections.
    #[tracing::instrument(skip(self, envelope), fields(event_type = %envelope.event_type))]
    pub async fn process_event(&self, envelope: &EventEnvelope) -> Result<()> {
        for projection in &self.projections {
            projection.handle(envelope).await?;
            metrics::counter!("projections_events_processed").increment(1);
        }
        Ok(())
    }

    /// Resets all projections and re-delivers the given event sequence.
    #[tracing::instrument(skip(self, envelopes))]
    pub async fn replay(&self, envelopes: &[EventEnvelope]) -> Result<()> {
        self.reset_all().await?;
        for envelope in envelopes {
            self.process_event(envelope).await?;
        }
        tracing::info!(events_replayed = envelopes.len(), "replay complete");
        Ok(())
    }

    /// Resets all registered projections to their initial state.
    pub async fn reset_all(&self) -> Result<()> {
        for projection in &self.projections {
            projection.reset().await?;
        }
        Ok(())
    }
}

impl Default for ProjectionProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::{OutcomeKey, OwnerKey};
    use domain::Version;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// A simple counting projection for testing.
    struct CountingProjection {
        count: Arc<RwLock<u64>>,
    }

    impl CountingProjection {
        fn new() -> Self {
            Self {
                count: Arc::new(RwLock::new(0)),
            }
        }
    }

    #[async_trait]
    impl Projection for CountingProjection {
        fn name(&self) -> &'static str {
            "CountingProjection"
        }

        async fn handle(&self, _envelope: &EventEnvelope) -> Result<()> {
            *self.count.write().await += 1;
            Ok(())
        }

        async fn reset(&self) -> Result<()> {
            *self.count.write().await = 0;
            Ok(())
        }
    }

    fn test_envelope() -> EventEnvelope {
        EventEnvelope::builder()
            .event_type("TestEvent")
            .outcome(OutcomeKey::new())
            .owner(OwnerKey::new())
            .version(Version::first())
            .payload_raw(serde_json::json!({"test": true}))
            .build()
    }

    #[tokio::test]
    async fn process_single_event_reaches_all_projections() {
        let proj1 = CountingProjection::new();
        let proj2 = CountingProjection::new();
        let count1 = Arc::clone(&proj1.count);
        let count2 = Arc::clone(&proj2.count);

        let mut processor = ProjectionProcessor::new();
        processor.register(Box::new(proj1));
        processor.register(Box::new(proj2));
        assert_eq!(processor.projection_count(), 2);

        processor.process_event(&test_envelope()).await.unwrap();

        assert_eq!(*count1.read().await, 1);
        assert_eq!(*count2.read().await, 1);
    }

    #[tokio::test]
    async fn replay_resets_then_redelivers() {
        let projection = CountingProjection::new();
        let count = Arc::clone(&projection.count);

        let mut processor = ProjectionProcessor::new();
        processor.register(Box::new(projection));

        let envelopes = vec![test_envelope(), test_envelope(), test_envelope()];

        // Deliver once, then replay; counts must not accumulate.
        for envelope in &envelopes {
            processor.process_event(envelope).await.unwrap();
        }
        assert_eq!(*count.read().await, 3);

        processor.replay(&envelopes).await.unwrap();
        assert_eq!(*count.read().await, 3);
    }

    #[tokio::test]
    async fn replay_of_empty_sequence_only_resets() {
        let projection = CountingProjection::new();
        let count = Arc::clone(&projection.count);

        let mut processor = ProjectionProcessor::new();
        processor.register(Box::new(projection));

        processor.process_event(&test_envelope()).await.unwrap();
        processor.replay(&[]).await.unwrap();
        assert_eq!(*count.read().await, 0);
    }
}
