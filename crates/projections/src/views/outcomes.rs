//! The outcome projector — sole writer of the read-model store.

use async_trait::async_trait;
use common::{OutcomeKey, OwnerKey};
use domain::{DomainEvent, EventEnvelope, OutcomeEvent};

use crate::Result;
use crate::projection::Projection;
use crate::record;
use crate::store::OutcomeStore;

/// Applies outcome lifecycle events to an [`OutcomeStore`].
///
/// Mutations referencing a record that was never created, or already
/// deleted, are silent no-ops; replays leave the store unchanged. That is
/// what the at-least-once pipeline requires.
///
/// Creation is two separate idempotent steps: insert the bare record,
/// then link its creation category. If the second step is lost, the
/// record legitimately exists without the category until the pipeline
/// resends the link.
pub struct OutcomesView<S> {
    store: S,
}

impl<S: OutcomeStore> OutcomesView<S> {
    /// Creates a projector writing to the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Folds one event onto the stored record, if there is one.
    async fn apply_to_existing(
        &self,
        owner: OwnerKey,
        key: OutcomeKey,
        event: &OutcomeEvent,
    ) -> Result<()> {
        let Some(current) = self.store.get(owner, key).await? else {
            tracing::debug!(%key, event_type = event.event_type(), "no record, skipping");
            return Ok(());
        };

        match record::apply(key, owner, Some(current), event) {
            Some(next) => {
                self.store.replace(next).await?;
            }
            None => {
                self.store.remove(owner, key).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<S: OutcomeStore> Projection for OutcomesView<S> {
    fn name(&self) -> &'static str {
        "OutcomesView"
    }

    async fn handle(&self, envelope: &EventEnvelope) -> Result<()> {
        let event: OutcomeEvent = serde_json::from_value(envelope.payload.clone())?;
        let key = envelope.outcome;
        let owner = envelope.owner;

        match &event {
            OutcomeEvent::OutcomeCreated(data) => {
                let Some(bare) = record::apply(key, owner, None, &event) else {
                    return Ok(());
                };
                // Step one: the record, with no categories yet.
                if self.store.insert(bare).await? {
                    // Step two: link the creation category.
                    let link = OutcomeEvent::category_added(data.category_key);
                    self.apply_to_existing(owner, key, &link).await?;
                }
            }
            other => self.apply_to_existing(owner, key, other).await?,
        }

        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        self.store.clear().await
    }
}
