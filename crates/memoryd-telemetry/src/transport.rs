// The remote endpoint a flush sends a batch to, if one is configured (§4.I).
// Kept as a trait so tests and environments without a configured endpoint
// can run the sink with none at all.
use async_trait::async_trait;

use crate::error::TelemetryError;
use crate::event::TelemetryEvent;

#[async_trait]
pub trait TelemetryTransport: Send + Sync {
    /// Send a batch. Must be safe to call again with the same batch after a
    /// failure — the sink requeues on error and will retry the same events.
    async fn send(&self, events: &[TelemetryEvent]) -> Result<(), TelemetryError>;
}
