// Buffered telemetry sink (§4.I): `mode_detected`, `fallback_triggered`, and
// `invariant_breach` signals are recorded in memory and drained either
// periodically (every 30s) or as soon as the buffer fills (100 events).
// Grounded in the `Arc<tokio::sync::Mutex<..>>` shared-state pattern
// `sven-gateway`'s connection registry uses for similar in-process state
// shared between a request handler and a background task.
use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::error::TelemetryError;
use crate::event::TelemetryEvent;
use crate::transport::TelemetryTransport;

pub const DEFAULT_BUFFER_CAPACITY: usize = 100;
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 30;

/// In-memory buffer plus an optional remote transport. Cheap to clone —
/// the buffer, transport, and sampling accumulator are all held behind
/// `Arc`.
#[derive(Clone)]
pub struct TelemetrySink {
    buffer: Arc<Mutex<VecDeque<TelemetryEvent>>>,
    transport: Option<Arc<dyn TelemetryTransport>>,
    capacity: usize,
    sample_rate: f32,
    sample_accumulator: Arc<Mutex<f32>>,
}

impl TelemetrySink {
    pub fn new(transport: Option<Arc<dyn TelemetryTransport>>) -> Self {
        Self::with_capacity(transport, DEFAULT_BUFFER_CAPACITY)
    }

    pub fn with_capacity(transport: Option<Arc<dyn TelemetryTransport>>, capacity: usize) -> Self {
        Self::with_sample_rate(transport, capacity, 1.0)
    }

    /// `sample_rate` (§6 "telemetry endpoint and sample rate", 0.0-1.0)
    /// governs what fraction of recorded events are buffered/sent. Applied
    /// deterministically via a fractional accumulator rather than a random
    /// draw, so the kept fraction converges to `sample_rate` without a
    /// dependency on an RNG.
    pub fn with_sample_rate(
        transport: Option<Arc<dyn TelemetryTransport>>,
        capacity: usize,
        sample_rate: f32,
    ) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            transport,
            capacity,
            sample_rate: sample_rate.clamp(0.0, 1.0),
            sample_accumulator: Arc::new(Mutex::new(0.0)),
        }
    }

    /// Record one event. Breach events are logged immediately at a severity
    /// derived from `InvariantType::breach_severity()`, independent of both
    /// sampling and when the buffer next flushes — an operator watching
    /// logs should never miss a breach because of the sample rate.
    /// Sampled-out events are otherwise dropped before entering the
    /// buffer. Triggers an immediate flush if the buffer has reached
    /// `capacity`.
    pub async fn record(&self, event: TelemetryEvent) {
        if let TelemetryEvent::InvariantBreach {
            severity, reason, ..
        } = &event
        {
            log_breach(severity, reason);
        }
        if !self.should_keep().await {
            return;
        }
        let should_flush = {
            let mut guard = self.buffer.lock().await;
            guard.push_back(event);
            guard.len() >= self.capacity
        };
        if should_flush {
            self.flush().await;
        }
    }

    async fn should_keep(&self) -> bool {
        if self.sample_rate >= 1.0 {
            return true;
        }
        if self.sample_rate <= 0.0 {
            return false;
        }
        let mut acc = self.sample_accumulator.lock().await;
        *acc += self.sample_rate;
        if *acc >= 1.0 {
            *acc -= 1.0;
            true
        } else {
            false
        }
    }

    /// Drain the whole buffer. With no transport configured, draining is
    /// itself the sink — events are dropped after having already been
    /// logged (breaches) or simply buffered for inspection in tests.
    /// With a transport, send is attempted and, on failure, the batch is
    /// requeued at the head of the buffer for the next flush to retry.
    pub async fn flush(&self) {
        let batch: Vec<TelemetryEvent> = {
            let mut guard = self.buffer.lock().await;
            guard.drain(..).collect()
        };
        if batch.is_empty() {
            return;
        }
        let Some(transport) = &self.transport else {
            debug!(count = batch.len(), "telemetry batch drained with no remote transport configured");
            return;
        };
        if let Err(err) = transport.send(&batch).await {
            warn!(error = %err, count = batch.len(), "telemetry flush failed, requeuing batch");
            self.requeue(batch).await;
        } else {
            debug!(count = batch.len(), "telemetry batch flushed");
        }
    }

    async fn requeue(&self, batch: Vec<TelemetryEvent>) {
        let mut guard = self.buffer.lock().await;
        for event in batch.into_iter().rev() {
            guard.push_front(event);
        }
    }

    /// Current buffered count, for tests and readiness reporting.
    pub async fn len(&self) -> usize {
        self.buffer.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn log_breach(severity: &str, reason: &str) {
    match severity {
        "critical" => error!(reason, "invariant breach"),
        "high" => warn!(reason, "invariant breach"),
        _ => debug!(reason, "invariant breach"),
    }
}
