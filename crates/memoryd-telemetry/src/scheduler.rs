// Periodic flush loop (§4.I: "every 30s"), cancellable on shutdown so the
// drain is bounded rather than abandoning buffered events mid-batch. Shape
// mirrors the teacher's `tokio::select!`-over-a-shutdown-signal pattern used
// for its own long-running background tasks.
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::interval;

use crate::sink::TelemetrySink;

/// Run `sink.flush()` on a fixed interval until `shutdown` fires, then flush
/// once more before returning so nothing buffered is lost on a clean exit.
pub async fn run_periodic_flush(
    sink: TelemetrySink,
    interval_duration: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(interval_duration);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                sink.flush().await;
            }
            _ = shutdown.changed() => {
                sink.flush().await;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Correlation, TelemetryEvent};
    use chrono::Utc;
    use memoryd_mode::Mode;

    #[tokio::test]
    async fn shutdown_signal_drains_before_returning() {
        let sink = TelemetrySink::new(None);
        sink.record(TelemetryEvent::ModeDetected {
            at: Utc::now(),
            correlation: Correlation::default(),
            mode: Mode::General,
            confidence: 0.6,
        })
        .await;
        let (tx, rx) = watch::channel(false);
        let sink_clone = sink.clone();
        let handle = tokio::spawn(run_periodic_flush(sink_clone, Duration::from_secs(3600), rx));
        tx.send(true).unwrap();
        handle.await.unwrap();
        assert_eq!(sink.len().await, 0);
    }
}
