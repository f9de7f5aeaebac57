// SPDX-License-Identifier: Apache-2.0
//! Component I: buffered telemetry sink for mode/fallback/breach signals
//! (§4.I). `memoryd-acb` and `memoryd-mode` produce the signals;
//! this crate owns buffering, periodic/size-triggered flush, and the
//! optional remote transport.
mod error;
mod event;
mod scheduler;
mod sink;
mod transport;

pub use error::TelemetryError;
pub use event::{Correlation, TelemetryEvent};
pub use scheduler::run_periodic_flush;
pub use sink::{TelemetrySink, DEFAULT_BUFFER_CAPACITY, DEFAULT_FLUSH_INTERVAL_SECS};
pub use transport::TelemetryTransport;
