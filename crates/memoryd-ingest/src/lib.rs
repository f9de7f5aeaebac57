// SPDX-License-Identifier: Apache-2.0
//! Component D: ingestion (§4.D). `record_event` is the single entry point
//! `memoryd-service`'s `POST /events` handler calls.
mod error;
mod offload;
mod privacy;
mod record;

pub use error::{IngestError, IngestResult};
pub use offload::offload_if_oversize;
pub use privacy::apply_privacy_coercion;
pub use record::{record_event, RecordEventResult};
