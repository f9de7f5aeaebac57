use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry transport failed: {0}")]
    Transport(String),
}
