use thiserror::Error;

/// Failures `memoryd-capsules` surfaces beyond plain `StoreError` passthrough
/// (§7: capsule authorization/validation/not-found kinds).
#[derive(Debug, Error)]
pub enum CapsuleError {
    #[error("store error: {0}")]
    Store(#[from] memoryd_store::StoreError),

    #[error("overlay error: {0}")]
    Overlay(#[from] memoryd_overlay::OverlayError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("capsule not found or not visible")]
    NotFound,
}

pub type CapsuleResult<T> = Result<T, CapsuleError>;
