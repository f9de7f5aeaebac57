use thiserror::Error;

use memoryd_overlay::OverlayError;
use memoryd_store::StoreError;

#[derive(Debug, Error)]
pub enum AcbError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

pub type AcbResult<T> = Result<T, AcbError>;
