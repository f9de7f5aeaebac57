// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error(transparent)]
    Store(#[from] memoryd_store::StoreError),

    #[error("{0} not found")]
    NotFound(String),
}

pub type OverlayResult<T> = Result<T, OverlayError>;
