use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("store error: {0}")]
    Store(#[from] memoryd_store::StoreError),

    #[error("conflict: {0}")]
    Conflict(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
