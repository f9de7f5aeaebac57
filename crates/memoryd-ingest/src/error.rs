use memoryd_model::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("validation error: {0:?}")]
    Validation(ValidationError),

    #[error("storage error: {0}")]
    Storage(#[from] memoryd_store::StoreError),
}

impl From<ValidationError> for IngestError {
    fn from(err: ValidationError) -> Self {
        IngestError::Validation(err)
    }
}

pub type IngestResult<T> = Result<T, IngestError>;
