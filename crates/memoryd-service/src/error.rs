// Error-kind -> HTTP mapping (§7). Every handler returns `ApiResult<T>`;
// `IntoResponse` is the single place that decides status codes and body
// shape, grounded in the teacher's `(StatusCode, headers, body).into_response()`
// style (sven-gateway's `http/auth.rs`).
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use memoryd_model::ValidationError;
use serde::Serialize;
use thiserror::Error;

use memoryd_acb::AcbError;
use memoryd_capsules::CapsuleError;
use memoryd_graph::GraphError;
use memoryd_ingest::IngestError;
use memoryd_overlay::OverlayError;
use memoryd_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation error")]
    Validation(ValidationError),

    #[error("authorization error")]
    Authorization,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Validation(e) => ApiError::Validation(e),
            IngestError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl From<OverlayError> for ApiError {
    fn from(err: OverlayError) -> Self {
        match err {
            OverlayError::Store(e) => ApiError::Storage(e),
            OverlayError::NotFound(target) => ApiError::NotFound(target),
        }
    }
}

impl From<CapsuleError> for ApiError {
    fn from(err: CapsuleError) -> Self {
        match err {
            CapsuleError::Store(e) => ApiError::Storage(e),
            CapsuleError::Overlay(e) => e.into(),
            CapsuleError::Validation(msg) => ApiError::Validation(ValidationError::single("input", msg)),
            CapsuleError::NotFound => ApiError::NotFound("capsule".to_string()),
        }
    }
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Store(e) => ApiError::Storage(e),
            GraphError::Conflict(msg) => ApiError::Conflict(msg),
        }
    }
}

impl From<AcbError> for ApiError {
    fn from(err: AcbError) -> Self {
        match err {
            AcbError::Store(e) => ApiError::Storage(e),
            AcbError::Overlay(e) => e.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct FieldErrorBody {
    field: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldErrorBody>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conflicting_attribute: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errs) => {
                let body = ErrorBody {
                    error: "validation_error".to_string(),
                    fields: Some(
                        errs.0
                            .into_iter()
                            .map(|f| FieldErrorBody { field: f.field, message: f.message })
                            .collect(),
                    ),
                    conflicting_attribute: None,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Authorization => {
                let body = ErrorBody {
                    error: "authorization_error".to_string(),
                    fields: None,
                    conflicting_attribute: None,
                };
                (StatusCode::FORBIDDEN, Json(body)).into_response()
            }
            ApiError::Conflict(attr) => {
                let body = ErrorBody {
                    error: "conflict".to_string(),
                    fields: None,
                    conflicting_attribute: Some(attr),
                };
                (StatusCode::CONFLICT, Json(body)).into_response()
            }
            ApiError::RateLimited { retry_after_secs } => {
                let body = ErrorBody {
                    error: "rate_limited".to_string(),
                    fields: None,
                    conflicting_attribute: None,
                };
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after_secs.to_string())],
                    Json(body),
                )
                    .into_response()
            }
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                let body = ErrorBody {
                    error: "storage_error".to_string(),
                    fields: None,
                    conflicting_attribute: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            ApiError::NotFound(target) => {
                let body = ErrorBody {
                    error: "not_found".to_string(),
                    fields: None,
                    conflicting_attribute: Some(target),
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                let body = ErrorBody {
                    error: "internal_error".to_string(),
                    fields: None,
                    conflicting_attribute: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
