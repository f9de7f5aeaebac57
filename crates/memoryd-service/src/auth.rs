// Auth passthrough (§6: "the transport layer resolves [the bearer token or
// API key] to tenant_id ... the core never issues credentials; it trusts
// the resolved identity"). This crate sits on the trusted side of that
// boundary: it reads the identity an upstream layer has already resolved
// rather than verifying bearer tokens itself (that verification, grounded
// in the teacher's `sven-gateway` `http/auth.rs`, is out of this crate's
// scope per §6).
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

const TENANT_HEADER: &str = "x-tenant-id";
const AGENT_HEADER: &str = "x-agent-id";

/// The tenant identity resolved upstream, extracted from a request header.
pub struct TenantId(pub String);

/// The agent identity resolved upstream, if the caller supplied one.
/// Several endpoints (capsule list/get, ACB build) key authorization
/// decisions off this rather than the tenant.
pub struct AgentId(pub Option<String>);

pub struct MissingIdentity;

impl IntoResponse for MissingIdentity {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, "missing resolved tenant identity").into_response()
    }
}

impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = MissingIdentity;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| TenantId(v.to_string()))
            .ok_or(MissingIdentity)
    }
}

impl<S> FromRequestParts<S> for AgentId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let agent_id = parts
            .headers
            .get(AGENT_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Ok(AgentId(agent_id))
    }
}
