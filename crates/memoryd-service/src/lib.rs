// SPDX-License-Identifier: Apache-2.0
//! HTTP wire surface (§6). Builds the axum `Router` every endpoint listed
//! in §6 hangs off, threading the shared [`AppState`] (pool, telemetry
//! sink, error-rate tracker, per-key rate limiters) through every handler.
//! Auth is a passthrough (`auth.rs`): this crate trusts the tenant/agent
//! identity an upstream layer has already resolved from the bearer token
//! or API key (§6 "Auth (collaborator)").
pub mod auth;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Assemble the full router (§6 wire surface). A request-id is stamped on
/// every request and propagated to the response, matching the teacher's
/// `sven-gateway` observability headers; CORS and request tracing are
/// applied at the outermost layer so every route gets them uniformly.
pub fn router(state: AppState) -> Router {
    let header_name = axum::http::HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/events", post(routes::events::create_event))
        .route("/acb/build", post(routes::acb::build_acb))
        .route(
            "/capsules",
            post(routes::capsules::create_capsule).get(routes::capsules::list_capsules),
        )
        .route(
            "/capsules/:id",
            get(routes::capsules::get_capsule).delete(routes::capsules::revoke_capsule),
        )
        .route("/memory-edits", post(routes::edits::create_edit))
        .route(
            "/graph/edges",
            post(routes::graph::create_edge).get(routes::graph::get_edges),
        )
        .route(
            "/graph/edges/:edge_id",
            patch(routes::graph::update_edge_properties).delete(routes::graph::delete_edge),
        )
        .route("/graph/traverse", get(routes::graph::traverse))
        .route("/graph/project-tasks", get(routes::graph::get_project_tasks))
        .layer(PropagateRequestIdLayer::new(header_name.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(header_name, MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
