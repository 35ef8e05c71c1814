//! HTTP application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: outbound wiring (credential exchange toward the identity provider)
//! - `routes/`: HTTP routes + handlers (one file per surface)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::ApiConfig;
use crate::middleware::{self, GateState};
use crate::token::Hs256TokenVerifier;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: ApiConfig) -> Router {
    let verifier = Arc::new(Hs256TokenVerifier::new(config.jwt_secret.as_bytes()));
    let services = Arc::new(services::build_services(&config));
    let gate_state = GateState {
        verifier,
        table: Arc::clone(&services.table),
    };

    // Pages: navigation goes through the route gate.
    let pages = routes::page_router().layer(axum::middleware::from_fn_with_state(
        gate_state.clone(),
        middleware::route_gate,
    ));

    // Session lifecycle endpoints carry their own credentials.
    let session_api = routes::session_router();

    // Data endpoints: require an established session, answer 401 otherwise.
    let api = routes::api_router().layer(axum::middleware::from_fn_with_state(
        gate_state,
        middleware::require_session,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(pages)
        .merge(session_api)
        .merge(api)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
