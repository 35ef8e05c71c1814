use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};

use assetdesk_auth::{GateDecision, RouteTable, Session, decide};

use crate::app::errors;
use crate::context::SessionContext;
use crate::cookie;
use crate::token::Hs256TokenVerifier;

/// Shared state for the gate and session middlewares.
#[derive(Clone)]
pub struct GateState {
    pub verifier: Arc<Hs256TokenVerifier>,
    pub table: Arc<RouteTable>,
}

/// Session materialized from the request's cookie, when the token verifies.
///
/// A missing, tampered, or expired token is an absent session, never an
/// error.
pub fn session_from_request(
    headers: &HeaderMap,
    verifier: &Hs256TokenVerifier,
    now: DateTime<Utc>,
) -> Option<Session> {
    let token = cookie::session_token(headers)?;
    verifier.verify(&token, now)
}

/// Route gate for page navigation.
///
/// Applies the gate decision to the request path: allowed requests are
/// served, with the session (if any) injected for handlers; everything else
/// is answered with a temporary redirect.
pub async fn route_gate(
    State(state): State<GateState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let now = Utc::now();
    let session = session_from_request(req.headers(), &state.verifier, now);

    match decide(&state.table, req.uri().path(), session.as_ref(), now) {
        GateDecision::Redirect { location } => {
            tracing::debug!(path = %req.uri().path(), %location, "navigation redirected");
            Redirect::temporary(&location).into_response()
        }
        GateDecision::Allow => {
            if let Some(session) = session {
                req.extensions_mut().insert(SessionContext::new(session));
            }
            next.run(req).await
        }
    }
}

/// Session requirement for JSON endpoints; answers 401 instead of
/// redirecting.
pub async fn require_session(
    State(state): State<GateState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(session) = session_from_request(req.headers(), &state.verifier, Utc::now()) else {
        return Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "sign in to continue",
        ));
    };

    req.extensions_mut().insert(SessionContext::new(session));
    Ok(next.run(req).await)
}
