//! Authenticated shell surfaces: pages, identity echo, and navigation.

use axum::{Json, extract::Extension, response::IntoResponse};
use serde_json::json;

use assetdesk_auth::is_authorized;

use crate::app::routes::common;
use crate::context::SessionContext;

pub async fn register_page() -> impl IntoResponse {
    Json(json!({ "page": "register" }))
}

pub async fn dashboard(Extension(ctx): Extension<SessionContext>) -> impl IntoResponse {
    Json(json!({
        "page": "dashboard",
        "welcome": ctx.display_name(),
        "role": ctx.role().as_str(),
    }))
}

pub async fn assets(Extension(ctx): Extension<SessionContext>) -> impl IntoResponse {
    Json(json!({
        "page": "assets",
        "viewer": ctx.display_name(),
    }))
}

/// Current identity as the session middleware sees it.
pub async fn whoami(Extension(ctx): Extension<SessionContext>) -> impl IntoResponse {
    let session = ctx.session();
    Json(json!({
        "id": session.identity.id.to_string(),
        "displayName": session.identity.display_name,
        "role": session.identity.role.as_str(),
        "issuedAt": session.issued_at,
        "expiresAt": session.expires_at,
    }))
}

/// The sections the caller's role may see.
pub async fn nav(Extension(ctx): Extension<SessionContext>) -> impl IntoResponse {
    let sections: Vec<_> = common::sections()
        .into_iter()
        .filter(|s| is_authorized(Some(ctx.session()), &s.required))
        .map(|s| json!({ "label": s.label, "path": s.path }))
        .collect();

    Json(json!({ "sections": sections }))
}
