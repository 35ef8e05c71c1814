//! Admin endpoints for transparent access debugging.
//!
//! These provide visibility into the route classification and section
//! access rules to help answer "why was this request redirected/denied?".

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use assetdesk_auth::{Role, is_authorized};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::errors;
use crate::context::SessionContext;

/// GET /admin/routes - the gate's route classification.
pub async fn route_table(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> Response {
    if !is_authorized(Some(ctx.session()), &common::admin_only()) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "administration requires the admin role",
        );
    }

    Json(json!({
        "publicPrefixes": services.table.public_prefixes(),
        "loginPath": services.table.login_path(),
        "defaultLanding": services.table.default_landing(),
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct ExplainAccessQuery {
    pub section: String,
    /// Role to evaluate; defaults to the caller's own.
    pub role: Option<String>,
}

/// GET /admin/access?section=X&role=Y - explain a section access decision.
pub async fn explain_access(
    Extension(ctx): Extension<SessionContext>,
    Query(query): Query<ExplainAccessQuery>,
) -> Response {
    if !is_authorized(Some(ctx.session()), &common::admin_only()) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "administration requires the admin role",
        );
    }

    let Some(section) = common::section_named(&query.section) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "unknown section");
    };

    let role = query.role.map(Role::new).unwrap_or_else(|| ctx.role().clone());
    let accepted = section.required.is_empty() || section.required.accepts(&role);

    Json(json!({
        "section": section.label,
        "role": role.as_str(),
        "accepted": accepted,
        "anyAuthenticated": section.required.is_empty(),
        "acceptedRoles": section
            .required
            .roles()
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>(),
    }))
    .into_response()
}
