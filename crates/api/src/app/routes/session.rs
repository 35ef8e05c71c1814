//! Session lifecycle endpoints: sign-in, sign-out, refresh, login page.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use assetdesk_auth::{SessionToken, safe_resume_target};
use assetdesk_session::{Credentials, ExchangeError, ExchangeGrant, SessionError};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::cookie;

/// Exchange credentials for a session and set the session cookie.
///
/// The response body is a grant in the provider's wire shape, extended with
/// the safe resume target, so both browsers and exchange clients can consume
/// it.
pub async fn sign_in(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<dto::LoginRequest>,
) -> Response {
    let credentials = Credentials::new(req.user_name, req.password);

    let grant = match bounded(&services, services.exchange.authenticate(&credentials)).await {
        Ok(grant) => grant,
        Err(err) => {
            tracing::warn!(error = %err, "sign-in rejected");
            return errors::session_error_to_response(err);
        }
    };

    let resume_to = safe_resume_target(&services.table, req.resume_to.as_deref()).to_string();
    tracing::info!(
        user = %grant.identity.display_name,
        role = %grant.identity.role,
        "sign-in"
    );

    let cookie = cookie::set_session(grant.token.as_str(), services.cookie_secure);
    (
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(dto::SignInResponse {
            token: grant.token,
            identity: grant.identity,
            expires_at: grant.expires_at,
            resume_to,
        }),
    )
        .into_response()
}

/// Clear the session cookie. Always succeeds, signed in or not.
pub async fn sign_out(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    tracing::info!("signed out");
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(
            header::SET_COOKIE,
            cookie::clear_session(services.cookie_secure),
        )]),
    )
}

/// Swap the presented token for a fresh one.
///
/// The token comes from the request body or, for browser callers, from the
/// session cookie. Any failure applies sign-out semantics: the cookie is
/// cleared and the caller must authenticate again.
pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    body: Option<Json<dto::RefreshRequest>>,
) -> Response {
    let presented = body
        .and_then(|Json(req)| req.token)
        .or_else(|| cookie::session_token(&headers));
    let Some(presented) = presented else {
        return errors::session_error_to_response(SessionError::Expired);
    };

    match bounded(&services, services.exchange.refresh(&SessionToken::new(presented))).await {
        Ok(grant) => {
            tracing::info!(user = %grant.identity.display_name, "session refreshed");
            let cookie = cookie::set_session(grant.token.as_str(), services.cookie_secure);
            (
                StatusCode::OK,
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                Json(grant),
            )
                .into_response()
        }
        Err(err) => {
            // A rejected token means the session is simply over.
            let reason = match err {
                SessionError::InvalidCredentials => SessionError::Expired,
                other => other,
            };
            tracing::warn!(error = %reason, "refresh rejected");

            let mut res = errors::session_error_to_response(reason);
            if let Ok(clear) =
                HeaderValue::from_str(&cookie::clear_session(services.cookie_secure))
            {
                res.headers_mut().append(header::SET_COOKIE, clear);
            }
            res
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub from: Option<String>,
}

/// The login page. Echoes the sanitized resume target so the form can carry
/// it through the credential exchange.
pub async fn login_page(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<LoginPageQuery>,
) -> impl IntoResponse {
    Json(json!({
        "page": "login",
        "resumeTo": safe_resume_target(&services.table, query.from.as_deref()),
    }))
}

async fn bounded<F>(services: &AppServices, exchange: F) -> Result<ExchangeGrant, SessionError>
where
    F: Future<Output = Result<ExchangeGrant, ExchangeError>>,
{
    match tokio::time::timeout(services.exchange_timeout, exchange).await {
        Ok(Ok(grant)) => Ok(grant),
        Ok(Err(err)) => Err(err.into()),
        Err(_elapsed) => Err(SessionError::NetworkFailure(
            "credential exchange timed out".into(),
        )),
    }
}
