use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use assetdesk_session::SessionError;

/// Map a session-lifecycle failure onto the HTTP error envelope.
///
/// Rejected credentials and expired sessions are the caller's problem (401),
/// provider failures surface as 502, and a rejected overlapping transition
/// is a conflict.
pub fn session_error_to_response(err: SessionError) -> axum::response::Response {
    match err {
        SessionError::InvalidCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "user name or password is incorrect",
        ),
        SessionError::Expired => json_error(
            StatusCode::UNAUTHORIZED,
            "session_expired",
            "the session has expired; sign in again",
        ),
        SessionError::NetworkFailure(msg) => {
            json_error(StatusCode::BAD_GATEWAY, "upstream_unreachable", msg)
        }
        SessionError::ServerError(msg) => json_error(StatusCode::BAD_GATEWAY, "upstream_error", msg),
        SessionError::LoginInProgress => json_error(
            StatusCode::CONFLICT,
            "login_in_progress",
            "a sign-in is already in progress",
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
