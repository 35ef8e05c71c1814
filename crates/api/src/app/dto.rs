use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use assetdesk_auth::{Identity, SessionToken};

/// Sign-in request body.
///
/// `resume_to` is the protected path the caller was originally headed for,
/// if any. Debug is hand-written so the password can never land in a log
/// line.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
    pub resume_to: Option<String>,
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("resume_to", &self.resume_to)
            .finish()
    }
}

/// Sign-in response: the grant plus where the caller should navigate next.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: SessionToken,
    pub identity: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub resume_to: String,
}

/// Refresh request body; the token may come from the session cookie instead.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub token: Option<String>,
}
