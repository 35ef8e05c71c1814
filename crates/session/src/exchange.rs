use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use assetdesk_auth::{Identity, SessionToken};

/// Sign-in input.
///
/// Debug is hand-written so the password can never land in a log line.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A successful exchange: the raw credential plus the identity it grants.
///
/// This is also the wire shape of the provider's response (camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeGrant {
    pub token: SessionToken,
    pub identity: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Failure kinds surfaced by a credential exchange.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The provider rejected the credentials (or, on refresh, the token).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The provider could not be reached or did not answer in time.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The provider failed internally or answered with something unusable.
    #[error("server error: {0}")]
    ServerError(String),
}

/// Credential exchange with the identity provider.
///
/// Implementations own transport and serialization; the lifecycle controller
/// only sees grants and the error taxonomy. `refresh` takes the current raw
/// token and returns a fresh grant for the same subject.
#[async_trait]
pub trait CredentialExchange: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<ExchangeGrant, ExchangeError>;

    async fn refresh(&self, token: &SessionToken) -> Result<ExchangeGrant, ExchangeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_the_password() {
        let creds = Credentials::new("alice", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn grant_wire_shape_is_camel_case() {
        let json = serde_json::json!({
            "token": "tok-1",
            "identity": {
                "id": "018f2a3b-5c6d-7e8f-9a0b-1c2d3e4f5a6b",
                "displayName": "Alice Admin",
                "role": "admin"
            },
            "expiresAt": "2031-01-01T00:00:00Z"
        });
        let grant: ExchangeGrant = serde_json::from_value(json).unwrap();
        assert_eq!(grant.identity.display_name, "Alice Admin");
        assert!(grant.expires_at.is_some());
    }

    #[test]
    fn grant_expiry_is_optional_on_the_wire() {
        let json = serde_json::json!({
            "token": "tok-1",
            "identity": {
                "id": "018f2a3b-5c6d-7e8f-9a0b-1c2d3e4f5a6b",
                "displayName": "Alice Admin",
                "role": "admin"
            }
        });
        let grant: ExchangeGrant = serde_json::from_value(json).unwrap();
        assert_eq!(grant.expires_at, None);
    }
}
