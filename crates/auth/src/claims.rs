use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use assetdesk_core::UserId;

use crate::{Identity, Role, Session, SessionToken};

/// Wire token claims (transport-agnostic).
///
/// This is the minimal set of claims the edge expects once a token has been
/// decoded/verified by whatever transport/security layer is in use.
/// Timestamps travel as unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Display name of the subject.
    pub name: String,

    /// Role granted to the subject.
    pub role: Role,

    /// Issued-at (unix seconds).
    pub iat: i64,

    /// Expiration (unix seconds); absent for non-expiring sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("token timestamps out of representable range")]
    MalformedTimestamp,
}

impl TokenClaims {
    /// Claims describing `identity` over the given time window.
    pub fn for_identity(
        identity: &Identity,
        issued_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            sub: identity.id,
            name: identity.display_name.clone(),
            role: identity.role.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.map(|t| t.timestamp()),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// The identity these claims describe.
    pub fn identity(&self) -> Identity {
        Identity::new(self.sub, self.name.clone(), self.role.clone())
    }

    /// Materialize a full session from these claims and the raw credential.
    pub fn into_session(self, token: SessionToken) -> Result<Session, TokenValidationError> {
        let issued_at = self
            .issued_at()
            .ok_or(TokenValidationError::MalformedTimestamp)?;
        let expires_at = match self.exp {
            Some(secs) => Some(
                DateTime::from_timestamp(secs, 0).ok_or(TokenValidationError::MalformedTimestamp)?,
            ),
            None => None,
        };
        Ok(Session {
            token,
            identity: self.identity(),
            issued_at,
            expires_at,
        })
    }
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// is intentionally outside this crate.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let issued_at = claims
        .issued_at()
        .ok_or(TokenValidationError::MalformedTimestamp)?;
    let expires_at = match claims.exp {
        Some(secs) => {
            Some(DateTime::from_timestamp(secs, 0).ok_or(TokenValidationError::MalformedTimestamp)?)
        }
        None => None,
    };

    if let Some(expires_at) = expires_at {
        if expires_at <= issued_at {
            return Err(TokenValidationError::InvalidTimeWindow);
        }
    }
    if now < issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if let Some(expires_at) = expires_at {
        if now >= expires_at {
            return Err(TokenValidationError::Expired);
        }
    }
    Ok(())
}
