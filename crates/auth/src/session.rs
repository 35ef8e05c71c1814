use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::Identity;

/// Opaque credential string carried by a session.
///
/// Clients never look inside the token; only the edge verifies it. The
/// `Debug` impl redacts the credential so it cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("SessionToken").field(&"<redacted>").finish()
    }
}

/// An authenticated session: credential plus identity claims.
///
/// A session is either entirely absent (`Option::None` wherever one may be
/// missing) or fully populated; partially populated sessions are
/// unrepresentable. The identity never changes across the session's
/// lifetime — a silent refresh swaps the token and time window only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// True once `expires_at` is at or before `now`. Sessions without an
    /// expiry never expire on their own.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }

    /// True when the session is within `leeway` of expiring (or already past).
    pub fn needs_refresh(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        match self.expires_at {
            Some(expires_at) => now + leeway >= expires_at,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identity, Role};
    use assetdesk_core::UserId;

    fn session(expires_at: Option<DateTime<Utc>>) -> Session {
        let now = Utc::now();
        Session {
            token: SessionToken::new("tok-1"),
            identity: Identity::new(UserId::new(), "Pat Admin", Role::new("admin")),
            issued_at: now - Duration::minutes(5),
            expires_at,
        }
    }

    #[test]
    fn session_without_expiry_never_expires() {
        let s = session(None);
        assert!(!s.is_expired(Utc::now() + Duration::days(365)));
        assert!(!s.needs_refresh(Utc::now(), Duration::minutes(5)));
    }

    #[test]
    fn session_expires_at_the_boundary() {
        let expires_at = Utc::now();
        let s = session(Some(expires_at));
        assert!(s.is_expired(expires_at));
        assert!(s.is_expired(expires_at + Duration::seconds(1)));
        assert!(!s.is_expired(expires_at - Duration::seconds(1)));
    }

    #[test]
    fn refresh_window_opens_before_expiry() {
        let now = Utc::now();
        let s = session(Some(now + Duration::minutes(3)));
        assert!(s.needs_refresh(now, Duration::minutes(5)));
        assert!(!s.needs_refresh(now, Duration::minutes(1)));
    }

    #[test]
    fn debug_output_redacts_the_credential() {
        let token = SessionToken::new("super-secret-token");
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("redacted"));
    }
}
