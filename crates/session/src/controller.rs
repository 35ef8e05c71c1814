use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::time::timeout;

use assetdesk_auth::{Identity, Session};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::exchange::{CredentialExchange, Credentials, ExchangeError, ExchangeGrant};
use crate::store::{SessionReader, SessionStore};

/// Observable lifecycle state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// Outcome of a refresh attempt.
///
/// Refresh never errors across a rendering boundary; every case is a defined
/// terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The token was replaced in place; identity unchanged.
    Refreshed(Session),
    /// The provider rejected or could not complete the refresh; the session
    /// was cleared (sign-out semantics) and the actor must sign in again.
    SignedOut(SessionError),
    /// There was nothing to refresh.
    NoSession,
    /// Another transition is in flight; nothing was changed.
    InProgress,
}

/// Sole writer of session state.
///
/// Owns the store; every other component gets [`SessionReader`] views. One
/// lifecycle transition runs at a time: an overlapping `login`/`refresh` is
/// rejected and touches nothing. An abandoned in-flight transition releases
/// its slot on drop, so the controller can never sit in `Authenticating`
/// indefinitely. Every exchange is bounded by the configured timeout and a
/// hung provider resolves to `NetworkFailure`.
pub struct SessionController {
    store: SessionStore,
    exchange: Arc<dyn CredentialExchange>,
    config: SessionConfig,
    in_flight: Arc<AtomicBool>,
}

impl SessionController {
    pub fn new(exchange: Arc<dyn CredentialExchange>, config: SessionConfig) -> Self {
        Self {
            store: SessionStore::new(),
            exchange,
            config,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On success the store holds the new session before this returns. On
    /// failure the store is untouched and the error kind tells the user
    /// whether to correct input (`InvalidCredentials`), retry
    /// (`NetworkFailure`), or give up (`ServerError`).
    pub async fn login(&self, credentials: Credentials) -> Result<Session, SessionError> {
        let _guard =
            TransitionGuard::acquire(&self.in_flight).ok_or(SessionError::LoginInProgress)?;

        tracing::info!(user_name = %credentials.user_name, "sign-in started");
        let grant = match self.bounded(self.exchange.authenticate(&credentials)).await {
            Ok(grant) => grant,
            Err(err) => {
                tracing::warn!(error = %err, "sign-in failed");
                return Err(err);
            }
        };

        let session = session_from_grant(grant, None);
        self.store.set(Some(session.clone()));
        tracing::info!(
            user = %session.identity.display_name,
            role = %session.identity.role,
            "sign-in complete"
        );
        Ok(session)
    }

    /// Clear the session unconditionally. Never fails.
    ///
    /// The store notifies its subscribers even when there was no session to
    /// clear.
    pub fn logout(&self) {
        self.store.set(None);
        tracing::info!("signed out");
    }

    /// Swap the current token for a fresh one, keeping the identity.
    ///
    /// Any failure applies sign-out semantics: the session is treated as
    /// expired, the store is cleared, and the user must authenticate again.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(current) = self.store.get() else {
            return RefreshOutcome::NoSession;
        };

        let Some(_guard) = TransitionGuard::acquire(&self.in_flight) else {
            return RefreshOutcome::InProgress;
        };

        match self.bounded(self.exchange.refresh(&current.token)).await {
            Ok(grant) => {
                // The identity is pinned for the session's lifetime; only the
                // token and its time window move.
                let refreshed = session_from_grant(grant, Some(current.identity));
                self.store.set(Some(refreshed.clone()));
                tracing::info!(user = %refreshed.identity.display_name, "session refreshed");
                RefreshOutcome::Refreshed(refreshed)
            }
            Err(err) => {
                let reason = match err {
                    // A rejected token means the session is simply over.
                    SessionError::InvalidCredentials => SessionError::Expired,
                    other => other,
                };
                self.store.set(None);
                tracing::warn!(error = %reason, "refresh failed; signing out");
                RefreshOutcome::SignedOut(reason)
            }
        }
    }

    /// Read-only projection of the authenticated identity, if any.
    pub fn current_identity(&self) -> Option<Identity> {
        self.store.get().map(|s| s.identity)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.in_flight.load(Ordering::Acquire) {
            return Phase::Authenticating;
        }
        if self.store.get().is_some() {
            Phase::Authenticated
        } else {
            Phase::Unauthenticated
        }
    }

    /// True when the current session is inside the configured refresh window.
    pub fn needs_refresh(&self) -> bool {
        self.store
            .get()
            .is_some_and(|s| s.needs_refresh(Utc::now(), self.config.refresh_leeway))
    }

    /// Read-only view of the session store.
    pub fn reader(&self) -> SessionReader {
        self.store.reader()
    }

    async fn bounded<F>(&self, exchange: F) -> Result<ExchangeGrant, SessionError>
    where
        F: Future<Output = Result<ExchangeGrant, ExchangeError>>,
    {
        match timeout(self.config.exchange_timeout, exchange).await {
            Ok(Ok(grant)) => Ok(grant),
            Ok(Err(err)) => Err(err.into()),
            Err(_elapsed) => Err(SessionError::NetworkFailure(
                "credential exchange timed out".into(),
            )),
        }
    }
}

fn session_from_grant(grant: ExchangeGrant, pinned_identity: Option<Identity>) -> Session {
    Session {
        token: grant.token,
        identity: pinned_identity.unwrap_or(grant.identity),
        issued_at: Utc::now(),
        expires_at: grant.expires_at,
    }
}

/// Holds the single transition slot; released on drop so an abandoned
/// future cannot wedge the controller in `Authenticating`.
struct TransitionGuard {
    flag: Arc<AtomicBool>,
}

impl TransitionGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for TransitionGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
