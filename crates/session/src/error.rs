use thiserror::Error;

use crate::exchange::ExchangeError;

/// Session lifecycle failure taxonomy.
///
/// `InvalidCredentials` is user-correctable and shown inline.
/// `NetworkFailure` is transient and may be retried by the user; it is never
/// retried automatically. `ServerError` is an opaque provider failure.
/// `Expired` downgrades silently to the unauthenticated state. A rejected
/// overlapping transition surfaces as `LoginInProgress` and changes nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("server error: {0}")]
    ServerError(String),

    #[error("session expired")]
    Expired,

    #[error("a sign-in is already in progress")]
    LoginInProgress,
}

impl From<ExchangeError> for SessionError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::InvalidCredentials => Self::InvalidCredentials,
            ExchangeError::NetworkFailure(msg) => Self::NetworkFailure(msg),
            ExchangeError::ServerError(msg) => Self::ServerError(msg),
        }
    }
}
