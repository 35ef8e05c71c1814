//! `assetdesk-session` — client-side session container and lifecycle.
//!
//! Holds the single writable session behind a read-only fan-out and drives
//! login/logout/refresh against a pluggable credential exchange.

pub mod config;
pub mod controller;
pub mod error;
pub mod exchange;
pub mod http_exchange;
pub mod store;

pub use config::SessionConfig;
pub use controller::{Phase, RefreshOutcome, SessionController};
pub use error::SessionError;
pub use exchange::{CredentialExchange, Credentials, ExchangeError, ExchangeGrant};
pub use http_exchange::HttpCredentialExchange;
pub use store::{SessionChange, SessionReader, SessionStore};
