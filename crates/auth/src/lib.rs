//! `assetdesk-auth` — pure authentication/authorization boundary (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod access;
pub mod claims;
pub mod gate;
pub mod identity;
pub mod roles;
pub mod session;

pub use access::{AccessRequest, is_authorized};
pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use gate::{GateDecision, RouteTable, decide, safe_resume_target};
pub use identity::Identity;
pub use roles::Role;
pub use session::{Session, SessionToken};
