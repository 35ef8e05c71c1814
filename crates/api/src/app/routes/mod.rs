use axum::{
    Router,
    routing::{get, post},
};

pub mod admin;
pub mod common;
pub mod session;
pub mod shell;
pub mod system;

/// Browser-facing pages; every route here goes through the route gate.
pub fn page_router() -> Router {
    Router::new()
        .route("/login", get(session::login_page))
        .route("/register", get(shell::register_page))
        .route("/dashboard", get(shell::dashboard))
        .route("/assets", get(shell::assets))
        .route("/admin/routes", get(admin::route_table))
        .route("/admin/access", get(admin::explain_access))
}

/// Session lifecycle endpoints.
///
/// Open by construction (they carry their own credentials) and speaking the
/// same wire contract as the identity provider, so a UI shell's exchange
/// client can point at either.
pub fn session_router() -> Router {
    Router::new()
        .route("/session/login", post(session::sign_in))
        .route("/session/logout", post(session::sign_out))
        .route("/session/refresh", post(session::refresh))
}

/// JSON endpoints that require an established session.
pub fn api_router() -> Router {
    Router::new()
        .route("/session/whoami", get(shell::whoami))
        .route("/nav", get(shell::nav))
}
