//! Service configuration read from the environment.

use std::time::Duration;

use anyhow::Context;

use assetdesk_auth::RouteTable;

/// Everything the edge needs to run.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Shared secret for verifying session tokens minted by the identity
    /// provider.
    pub jwt_secret: String,

    /// Base URL of the identity provider the edge exchanges credentials with.
    pub idp_base_url: String,

    /// Route classification used by the gate.
    pub route_table: RouteTable,

    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,

    /// Ceiling on a single credential exchange with the provider.
    pub exchange_timeout: Duration,
}

impl ApiConfig {
    /// Read configuration from the environment.
    ///
    /// Missing values fall back to development defaults (with a warning
    /// where the default is insecure); malformed values are an error.
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let idp_base_url = std::env::var("IDP_BASE_URL").unwrap_or_else(|_| {
            tracing::warn!("IDP_BASE_URL not set; using http://127.0.0.1:8081");
            "http://127.0.0.1:8081".to_string()
        });

        let public = std::env::var("PUBLIC_PATHS")
            .unwrap_or_else(|_| "/login,/register,/health".to_string());
        let public: Vec<String> = public
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let login_path = std::env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string());
        let default_landing =
            std::env::var("DEFAULT_LANDING").unwrap_or_else(|_| "/dashboard".to_string());
        let route_table = RouteTable::new(public, login_path, default_landing)
            .context("invalid route configuration (PUBLIC_PATHS/LOGIN_PATH/DEFAULT_LANDING)")?;

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        let exchange_timeout = match std::env::var("EXCHANGE_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .context("EXCHANGE_TIMEOUT_SECS must be an integer")?,
            ),
            Err(_) => Duration::from_secs(10),
        };

        Ok(Self {
            jwt_secret,
            idp_base_url,
            route_table,
            cookie_secure,
            exchange_timeout,
        })
    }
}
