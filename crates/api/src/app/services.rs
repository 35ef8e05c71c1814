//! Outbound wiring and request-handling settings shared by all handlers.

use std::sync::Arc;
use std::time::Duration;

use assetdesk_auth::RouteTable;
use assetdesk_session::{CredentialExchange, HttpCredentialExchange};

use crate::config::ApiConfig;

pub struct AppServices {
    /// Client for the identity provider's credential exchange.
    pub exchange: Arc<dyn CredentialExchange>,

    /// Route classification shared with the gate middleware.
    pub table: Arc<RouteTable>,

    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,

    /// Ceiling on a single exchange with the provider.
    pub exchange_timeout: Duration,
}

pub fn build_services(config: &ApiConfig) -> AppServices {
    AppServices {
        exchange: Arc::new(HttpCredentialExchange::new(config.idp_base_url.clone())),
        table: Arc::new(config.route_table.clone()),
        cookie_secure: config.cookie_secure,
        exchange_timeout: config.exchange_timeout,
    }
}
