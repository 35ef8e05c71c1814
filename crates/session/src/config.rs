use std::time::Duration;

/// Tunables for the session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Ceiling on a single credential exchange. A provider that hangs past
    /// this resolves to `NetworkFailure` instead of wedging the controller
    /// in the authenticating phase.
    pub exchange_timeout: Duration,

    /// How close to expiry a session counts as due for refresh.
    pub refresh_leeway: chrono::Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exchange_timeout: Duration::from_secs(10),
            refresh_leeway: chrono::Duration::seconds(30),
        }
    }
}
