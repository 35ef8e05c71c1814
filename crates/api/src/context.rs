use assetdesk_auth::{Identity, Role, Session};

/// Session context for a request (authenticated identity + credential).
///
/// This is immutable and is injected by the gate/session middleware for
/// every route that requires authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn identity(&self) -> &Identity {
        &self.session.identity
    }

    pub fn role(&self) -> &Role {
        &self.session.identity.role
    }

    pub fn display_name(&self) -> &str {
        &self.session.identity.display_name
    }
}
