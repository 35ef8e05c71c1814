use serde::{Deserialize, Serialize};

use crate::{Role, Session};

/// The set of roles an operation or route will accept.
///
/// Empty means "any authenticated identity suffices". Duplicates are
/// collapsed on construction; order is preserved for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessRequest {
    roles: Vec<Role>,
}

impl AccessRequest {
    /// Any authenticated identity passes.
    pub fn any_authenticated() -> Self {
        Self::default()
    }

    /// Accept exactly the given roles.
    pub fn one_of<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        let mut out: Vec<Role> = Vec::new();
        for role in roles {
            if !out.contains(&role) {
                out.push(role);
            }
        }
        Self { roles: out }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn accepts(&self, role: &Role) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Decide whether `session` may perform an operation restricted to `required`.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
///
/// Absent session: deny. Empty requirement: any authenticated identity
/// passes. Otherwise the session's role must be a member of `required` by
/// exact string match — no wildcard, no hierarchy. An unrecognized role is
/// authenticated-but-unprivileged: it passes the empty requirement and fails
/// every non-empty one.
pub fn is_authorized(session: Option<&Session>, required: &AccessRequest) -> bool {
    let Some(session) = session else {
        return false;
    };
    required.is_empty() || required.accepts(&session.identity.role)
}
