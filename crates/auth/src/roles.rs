use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role tag attached to an identity.
///
/// Roles are intentionally opaque strings at this layer (e.g. "admin",
/// "user"); which roles a given operation accepts is supplied by the caller
/// as an [`crate::AccessRequest`]. There is no hierarchy between roles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
