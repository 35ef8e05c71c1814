use serde::{Deserialize, Serialize};

use assetdesk_core::UserId;

use crate::Role;

/// Minimal identifying claims for an authenticated actor.
///
/// The role is fixed for the lifetime of the session carrying this identity;
/// a role change requires a fresh login. Serialized field names are camelCase
/// to match the credential-exchange wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub display_name: String,
    pub role: Role,
}

impl Identity {
    pub fn new(id: UserId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
        }
    }
}
