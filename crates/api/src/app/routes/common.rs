//! The shell's section model, shared by navigation and the admin surface.

use assetdesk_auth::{AccessRequest, Role};

/// A navigable section of the UI shell plus the roles it is limited to.
pub struct NavSection {
    pub label: &'static str,
    pub path: &'static str,
    pub required: AccessRequest,
}

/// All sections. Dashboard and assets render for any authenticated user;
/// administration is limited to the admin role.
pub fn sections() -> Vec<NavSection> {
    vec![
        NavSection {
            label: "Dashboard",
            path: "/dashboard",
            required: AccessRequest::any_authenticated(),
        },
        NavSection {
            label: "Assets",
            path: "/assets",
            required: AccessRequest::any_authenticated(),
        },
        NavSection {
            label: "Administration",
            path: "/admin/routes",
            required: AccessRequest::one_of([Role::new("admin")]),
        },
    ]
}

pub fn section_named(name: &str) -> Option<NavSection> {
    sections()
        .into_iter()
        .find(|s| s.label.eq_ignore_ascii_case(name))
}

/// Roles accepted for administrative surfaces.
pub fn admin_only() -> AccessRequest {
    AccessRequest::one_of([Role::new("admin")])
}
