use chrono::{DateTime, Utc};

use assetdesk_core::{DomainError, DomainResult};

use crate::Session;

/// Route classification table.
///
/// Declares which path prefixes are reachable without a session, where the
/// login surface lives, and where authenticated users land by default.
/// Everything not matching a public prefix is protected. The table is
/// configuration data; it carries no behavior beyond prefix matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    public: Vec<String>,
    login_path: String,
    default_landing: String,
}

impl RouteTable {
    /// Build a table from configured paths.
    ///
    /// Public prefixes are normalized (trailing slashes trimmed) and every
    /// path must be absolute and single-origin; a malformed entry is a
    /// configuration error, not something to guess around.
    pub fn new<I, S>(
        public: I,
        login_path: impl Into<String>,
        default_landing: impl Into<String>,
    ) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prefixes = Vec::new();
        for raw in public {
            let prefix = normalize_prefix(raw.as_ref())?;
            if !prefixes.contains(&prefix) {
                prefixes.push(prefix);
            }
        }

        let login_path = require_well_formed("login path", &login_path.into())?;
        let default_landing = require_well_formed("default landing", &default_landing.into())?;

        Ok(Self {
            public: prefixes,
            login_path,
            default_landing,
        })
    }

    /// The built-in classification: login, registration, and liveness are
    /// public; everything else is protected; authenticated users land on
    /// the dashboard.
    pub fn standard() -> Self {
        Self {
            public: vec!["/login".into(), "/register".into(), "/health".into()],
            login_path: "/login".into(),
            default_landing: "/dashboard".into(),
        }
    }

    pub fn public_prefixes(&self) -> &[String] {
        &self.public
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn default_landing(&self) -> &str {
        &self.default_landing
    }

    /// PUBLIC iff the path matches a configured prefix on a segment
    /// boundary: `/login` covers `/login` and `/login/reset`, never
    /// `/login-help`.
    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|prefix| matches_prefix(prefix, path))
    }
}

/// Outcome of a gate decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Serve the request unmodified.
    Allow,
    /// Send the client to `location` instead.
    Redirect { location: String },
}

impl GateDecision {
    fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            location: location.into(),
        }
    }
}

/// Decide whether a navigation may proceed.
///
/// Pure and total: identical `(path, session, now)` inputs always yield the
/// same decision, nothing is mutated, and no input can make it fail. A
/// session past its expiry counts as absent. A path that cannot be
/// classified is treated as protected with no session and redirected to the
/// bare login surface; the malformed bytes are never echoed back.
pub fn decide(
    table: &RouteTable,
    path: &str,
    session: Option<&Session>,
    now: DateTime<Utc>,
) -> GateDecision {
    let authenticated = session.is_some_and(|s| !s.is_expired(now));

    let Some(path) = well_formed_path(path) else {
        return GateDecision::redirect(table.login_path());
    };

    if table.is_public(path) {
        if authenticated {
            return GateDecision::redirect(table.default_landing());
        }
        return GateDecision::Allow;
    }

    if !authenticated {
        return GateDecision::redirect(format!("{}?from={}", table.login_path(), path));
    }

    GateDecision::Allow
}

/// Validate a post-login resume target supplied by the client.
///
/// Accepts only single-origin absolute paths, so a crafted `from` parameter
/// can never steer the login flow off-site; anything else falls back to the
/// default landing.
pub fn safe_resume_target<'a>(table: &'a RouteTable, candidate: Option<&'a str>) -> &'a str {
    match candidate.and_then(well_formed_path) {
        Some(path) => path,
        None => table.default_landing(),
    }
}

/// A usable request path: absolute, single-origin, free of query/fragment
/// metacharacters and control bytes.
fn well_formed_path(path: &str) -> Option<&str> {
    let absolute = path.starts_with('/') && !path.starts_with("//");
    let clean = !path.contains(['?', '#', '\\'])
        && !path.bytes().any(|b| b.is_ascii_control() || b == b' ');
    if absolute && clean { Some(path) } else { None }
}

fn matches_prefix(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn normalize_prefix(raw: &str) -> DomainResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("empty route prefix"));
    }
    let stripped = trimmed.trim_end_matches('/');
    let prefix = if stripped.is_empty() { "/" } else { stripped };
    require_well_formed("route prefix", prefix)
}

fn require_well_formed(what: &str, path: &str) -> DomainResult<String> {
    match well_formed_path(path) {
        Some(p) => Ok(p.to_string()),
        None => Err(DomainError::validation(format!("malformed {what}: {path:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identity, Role, SessionToken};
    use assetdesk_core::UserId;
    use chrono::Duration;
    use proptest::prelude::*;

    fn table() -> RouteTable {
        RouteTable::standard()
    }

    fn session() -> Session {
        Session {
            token: SessionToken::new("tok"),
            identity: Identity::new(UserId::new(), "Test Person", Role::new("user")),
            issued_at: Utc::now(),
            expires_at: None,
        }
    }

    fn expired_session() -> Session {
        let mut s = session();
        s.expires_at = Some(Utc::now() - Duration::minutes(1));
        s
    }

    #[test]
    fn protected_path_without_session_redirects_to_login_with_from() {
        let decision = decide(&table(), "/dashboard", None, Utc::now());
        assert_eq!(
            decision,
            GateDecision::Redirect {
                location: "/login?from=/dashboard".into()
            }
        );
    }

    #[test]
    fn public_login_with_session_redirects_to_landing() {
        let s = session();
        let decision = decide(&table(), "/login", Some(&s), Utc::now());
        assert_eq!(
            decision,
            GateDecision::Redirect {
                location: "/dashboard".into()
            }
        );
    }

    #[test]
    fn public_paths_allow_unauthenticated_visitors() {
        for path in ["/login", "/register", "/health"] {
            assert_eq!(decide(&table(), path, None, Utc::now()), GateDecision::Allow);
        }
    }

    #[test]
    fn protected_path_with_session_is_allowed() {
        let s = session();
        assert_eq!(
            decide(&table(), "/assets/123", Some(&s), Utc::now()),
            GateDecision::Allow
        );
    }

    #[test]
    fn expired_session_counts_as_absent_on_protected_paths() {
        let s = expired_session();
        let decision = decide(&table(), "/assets", Some(&s), Utc::now());
        assert_eq!(
            decision,
            GateDecision::Redirect {
                location: "/login?from=/assets".into()
            }
        );
    }

    #[test]
    fn expired_session_may_still_visit_login() {
        let s = expired_session();
        assert_eq!(decide(&table(), "/login", Some(&s), Utc::now()), GateDecision::Allow);
    }

    #[test]
    fn prefix_matching_respects_segment_boundaries() {
        let t = table();
        assert!(t.is_public("/login"));
        assert!(t.is_public("/login/reset"));
        assert!(!t.is_public("/login-help"));

        let decision = decide(&t, "/login-help", None, Utc::now());
        assert_eq!(
            decision,
            GateDecision::Redirect {
                location: "/login?from=/login-help".into()
            }
        );
    }

    #[test]
    fn trailing_slash_prefixes_are_normalized() {
        let t = RouteTable::new(["/login/"], "/login", "/dashboard").unwrap();
        assert!(t.is_public("/login"));
        assert!(t.is_public("/login/reset"));
    }

    #[test]
    fn root_prefix_matches_only_the_root_path() {
        let t = RouteTable::new(["/"], "/login", "/dashboard").unwrap();
        assert!(t.is_public("/"));
        assert!(!t.is_public("/anything"));
    }

    #[test]
    fn malformed_paths_fail_closed_without_echoing() {
        let t = table();
        for path in ["//evil.example", "/a?b=c", "relative", "", "/x#frag", "/x y", "/x\\y"] {
            let decision = decide(&t, path, None, Utc::now());
            match decision {
                GateDecision::Redirect { location } => {
                    assert_eq!(location, "/login", "path {path:?} must not be echoed");
                }
                GateDecision::Allow => panic!("malformed path {path:?} was allowed"),
            }
        }
    }

    #[test]
    fn malformed_paths_fail_closed_even_when_authenticated() {
        let s = session();
        let decision = decide(&table(), "//evil.example", Some(&s), Utc::now());
        assert_eq!(
            decision,
            GateDecision::Redirect {
                location: "/login".into()
            }
        );
    }

    #[test]
    fn resume_target_accepts_local_paths_only() {
        let t = table();
        assert_eq!(safe_resume_target(&t, Some("/assets/42")), "/assets/42");
        assert_eq!(safe_resume_target(&t, Some("//evil.example")), "/dashboard");
        assert_eq!(safe_resume_target(&t, Some("https://evil.example")), "/dashboard");
        assert_eq!(safe_resume_target(&t, Some("/a?b")), "/dashboard");
        assert_eq!(safe_resume_target(&t, None), "/dashboard");
    }

    #[test]
    fn table_rejects_malformed_configuration() {
        assert!(RouteTable::new(["login"], "/login", "/dashboard").is_err());
        assert!(RouteTable::new([""], "/login", "/dashboard").is_err());
        assert!(RouteTable::new(["/ok"], "login", "/dashboard").is_err());
        assert!(RouteTable::new(["/ok"], "/login", "dash board").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the gate is total and idempotent — any path, with or
        /// without a session, yields a decision without panicking, and the
        /// same inputs yield the same decision.
        #[test]
        fn decide_is_total_and_idempotent(path in ".{0,40}") {
            let t = table();
            let s = session();
            let now = Utc::now();

            let first = decide(&t, &path, None, now);
            prop_assert_eq!(first.clone(), decide(&t, &path, None, now));

            let first_authed = decide(&t, &path, Some(&s), now);
            prop_assert_eq!(first_authed.clone(), decide(&t, &path, Some(&s), now));
        }

        /// Property: every well-formed protected path is preserved in the
        /// login redirect so the navigation can resume after sign-in.
        #[test]
        fn protected_redirects_preserve_the_requested_path(
            segs in prop::collection::vec("[a-z0-9]{1,8}", 1..4)
        ) {
            let t = table();
            let path = format!("/{}", segs.join("/"));
            prop_assume!(!t.is_public(&path));

            let decision = decide(&t, &path, None, Utc::now());
            prop_assert_eq!(decision, GateDecision::Redirect {
                location: format!("/login?from={path}"),
            });
        }
    }
}
