//! Session token verification at the edge.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use assetdesk_auth::{Session, SessionToken, TokenClaims, validate_claims};

/// Verifies HS256 session tokens minted by the identity provider.
///
/// The decoder checks signature and shape only; the time window runs through
/// the deterministic claims validation so verification takes an explicit
/// `now`.
pub struct Hs256TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Materialize the session a raw token represents at `now`.
    ///
    /// A token that fails to decode, verify, or sit inside its time window
    /// yields `None`; an unusable token is an absent session, never an
    /// error.
    pub fn verify(&self, raw: &str, now: DateTime<Utc>) -> Option<Session> {
        let data = jsonwebtoken::decode::<TokenClaims>(raw, &self.key, &self.validation).ok()?;
        validate_claims(&data.claims, now).ok()?;
        data.claims.into_session(SessionToken::new(raw)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_auth::{Identity, Role};
    use assetdesk_core::UserId;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn identity() -> Identity {
        Identity::new(UserId::new(), "Alice Admin", Role::new("admin"))
    }

    fn mint(claims: &TokenClaims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn verifies_a_well_formed_token() {
        let now = Utc::now();
        let id = identity();
        let claims = TokenClaims::for_identity(&id, now, Some(now + Duration::minutes(10)));
        let raw = mint(&claims, SECRET);

        let session = Hs256TokenVerifier::new(SECRET.as_bytes())
            .verify(&raw, now)
            .unwrap();
        assert_eq!(session.identity, id);
        assert_eq!(session.token, SessionToken::new(raw));
    }

    #[test]
    fn rejects_a_tampered_signature() {
        let now = Utc::now();
        let claims = TokenClaims::for_identity(&identity(), now, Some(now + Duration::minutes(10)));
        let raw = mint(&claims, "some-other-secret");

        assert!(Hs256TokenVerifier::new(SECRET.as_bytes()).verify(&raw, now).is_none());
    }

    #[test]
    fn rejects_expired_claims() {
        let now = Utc::now();
        let claims = TokenClaims::for_identity(
            &identity(),
            now - Duration::minutes(10),
            Some(now - Duration::minutes(1)),
        );
        let raw = mint(&claims, SECRET);

        assert!(Hs256TokenVerifier::new(SECRET.as_bytes()).verify(&raw, now).is_none());
    }

    #[test]
    fn token_without_expiry_verifies() {
        let now = Utc::now();
        let claims = TokenClaims::for_identity(&identity(), now - Duration::minutes(1), None);
        let raw = mint(&claims, SECRET);

        assert!(Hs256TokenVerifier::new(SECRET.as_bytes()).verify(&raw, now).is_some());
    }

    #[test]
    fn garbage_is_rejected() {
        let verifier = Hs256TokenVerifier::new(SECRET.as_bytes());
        assert!(verifier.verify("not-a-jwt", Utc::now()).is_none());
        assert!(verifier.verify("", Utc::now()).is_none());
    }
}
