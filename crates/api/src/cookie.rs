//! Session cookie handling.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

pub const SESSION_COOKIE: &str = "assetdesk_session";

/// Extract the raw session token from the request's cookies.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

/// HttpOnly cookie scoped to path / with SameSite=Strict.
pub fn set_session(token: &str, secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Cookie that evicts the session on conforming agents.
pub fn clear_session(secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}=deleted; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Strict; Path=/"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_the_session_cookie_among_others() {
        let headers = headers_with_cookie("theme=dark; assetdesk_session=tok-1; lang=en");
        assert_eq!(session_token(&headers), Some("tok-1".to_string()));
    }

    #[test]
    fn missing_session_cookie_yields_none() {
        assert_eq!(session_token(&HeaderMap::new()), None);
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn set_cookie_is_http_only_and_same_site_strict() {
        let cookie = set_session("tok-1", false);
        assert!(cookie.starts_with("assetdesk_session=tok-1"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn secure_flag_is_applied_when_configured() {
        assert!(set_session("tok-1", true).contains("; Secure"));
        assert!(clear_session(true).contains("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_in_the_past() {
        let cookie = clear_session(false);
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert!(!cookie.contains("tok"));
    }
}
