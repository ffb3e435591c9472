//! Minimal cookie handling for the admin session.

use std::time::Duration;

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

use crate::error::AppError;

/// Find the value of cookie `name` in the request headers.
#[must_use]
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value installing the session token.
///
/// # Errors
///
/// Returns `AppError::Internal` if the token is not a valid header value.
pub fn session_cookie(
    name: &str,
    token: &str,
    max_age: Duration,
    secure: bool,
) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.to_string()))
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
///
/// # Errors
///
/// Returns `AppError::Internal` if the cookie name is not a valid header value.
pub fn clear_cookie(name: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!(
        "{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
    ))
    .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; intercom_session=abc123; other=1"),
        );
        assert_eq!(
            read_cookie(&headers, "intercom_session"),
            Some("abc123".to_string())
        );
        assert_eq!(read_cookie(&headers, "theme"), Some("dark".to_string()));
        assert!(read_cookie(&headers, "missing").is_none());
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("intercom_session=xyz"));
        assert_eq!(
            read_cookie(&headers, "intercom_session"),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("intercom_session="));
        assert!(read_cookie(&headers, "intercom_session").is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let value = session_cookie("sid", "tok", Duration::from_secs(60), true).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("sid=tok;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=60"));
        assert!(value.ends_with("; Secure"));

        let cleared = clear_cookie("sid").unwrap();
        assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
    }
}
