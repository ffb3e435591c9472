//! Administrator sessions.
//!
//! There is exactly one admin identity, taken from configuration. A
//! successful login creates a server-side session keyed by a random opaque
//! token (64 characters of URL-safe base64) that the browser carries in a
//! cookie. Sessions expire after the configured TTL and are purged lazily.

use std::collections::HashMap;
use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand::Rng;
use subtle::ConstantTimeEq;

use crate::config::AuthConfig;
use crate::error::{AppError, Result};

/// Session token length in bytes (64 base64 chars).
const TOKEN_BYTES: usize = 48;

/// Server-side state of one admin login.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque token presented by the client.
    pub token: String,
    /// Identity that logged in.
    pub username: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check if the session is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Session storage (in-memory, lost on restart).
#[derive(Default)]
struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    fn insert(&self, session: Session) {
        self.sessions.write().insert(session.token.clone(), session);
    }

    fn get(&self, token: &str) -> Option<Session> {
        self.sessions.read().get(token).cloned()
    }

    fn remove(&self, token: &str) -> bool {
        self.sessions.write().remove(token).is_some()
    }

    fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        before - sessions.len()
    }

    fn len(&self) -> usize {
        self.sessions.read().len()
    }
}

/// Login, logout and session validation for the admin surface.
pub struct SessionService {
    admin_username: String,
    admin_password: String,
    ttl: Duration,
    store: SessionStore,
}

impl SessionService {
    /// Create a new session service.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            admin_username: config.admin_username.clone(),
            admin_password: config.admin_password.clone(),
            ttl: Duration::from_secs(config.session_ttl),
            store: SessionStore::default(),
        }
    }

    /// Session lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Check the credentials against the configured admin and open a session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidLogin` if either field does not match, and
    /// `AppError::Internal` if the session expiry cannot be represented.
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let user_ok = username.as_bytes().ct_eq(self.admin_username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.admin_password.as_bytes());
        if !bool::from(user_ok & pass_ok) {
            return Err(AppError::InvalidLogin);
        }

        // Expired sessions are purged on each login
        self.store.cleanup_expired();

        let now = Utc::now();
        let expires_at = chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "session ttl of {}s is out of range",
                    self.ttl.as_secs()
                ))
            })?;

        let session = Session {
            token: generate_token(),
            username: self.admin_username.clone(),
            created_at: now,
            expires_at,
        };
        self.store.insert(session.clone());

        Ok(session)
    }

    /// Return the session for `token` if it exists, has not expired and
    /// still belongs to the configured admin.
    pub fn validate(&self, token: &str) -> Option<Session> {
        let session = self.store.get(token)?;

        if session.is_expired() {
            self.store.remove(token);
            return None;
        }
        if session.username != self.admin_username {
            return None;
        }

        Some(session)
    }

    /// Destroy the session. Returns `false` if it did not exist.
    pub fn logout(&self, token: &str) -> bool {
        self.store.remove(token)
    }

    /// Drop every expired session, returning how many were removed.
    pub fn cleanup(&self) -> usize {
        self.store.cleanup_expired()
    }

    /// Number of sessions currently held.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }
}

/// Generate a random 64-character URL-safe base64 token string.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let mut bytes = [0u8; TOKEN_BYTES];
    rng.fill(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_SESSION_TTL;

    fn create_test_service(session_ttl: u64) -> SessionService {
        let config = AuthConfig {
            admin_username: "admin".to_string(),
            admin_password: "hunter2".to_string(),
            session_ttl,
            ..AuthConfig::default()
        };
        SessionService::new(&config)
    }

    #[test]
    fn test_login_and_validate() {
        let service = create_test_service(3600);

        let session = service.login("admin", "hunter2").unwrap();
        assert_eq!(session.token.len(), 64);
        assert_eq!(session.username, "admin");

        let found = service.validate(&session.token).unwrap();
        assert_eq!(found.token, session.token);
    }

    #[test]
    fn test_login_rejects_wrong_credentials() {
        let service = create_test_service(3600);

        assert!(matches!(
            service.login("admin", "wrong"),
            Err(AppError::InvalidLogin)
        ));
        assert!(service.login("root", "hunter2").is_err());
        assert!(service.login("", "").is_err());
        assert_eq!(service.active_sessions(), 0);
    }

    #[test]
    fn test_unknown_token_is_invalid() {
        let service = create_test_service(3600);
        assert!(service.validate("not-a-session").is_none());
    }

    #[test]
    fn test_logout_destroys_session() {
        let service = create_test_service(3600);
        let session = service.login("admin", "hunter2").unwrap();

        assert!(service.logout(&session.token));
        assert!(service.validate(&session.token).is_none());
        assert!(!service.logout(&session.token));
    }

    #[test]
    fn test_expired_session_is_rejected_and_purged() {
        let service = create_test_service(0);
        let session = service.login("admin", "hunter2").unwrap();

        std::thread::sleep(Duration::from_millis(10));
        assert!(service.validate(&session.token).is_none());
        assert_eq!(service.active_sessions(), 0);
    }

    #[test]
    fn test_cleanup_counts_expired() {
        let service = create_test_service(0);
        service.login("admin", "hunter2").unwrap();
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(service.cleanup(), 1);
    }

    #[test]
    fn test_tokens_are_unique() {
        let service = create_test_service(3600);
        let a = service.login("admin", "hunter2").unwrap();
        let b = service.login("admin", "hunter2").unwrap();
        assert_ne!(a.token, b.token);
        assert!(URL_SAFE_NO_PAD.decode(&a.token).is_ok());
    }

    #[test]
    fn test_login_rejects_prefix_and_extended_password() {
        let service = create_test_service(3600);

        assert!(service.login("admin", "hunter").is_err());
        assert!(service.login("admin", "hunter22").is_err());
        assert!(service.login("admi", "hunter2").is_err());
        assert!(service.login("admin", "hunter2").is_ok());
    }

    #[test]
    fn test_out_of_range_ttl_fails_login_instead_of_panicking() {
        for ttl in [u64::MAX / 2, 10_000_000_000_000] {
            let service = create_test_service(ttl);
            assert!(matches!(
                service.login("admin", "hunter2"),
                Err(AppError::Internal(_))
            ));
            assert_eq!(service.active_sessions(), 0);
        }
    }

    #[test]
    fn test_year_long_ttl_expires_in_the_future() {
        let service = create_test_service(MAX_SESSION_TTL);
        let session = service.login("admin", "hunter2").unwrap();

        assert!(session.expires_at > session.created_at);
        assert!(service.validate(&session.token).is_some());
    }
}
