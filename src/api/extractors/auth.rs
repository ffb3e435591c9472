//! Authentication context extractor.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::service::Session;

/// Which policy admitted the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Interactive admin session.
    Session,
    /// Shared API credential.
    Credential,
}

/// Authentication context extracted from request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Policy that admitted the request.
    pub policy: Policy,
    /// The admin session, for session-authenticated requests.
    pub session: Option<Session>,
}

impl AuthContext {
    /// Context for a request admitted by an admin session.
    #[must_use]
    pub const fn session(session: Session) -> Self {
        Self {
            policy: Policy::Session,
            session: Some(session),
        }
    }

    /// Context for a request admitted by the API credential.
    #[must_use]
    pub const fn credential() -> Self {
        Self {
            policy: Policy::Credential,
            session: None,
        }
    }

    /// Name to show for the authenticated party.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.session
            .as_ref()
            .map_or("api client", |s| s.username.as_str())
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by the auth middleware
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
