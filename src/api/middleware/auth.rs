//! Authentication middleware.
//!
//! Two independent policies behind one capability:
//!
//! - [`SessionAuth`] guards the human-facing admin pages. A request without a
//!   valid session is redirected to the login page.
//! - [`CredentialAuth`] guards the API and mobile endpoints. A request
//!   without the shared secret gets a terminal 403.
//!
//! Either is attached to a route group with
//! `middleware::from_fn_with_state(Arc::new(policy), enforce::<Policy>)`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Uri, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::api::extractors::AuthContext;
use crate::api::middleware::cookie::read_cookie;
use crate::error::AppError;
use crate::service::SessionService;

/// Header carrying the API credential for clients that cannot set `Authorization`.
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Query parameter carrying the API credential.
pub const API_TOKEN_PARAM: &str = "api_token";

/// Path of the admin login page.
pub const LOGIN_PATH: &str = "/admin/login";

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No credential or session cookie at all.
    Missing,
    /// A credential was presented but does not match.
    Invalid,
    /// The session cookie names no live session.
    SessionExpired,
}

impl DenyReason {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Invalid => "invalid",
            Self::SessionExpired => "session_expired",
        }
    }
}

/// Result of an authorization check.
#[derive(Debug, Clone)]
pub enum Decision {
    /// Let the request through with this context.
    Allow(AuthContext),
    /// Turn the request away.
    Deny(DenyReason),
}

/// A request authorization policy.
pub trait Authorizer: Send + Sync + 'static {
    /// Policy name for logs.
    fn name(&self) -> &'static str;

    /// Inspect the request and decide.
    fn authorize(&self, headers: &HeaderMap, uri: &Uri) -> Decision;

    /// Response sent when [`authorize`](Self::authorize) denies.
    fn reject(&self, reason: DenyReason) -> Response;
}

/// Run `auth` in front of the wrapped routes.
pub async fn enforce<A: Authorizer>(
    State(auth): State<Arc<A>>,
    mut req: Request,
    next: Next,
) -> Response {
    match auth.authorize(req.headers(), req.uri()) {
        Decision::Allow(context) => {
            debug!(policy = auth.name(), path = req.uri().path(), "Request authorized");
            req.extensions_mut().insert(context);
            next.run(req).await
        }
        Decision::Deny(reason) => {
            warn!(
                policy = auth.name(),
                reason = reason.as_str(),
                method = %req.method(),
                path = req.uri().path(),
                "Request denied"
            );
            metrics::counter!(
                "intercom_auth_denied_total",
                "policy" => auth.name(),
                "reason" => reason.as_str()
            )
            .increment(1);
            auth.reject(reason)
        }
    }
}

/// Session policy for the interactive admin surface.
pub struct SessionAuth {
    sessions: Arc<SessionService>,
    cookie_name: String,
}

impl SessionAuth {
    /// Create a session policy reading the session token from `cookie_name`.
    #[must_use]
    pub fn new(sessions: Arc<SessionService>, cookie_name: impl Into<String>) -> Self {
        Self {
            sessions,
            cookie_name: cookie_name.into(),
        }
    }
}

impl Authorizer for SessionAuth {
    fn name(&self) -> &'static str {
        "session"
    }

    fn authorize(&self, headers: &HeaderMap, _uri: &Uri) -> Decision {
        let Some(token) = read_cookie(headers, &self.cookie_name) else {
            return Decision::Deny(DenyReason::Missing);
        };

        self.sessions.validate(&token).map_or(
            Decision::Deny(DenyReason::SessionExpired),
            |session| Decision::Allow(AuthContext::session(session)),
        )
    }

    fn reject(&self, _reason: DenyReason) -> Response {
        Redirect::to(LOGIN_PATH).into_response()
    }
}

/// Shared-secret policy for programmatic and mobile clients.
pub struct CredentialAuth {
    token: String,
}

impl CredentialAuth {
    /// Create a credential policy accepting `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Authorizer for CredentialAuth {
    fn name(&self) -> &'static str {
        "credential"
    }

    fn authorize(&self, headers: &HeaderMap, uri: &Uri) -> Decision {
        let Some(presented) = extract_credential(headers, uri) else {
            return Decision::Deny(DenyReason::Missing);
        };

        if bool::from(presented.as_bytes().ct_eq(self.token.as_bytes())) {
            Decision::Allow(AuthContext::credential())
        } else {
            Decision::Deny(DenyReason::Invalid)
        }
    }

    fn reject(&self, reason: DenyReason) -> Response {
        let message = match reason {
            DenyReason::Missing => "Missing API credential",
            DenyReason::Invalid | DenyReason::SessionExpired => "Invalid API credential",
        };
        AppError::Forbidden(message.to_string()).into_response()
    }
}

/// Find the credential in, by priority: bearer token, `X-Api-Token`
/// header, `api_token` query parameter.
fn extract_credential(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    extract_bearer_token(headers)
        .or_else(|| {
            headers
                .get(API_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        })
        .or_else(|| extract_query_param(uri, API_TOKEN_PARAM))
        .filter(|token| !token.is_empty())
}

/// Extract bearer token from Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(AUTHORIZATION)?.to_str().ok()?;

    auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .map(ToString::to_string)
}

/// Extract a query parameter from the URI.
fn extract_query_param(uri: &Uri, name: &str) -> Option<String> {
    uri.query().and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    })
}
