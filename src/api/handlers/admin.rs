//! Admin surface (session policy).
//!
//! Human-facing and redirect-based: failures send the browser back to a
//! page with a message instead of returning an error status.

use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::extractors::AuthContext;
use crate::api::handlers::pages;
use crate::api::middleware::auth::LOGIN_PATH;
use crate::api::middleware::cookie::{clear_cookie, read_cookie, session_cookie};
use crate::api::state::AppState;
use crate::domain::{LoginForm, NumberParam, PhoneNumber};
use crate::error::{AppError, Result};

const ADMIN_PATH: &str = "/admin";

/// Query string of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Set after a rejected login.
    #[serde(default)]
    pub error: Option<String>,
}

/// Query string of the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Message from a failed edit.
    #[serde(default)]
    pub error: Option<String>,
}

/// Bulk edit form; one number per line.
#[derive(Debug, Deserialize)]
pub struct ReplaceForm {
    /// Textarea contents.
    #[serde(default)]
    pub numbers: String,
}

/// `GET /admin/login`
pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    pages::login_page(query.error.is_some())
}

/// `POST /admin/login`
///
/// # Errors
///
/// Returns 500 only if the session cookie cannot be encoded.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Response> {
    match state.sessions.login(&form.username, &form.password) {
        Ok(session) => {
            info!(username = %session.username, "Admin logged in");
            let auth = &state.config.auth;
            let cookie = session_cookie(
                &auth.cookie_name,
                &session.token,
                state.sessions.ttl(),
                auth.secure_cookie,
            )?;
            Ok(([(SET_COOKIE, cookie)], Redirect::to(ADMIN_PATH)).into_response())
        }
        Err(AppError::InvalidLogin) => {
            warn!(username = %form.username, "Admin login rejected");
            Ok(Redirect::to(&format!("{LOGIN_PATH}?error=1")).into_response())
        }
        Err(e) => Err(e),
    }
}

/// `GET|POST /admin/logout`
///
/// # Errors
///
/// Returns 500 only if the clearing cookie cannot be encoded.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let cookie_name = &state.config.auth.cookie_name;
    if let Some(token) = read_cookie(&headers, cookie_name)
        && state.sessions.logout(&token)
    {
        info!("Admin logged out");
    }

    Ok((
        [(SET_COOKIE, clear_cookie(cookie_name)?)],
        Redirect::to(LOGIN_PATH),
    )
        .into_response())
}

/// `GET /admin`
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    pages::admin_page(
        auth.display_name(),
        &state.registry.list(),
        query.error.as_deref(),
    )
}

/// `POST /admin/numbers`
pub async fn add_number(State(state): State<AppState>, Form(param): Form<NumberParam>) -> Redirect {
    back_to_dashboard(state.registry.add(param.number.trim()).await)
}

/// `POST /admin/numbers/remove`
pub async fn remove_number(
    State(state): State<AppState>,
    Form(param): Form<NumberParam>,
) -> Redirect {
    back_to_dashboard(state.registry.remove(&param.number).await)
}

/// `POST /admin/numbers/replace`
pub async fn replace_numbers(
    State(state): State<AppState>,
    Form(form): Form<ReplaceForm>,
) -> Redirect {
    let numbers = split_lines(&form.numbers);
    back_to_dashboard(state.registry.replace_all(numbers).await)
}

/// Textarea lines, trimmed, blank lines dropped.
fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn back_to_dashboard(outcome: Result<Vec<PhoneNumber>>) -> Redirect {
    match outcome {
        Ok(_) => Redirect::to(ADMIN_PATH),
        Err(e) => {
            warn!(error = %e, "Admin edit failed");
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("error", &e.to_string())
                .finish();
            Redirect::to(&format!("{ADMIN_PATH}?{query}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        assert_eq!(
            split_lines(" +1555 \r\n\n+1666\n   \n"),
            vec!["+1555".to_string(), "+1666".to_string()]
        );
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_failed_edit_carries_message() {
        let response = back_to_dashboard(Err(AppError::InvalidInput("empty".to_string())))
            .into_response();
        let location = response.headers()["location"].to_str().unwrap();
        assert!(location.starts_with("/admin?error="));
        assert!(location.contains("empty"));
    }
}
