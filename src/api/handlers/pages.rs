//! HTML pages for the landing and admin surfaces.

use axum::{extract::State, response::Html};

use crate::api::state::AppState;
use crate::domain::PhoneNumber;
use crate::service::twiml::escape;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\
         <body>{body}</body></html>",
        escape(title)
    ))
}

/// `GET /`: public landing page.
pub async fn landing(State(state): State<AppState>) -> Html<String> {
    let count = state.registry.len();
    let status = match count {
        0 => "No one is set up to answer the intercom.".to_string(),
        1 => "Intercom calls ring 1 phone.".to_string(),
        n => format!("Intercom calls ring {n} phones at once."),
    };

    layout(
        "Intercom",
        &format!(
            "<h1>Intercom</h1><p>{}</p><p><a href=\"/admin\">Administration</a></p>",
            escape(&status)
        ),
    )
}

/// Login form, with an error banner after a failed attempt.
#[must_use]
pub fn login_page(failed: bool) -> Html<String> {
    let banner = if failed {
        "<p class=\"error\">Invalid username or password.</p>"
    } else {
        ""
    };

    layout(
        "Intercom - Login",
        &format!(
            "<h1>Login</h1>{banner}\
             <form method=\"post\" action=\"/admin/login\">\
             <label>Username <input name=\"username\" autocomplete=\"username\"></label>\
             <label>Password <input name=\"password\" type=\"password\" \
             autocomplete=\"current-password\"></label>\
             <button type=\"submit\">Log in</button></form>"
        ),
    )
}

/// Admin dashboard listing the registry with edit forms.
#[must_use]
pub fn admin_page(username: &str, numbers: &[PhoneNumber], error: Option<&str>) -> Html<String> {
    let banner = error
        .map(|e| format!("<p class=\"error\">{}</p>", escape(e)))
        .unwrap_or_default();

    let rows: String = numbers
        .iter()
        .map(|n| {
            let n = escape(n.as_str());
            format!(
                "<li>{n} <form method=\"post\" action=\"/admin/numbers/remove\" \
                 style=\"display:inline\"><input type=\"hidden\" name=\"number\" value=\"{n}\">\
                 <button type=\"submit\">Remove</button></form></li>"
            )
        })
        .collect();

    let all: Vec<&str> = numbers.iter().map(PhoneNumber::as_str).collect();
    let textarea = escape(&all.join("\n"));

    layout(
        "Intercom - Admin",
        &format!(
            "<h1>Numbers</h1><p>Logged in as {user} (<a href=\"/admin/logout\">log out</a>)</p>\
             {banner}<ul>{rows}</ul>\
             <form method=\"post\" action=\"/admin/numbers\">\
             <input name=\"number\" placeholder=\"+15551234567\">\
             <button type=\"submit\">Add</button></form>\
             <h2>Replace all</h2><form method=\"post\" action=\"/admin/numbers/replace\">\
             <textarea name=\"numbers\" rows=\"6\">{textarea}</textarea>\
             <button type=\"submit\">Save</button></form>",
            user = escape(username)
        ),
    )
}
