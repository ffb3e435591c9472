//! Telephony webhook handlers.
//!
//! These endpoints are public and never fail towards the provider: a
//! dropped call cannot be retried from here.

use axum::{
    Form,
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::state::AppState;
use crate::domain::{DialCompleted, IncomingCall};
use crate::service::{CallDecision, Twiml, twiml};

fn twiml_response(doc: &Twiml) -> Response {
    ([(CONTENT_TYPE, twiml::CONTENT_TYPE)], doc.render()).into_response()
}

fn route_incoming(state: &AppState, call: &IncomingCall) -> Response {
    match state.call_router.incoming_call(call, state.registry.list()) {
        CallDecision::RedirectToLanding => Redirect::to("/").into_response(),
        CallDecision::Respond(doc) => twiml_response(&doc),
    }
}

/// `GET /call`: incoming call, parameters in the query string.
pub async fn incoming_call(
    State(state): State<AppState>,
    Query(call): Query<IncomingCall>,
) -> Response {
    route_incoming(&state, &call)
}

/// `POST /call`: incoming call, parameters in a form body.
pub async fn incoming_call_form(
    State(state): State<AppState>,
    Form(call): Form<IncomingCall>,
) -> Response {
    route_incoming(&state, &call)
}

/// `GET /call_end`: dial finished, parameters in the query string.
pub async fn call_end(
    State(state): State<AppState>,
    Query(event): Query<DialCompleted>,
) -> Response {
    twiml_response(&state.call_router.dial_completed(&event))
}

/// `POST /call_end`: dial finished, parameters in a form body.
pub async fn call_end_form(
    State(state): State<AppState>,
    Form(event): Form<DialCompleted>,
) -> Response {
    twiml_response(&state.call_router.dial_completed(&event))
}
