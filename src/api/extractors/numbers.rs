//! Body extractor for bulk number replacement.
//!
//! Accepts either JSON (`{"numbers": [...]}` or a bare array) or a form body
//! with repeated `numbers` / `numbers[]` fields.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::Deserialize;

use crate::error::AppError;

/// Raw numbers submitted for `ReplaceAll`, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumbersPayload(pub Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonNumbers {
    Wrapped { numbers: Vec<String> },
    Bare(Vec<String>),
}

impl<S> FromRequest<S> for NumbersPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidInput(e.body_text()))?;

        if is_json {
            parse_json(&body)
        } else {
            parse_form(&body)
        }
    }
}

fn parse_json(body: &[u8]) -> Result<NumbersPayload, AppError> {
    let parsed: JsonNumbers = serde_json::from_slice(body).map_err(|_| {
        AppError::InvalidInput("expected {\"numbers\": [..]} or a JSON array".to_string())
    })?;

    Ok(match parsed {
        JsonNumbers::Wrapped { numbers } | JsonNumbers::Bare(numbers) => NumbersPayload(numbers),
    })
}

fn parse_form(body: &[u8]) -> Result<NumbersPayload, AppError> {
    let mut seen_field = false;
    let numbers: Vec<String> = url::form_urlencoded::parse(body)
        .filter(|(k, _)| k == "numbers" || k == "numbers[]")
        .map(|(_, v)| {
            seen_field = true;
            v.into_owned()
        })
        .collect();

    if !seen_field {
        return Err(AppError::InvalidInput("numbers is required".to_string()));
    }
    Ok(NumbersPayload(numbers))
}
