//! Number registry API (credential policy).

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::extractors::NumbersPayload;
use crate::api::state::AppState;
use crate::domain::PhoneNumber;
use crate::error::Result;

/// `GET /api/numbers`: current registry.
pub async fn list_numbers(State(state): State<AppState>) -> Json<Vec<PhoneNumber>> {
    Json(state.registry.list())
}

/// `POST /api/numbers`: replace the registry.
///
/// # Errors
///
/// Returns 400 for a blank entry and 500 if the new list cannot be persisted.
pub async fn replace_numbers(
    State(state): State<AppState>,
    NumbersPayload(numbers): NumbersPayload,
) -> Result<Json<Vec<PhoneNumber>>> {
    Ok(Json(state.registry.replace_all(numbers).await?))
}

/// `PUT /api/numbers/{number}`: add a number.
///
/// # Errors
///
/// Returns 400 for a blank number and 500 if the list cannot be persisted.
pub async fn add_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Vec<PhoneNumber>>> {
    Ok(Json(state.registry.add(&number).await?))
}

/// `DELETE /api/numbers/{number}`: remove a number.
///
/// # Errors
///
/// Returns 500 if the list cannot be persisted.
pub async fn remove_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Vec<PhoneNumber>>> {
    Ok(Json(state.registry.remove(&number).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::AppConfig;
    use crate::error::AppError;
    use crate::service::NumberRegistry;
    use crate::storage::MemoryStore;

    async fn create_test_app_state() -> AppState {
        let registry = NumberRegistry::load(Arc::new(MemoryStore::new()), &[])
            .await
            .unwrap();
        AppState::new(Arc::new(AppConfig::default()), Arc::new(registry))
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let state = create_test_app_state().await;

        let Json(list) = add_number(State(state.clone()), Path("+1555".to_string()))
            .await
            .unwrap();
        assert_eq!(list.len(), 1);

        let Json(list) = list_numbers(State(state)).await;
        assert_eq!(list[0].as_str(), "+1555");
    }

    #[tokio::test]
    async fn test_replace_then_remove() {
        let state = create_test_app_state().await;

        let payload = NumbersPayload(vec!["a".into(), "b".into(), "a".into()]);
        let Json(list) = replace_numbers(State(state.clone()), payload).await.unwrap();
        assert_eq!(list.len(), 2);

        let Json(list) = remove_number(State(state), Path("a".to_string()))
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].as_str(), "b");
    }

    #[tokio::test]
    async fn test_replace_with_blank_is_rejected() {
        let state = create_test_app_state().await;
        let payload = NumbersPayload(vec![String::new()]);
        assert!(matches!(
            replace_numbers(State(state), payload).await,
            Err(AppError::InvalidInput(_))
        ));
    }
}
