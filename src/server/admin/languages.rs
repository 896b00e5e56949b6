use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::server::AppState;
use crate::server::dto::CreateLanguageRequest;
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::{validate_language_code, validate_language_name};
use crate::types::Language;

pub async fn create_language(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateLanguageRequest>,
) -> impl IntoResponse {
    let name = validate_language_name(&req.name).map_err(ApiError::bad_request)?;
    let code = validate_language_code(&req.code).map_err(ApiError::bad_request)?;
    let store = state.store.as_ref();

    if store
        .get_language_by_name(&name)
        .api_err("Failed to check existing language")?
        .is_some()
    {
        return Err(ApiError::conflict("Language name already exists"));
    }

    if store
        .get_language_by_code(&code)
        .api_err("Failed to check existing language")?
        .is_some()
    {
        return Err(ApiError::conflict("Language code already exists"));
    }

    let language = Language {
        id: Uuid::new_v4().to_string(),
        name,
        code,
        created_at: Utc::now(),
    };

    store
        .create_language(&language)
        .api_err("Failed to create language")?;

    tracing::info!("Created language {} ({})", language.name, language.code);

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(language))))
}

pub async fn list_languages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let languages = state
        .store
        .list_languages()
        .api_err("Failed to list languages")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(languages)))
}

pub async fn get_language(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let language = state
        .store
        .get_language(&id)
        .api_err("Failed to get language")?
        .or_not_found("Language not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(language)))
}

pub async fn delete_language(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let language = store
        .get_language(&id)
        .api_err("Failed to get language")?
        .or_not_found("Language not found")?;

    let translations = store
        .count_language_translations(&language.id)
        .api_err("Failed to check translations")?;

    if translations > 0 {
        return Err(ApiError::conflict(
            "Cannot delete language with existing translations",
        ));
    }

    store
        .delete_language(&language.id)
        .api_err("Failed to delete language")?;

    tracing::info!("Deleted language {}", language.code);

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
