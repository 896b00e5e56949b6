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
use crate::server::dto::{CreateTranslationRequest, UpdateTranslationRequest};
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::{validate_id, validate_text};
use crate::types::Translation;

pub async fn create_translation(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTranslationRequest>,
) -> impl IntoResponse {
    let source_id = validate_id(&req.source_id, "Source id")?;
    let language_id = validate_id(&req.language_id, "Language id")?;
    let text = validate_text(&req.text, "Translation text").map_err(ApiError::bad_request)?;
    let store = state.store.as_ref();

    store
        .get_source(&source_id)
        .api_err("Failed to check source")?
        .ok_or_else(|| ApiError::bad_request("Source not found"))?;

    let language = store
        .get_language(&language_id)
        .api_err("Failed to check language")?
        .ok_or_else(|| ApiError::bad_request("Language not found"))?;

    let existing = store
        .list_source_translations(&source_id)
        .api_err("Failed to check existing translations")?;

    if existing
        .iter()
        .any(|t| t.translation.language_id == language.id)
    {
        return Err(ApiError::conflict(format!(
            "Source already has a {} translation",
            language.name
        )));
    }

    let now = Utc::now();
    let translation = Translation {
        id: Uuid::new_v4().to_string(),
        text,
        language_id,
        source_id,
        created_by_id: req.created_by_id,
        created_at: now,
        updated_at: now,
    };

    store
        .create_translation(&translation)
        .api_err("Failed to create translation")?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(translation))))
}

pub async fn get_translation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let translation = state
        .store
        .get_translation(&id)
        .api_err("Failed to get translation")?
        .or_not_found("Translation not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(translation)))
}

pub async fn update_translation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateTranslationRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let mut translation = store
        .get_translation(&id)
        .api_err("Failed to get translation")?
        .or_not_found("Translation not found")?;

    if let Some(text) = req.text {
        translation.text =
            validate_text(&text, "Translation text").map_err(ApiError::bad_request)?;
    }

    if let Some(language_id) = req.language_id {
        let language_id = validate_id(&language_id, "Language id")?;
        store
            .get_language(&language_id)
            .api_err("Failed to check language")?
            .ok_or_else(|| ApiError::bad_request("Language not found"))?;
        translation.language_id = language_id;
    }

    translation.updated_at = Utc::now();

    // A language switch onto one the source already has surfaces as 409.
    store
        .update_translation(&translation)
        .api_err("Failed to update translation")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(translation)))
}

pub async fn delete_translation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let deleted = state
        .store
        .delete_translation(&id)
        .api_err("Failed to delete translation")?;

    if !deleted {
        return Err(ApiError::not_found("Translation not found"));
    }

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
