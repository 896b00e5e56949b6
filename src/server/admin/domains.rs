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
use crate::server::dto::CreateDomainRequest;
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::validate_domain_name;
use crate::types::Domain;

pub async fn create_domain(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateDomainRequest>,
) -> impl IntoResponse {
    let name = validate_domain_name(&req.name).map_err(ApiError::bad_request)?;
    let store = state.store.as_ref();

    if store
        .get_domain_by_name(&name)
        .api_err("Failed to check existing domain")?
        .is_some()
    {
        return Err(ApiError::conflict("Domain already exists"));
    }

    let domain = Domain {
        id: Uuid::new_v4().to_string(),
        name,
        created_at: Utc::now(),
    };

    store.create_domain(&domain).api_err("Failed to create domain")?;

    tracing::info!("Created domain {}", domain.name);

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(domain))))
}

pub async fn list_domains(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let domains = state
        .store
        .list_domains()
        .api_err("Failed to list domains")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(domains)))
}

pub async fn get_domain(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let domain = state
        .store
        .get_domain(&id)
        .api_err("Failed to get domain")?
        .or_not_found("Domain not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(domain)))
}

pub async fn delete_domain(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let domain = store
        .get_domain(&id)
        .api_err("Failed to get domain")?
        .or_not_found("Domain not found")?;

    let sources = store
        .count_domain_sources(&domain.id)
        .api_err("Failed to check sources")?;

    if sources > 0 {
        return Err(ApiError::conflict(
            "Cannot delete domain with existing sources",
        ));
    }

    store
        .delete_domain(&domain.id)
        .api_err("Failed to delete domain")?;

    tracing::info!("Deleted domain {}", domain.name);

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
