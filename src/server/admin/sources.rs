use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::server::AppState;
use crate::server::dto::{
    CreateSourceRequest, ListSourcesParams, SourceSnippetsResponse, UpdateSourceRequest,
};
use crate::server::extract::{ApiJson, ApiQuery};
use crate::server::response::{
    ApiError, ApiResponse, PaginatedResponse, StoreOptionExt, StoreResultExt,
};
use crate::server::validation::{validate_id, validate_source_key, validate_text};
use crate::snippets::Snippets;
use crate::store::Store;
use crate::types::{Source, SourceDetail, Translation};

pub async fn create_source(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateSourceRequest>,
) -> impl IntoResponse {
    let key = validate_source_key(&req.key).map_err(ApiError::bad_request)?;
    let text = validate_text(&req.text, "Source text").map_err(ApiError::bad_request)?;
    let domain_id = validate_id(&req.domain_id, "Domain id")?;
    let store = state.store.as_ref();

    store
        .get_domain(&domain_id)
        .api_err("Failed to check domain")?
        .ok_or_else(|| ApiError::bad_request("Domain not found"))?;

    if store
        .get_source_by_key(&key)
        .api_err("Failed to check existing source")?
        .is_some()
    {
        return Err(ApiError::conflict("Source key already exists"));
    }

    let now = Utc::now();
    let source = Source {
        id: Uuid::new_v4().to_string(),
        key,
        text,
        domain_id,
        created_by_id: req.created_by_id,
        created_at: now,
        updated_at: now,
    };

    let mut seen = HashSet::new();
    let mut translations = Vec::with_capacity(req.translations.len());
    for new in req.translations {
        let language_id = validate_id(&new.language_id, "Language id")?;
        let text = validate_text(&new.text, "Translation text").map_err(ApiError::bad_request)?;

        if !seen.insert(language_id.clone()) {
            return Err(ApiError::bad_request(
                "Only one translation per language is allowed",
            ));
        }

        store
            .get_language(&language_id)
            .api_err("Failed to check language")?
            .ok_or_else(|| ApiError::bad_request("Language not found"))?;

        translations.push(Translation {
            id: Uuid::new_v4().to_string(),
            text,
            language_id,
            source_id: source.id.clone(),
            created_by_id: source.created_by_id.clone(),
            created_at: now,
            updated_at: now,
        });
    }

    store
        .create_source(&source, &translations)
        .api_err("Failed to create source")?;

    tracing::info!(
        "Created source {} with {} translation(s)",
        source.key,
        translations.len()
    );

    let detail = load_detail(store, &source.id)?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(detail))))
}

pub async fn list_sources(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListSourcesParams>,
) -> impl IntoResponse {
    let query = params.into_query().map_err(ApiError::bad_request)?;

    let page = state
        .store
        .query_sources(&query)
        .api_err("Failed to list sources")?;

    Ok::<_, ApiError>(Json(PaginatedResponse::new(
        page,
        query.page,
        query.per_page,
    )))
}

pub async fn get_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let detail = load_detail(state.store.as_ref(), &id)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(detail)))
}

pub async fn update_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateSourceRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let mut source = store
        .get_source(&id)
        .api_err("Failed to get source")?
        .or_not_found("Source not found")?;

    if let Some(text) = req.text {
        source.text = validate_text(&text, "Source text").map_err(ApiError::bad_request)?;
    }

    if let Some(domain_id) = req.domain_id {
        let domain_id = validate_id(&domain_id, "Domain id")?;
        store
            .get_domain(&domain_id)
            .api_err("Failed to check domain")?
            .ok_or_else(|| ApiError::bad_request("Domain not found"))?;
        source.domain_id = domain_id;
    }

    source.updated_at = Utc::now();

    store
        .update_source(&source)
        .api_err("Failed to update source")?;

    let detail = load_detail(store, &source.id)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(detail)))
}

pub async fn delete_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let source = store
        .get_source(&id)
        .api_err("Failed to get source")?
        .or_not_found("Source not found")?;

    store
        .delete_source(&source.id)
        .api_err("Failed to delete source")?;

    tracing::info!("Deleted source {}", source.key);

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}

pub async fn source_snippets(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let detail = load_detail(state.store.as_ref(), &id)?;

    let base_url = state
        .public_base_url
        .as_deref()
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| get_host_from_headers(&headers));

    let snippets = Snippets::for_source(&detail, &base_url);

    Ok::<_, ApiError>(Json(ApiResponse::success(SourceSnippetsResponse {
        base_url,
        snippets,
    })))
}

fn load_detail(store: &dyn Store, id: &str) -> Result<SourceDetail, ApiError> {
    store
        .get_source_detail(id)
        .api_err("Failed to get source")?
        .or_not_found("Source not found")
}

#[must_use]
fn get_host_from_headers(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    format!("{scheme}://{host}")
}
