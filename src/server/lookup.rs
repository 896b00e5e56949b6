//! Public key/locale lookup used by client applications at runtime.
//!
//! The response body is the bare translation text encoded as a JSON string.
//! Every miss answers with the same 404 body so callers cannot tell an unknown
//! key from an unknown language.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::server::AppState;
use crate::server::dto::LookupParams;

#[derive(Debug, PartialEq, Eq)]
pub enum LookupError {
    MissingParams,
    NotFound,
    InternalError,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            LookupError::MissingParams => (StatusCode::BAD_REQUEST, "key and code are required"),
            LookupError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            LookupError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub fn lookup_router() -> Router<Arc<AppState>> {
    Router::new().route("/translations", get(lookup_get).post(lookup_post))
}

async fn lookup_get(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LookupParams>, QueryRejection>,
) -> Result<Json<String>, LookupError> {
    let Query(params) = query.map_err(|_| LookupError::MissingParams)?;
    resolve(&state, params).map(Json)
}

async fn lookup_post(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LookupParams>, JsonRejection>,
) -> Result<Json<String>, LookupError> {
    let Json(params) = body.map_err(|_| LookupError::MissingParams)?;
    resolve(&state, params).map(Json)
}

fn resolve(state: &AppState, params: LookupParams) -> Result<String, LookupError> {
    let (Some(key), Some(code)) = (non_empty(params.key), non_empty(params.code)) else {
        return Err(LookupError::MissingParams);
    };

    let text = state
        .store
        .resolve_translation(&key, &code)
        .map_err(|e| {
            tracing::error!("Failed to resolve {key}/{code}: {e}");
            LookupError::InternalError
        })?
        .ok_or(LookupError::NotFound)?;

    tracing::debug!("Resolved {key}/{code}");

    Ok(text)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
