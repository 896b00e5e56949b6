mod domains;
mod languages;
mod sources;
mod translations;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::server::AppState;

/// Authoring API consumed by the administrative UI.
pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        // Domain routes
        .route("/domains", post(domains::create_domain))
        .route("/domains", get(domains::list_domains))
        .route("/domains/{id}", get(domains::get_domain))
        .route("/domains/{id}", delete(domains::delete_domain))
        // Language routes
        .route("/languages", post(languages::create_language))
        .route("/languages", get(languages::list_languages))
        .route("/languages/{id}", get(languages::get_language))
        .route("/languages/{id}", delete(languages::delete_language))
        // Source routes
        .route("/sources", post(sources::create_source))
        .route("/sources", get(sources::list_sources))
        .route("/sources/{id}", get(sources::get_source))
        .route("/sources/{id}", patch(sources::update_source))
        .route("/sources/{id}", delete(sources::delete_source))
        .route("/sources/{id}/snippets", get(sources::source_snippets))
        // Translation routes
        .route("/translations", post(translations::create_translation))
        .route("/translations/{id}", get(translations::get_translation))
        .route("/translations/{id}", patch(translations::update_translation))
        .route("/translations/{id}", delete(translations::delete_translation))
}
