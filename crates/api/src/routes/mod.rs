pub mod admin;
pub mod health;
pub mod public;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/aparaturs                  list, create
/// /admin/aparaturs/{id}             show, update, delete
/// /admin/konselors                  list, create
/// /admin/konselors/{id}             show, update, delete
///
/// /public/aparaturs                 list (oldest first)
/// /public/konselors                 list (oldest first)
/// /public/roles                     role catalog
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest(
            "/admin",
            admin::router().layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
        .nest("/public", public::router())
}
