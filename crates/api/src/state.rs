use std::sync::Arc;

use roster_core::storage::ImageStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: roster_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Public photo storage.
    pub images: Arc<ImageStore>,
}
