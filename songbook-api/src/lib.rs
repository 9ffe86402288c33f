//! songbook-api library
//!
//! Song catalog service: list, lyrics retrieval, delete, create enriched from
//! an external metadata source, and partial update with group rename.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod models;
pub mod pagination;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog operations over the database and the metadata source
    pub catalog: CatalogService,
    /// Service startup time, for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::library_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
