//! TVDE fleet settlement service.
//!
//! Computes what a ride-hailing driver is owed for a period under the
//! fleet's compensation models, and reconciles accepted settlements against
//! the receipts drivers issue.

pub mod cache;
pub mod config;
pub mod error;
pub mod reporting;
pub mod routes;
pub mod settlement;

use std::sync::Arc;

use axum::Router;

use crate::cache::AppCache;
use crate::config::Config;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cache = AppCache::new(config.cache_capacity, config.cache_ttl);
        Self {
            config: Arc::new(config),
            cache,
        }
    }
}

/// Build the application router for the given configuration.
pub fn build_app(config: Config) -> Router {
    routes::router(AppState::new(config))
}
