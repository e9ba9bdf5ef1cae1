//! Application router

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::reporting;
use crate::settlement;
use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let settlements = settlement::router()
        .route("/status", post(reporting::routes::status_transition));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/settlements", settlements)
        .route(
            "/api/reports/reconciliation",
            post(reporting::routes::reconciliation),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
