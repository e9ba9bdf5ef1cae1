//! HTTP handlers for settlement calculations.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::models::RawFigures;
use super::profile::DriverProfile;
use super::requests::{CalculateSettlementRequest, PreviewSettlementRequest};
use super::responses::{MoneyResponse, SettlementResponse};
use super::services;

/// Settlement routes, mounted under `/api/settlements`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate))
        .route("/preview", post(preview))
}

/// Calculate a settlement from an already-resolved input.
async fn calculate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CalculateSettlementRequest>, JsonRejection>,
) -> Result<Json<SettlementResponse>> {
    let Json(req) = payload?;
    let input = req.into_input();
    let model = input.model;
    let result =
        services::calculate_settlement(&state.cache, &state.config.fuel_caps, input).await;

    Ok(Json(SettlementResponse::from_result(
        model,
        &result,
        &state.config.currency,
    )))
}

/// Resolve a driver's profile against period figures, then calculate.
async fn preview(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PreviewSettlementRequest>, JsonRejection>,
) -> Result<Json<SettlementResponse>> {
    let Json(req) = payload?;
    let profile = DriverProfile::from(req.profile);
    let preview = services::preview_settlement(
        &state.cache,
        &state.config.fuel_caps,
        &profile,
        RawFigures::from(req.figures),
    )
    .await?;

    let currency = &state.config.currency;
    let mut response =
        SettlementResponse::from_result(preview.input.model, &preview.result, currency);
    response.remaining_debt = Some(MoneyResponse::rounded(preview.remaining_debt, currency));
    Ok(Json(response))
}
