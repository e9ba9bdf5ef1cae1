//! HTTP handlers for reporting and review.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::Result;
use crate::AppState;

use super::reconciliation::{reconcile, Receipt, SettlementRecord};
use super::requests::{ReconciliationRequest, StatusTransitionRequest};
use super::responses::{ReconciliationResponse, StatusTransitionResponse};

/// Reconcile accepted settlements against issued receipts.
pub async fn reconciliation(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ReconciliationRequest>, JsonRejection>,
) -> Result<Json<ReconciliationResponse>> {
    let Json(req) = payload?;
    let records = req
        .records
        .into_iter()
        .map(SettlementRecord::try_from)
        .collect::<Result<Vec<_>>>()?;
    let receipts: Vec<Receipt> = req.receipts.into_iter().map(Receipt::from).collect();

    let report = reconcile(&records, &receipts, &state.config.fuel_caps);

    Ok(Json(ReconciliationResponse::from_report(
        &report,
        &state.config.currency,
    )))
}

/// Apply a review action to a settlement status.
pub async fn status_transition(
    payload: std::result::Result<Json<StatusTransitionRequest>, JsonRejection>,
) -> Result<Json<StatusTransitionResponse>> {
    let Json(req) = payload?;
    let status = req.status.apply(req.action)?;
    tracing::info!(previous = ?req.status, ?status, "Settlement status changed");

    Ok(Json(StatusTransitionResponse {
        previous: req.status,
        status,
    }))
}
