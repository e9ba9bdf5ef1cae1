//! Request DTOs for reporting endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::settlement::requests::CalculateSettlementRequest;

use super::reconciliation::{Receipt, SettlementRecord};
use super::status::{ReviewAction, SettlementStatus};

/// A stored settlement in a reconciliation request
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementRecordRequest {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(default)]
    pub status: SettlementStatus,
    pub input: CalculateSettlementRequest,
}

impl TryFrom<SettlementRecordRequest> for SettlementRecord {
    type Error = AppError;

    fn try_from(req: SettlementRecordRequest) -> Result<Self, Self::Error> {
        if req.period_end < req.period_start {
            return Err(AppError::BadRequest(format!(
                "settlement {} ends ({}) before it starts ({})",
                req.id, req.period_end, req.period_start
            )));
        }
        Ok(SettlementRecord {
            id: req.id,
            driver_id: req.driver_id,
            period_start: req.period_start,
            period_end: req.period_end,
            status: req.status,
            input: req.input.into_input(),
        })
    }
}

/// An issued receipt in a reconciliation request
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptRequest {
    pub id: Uuid,
    pub driver_id: Uuid,
    #[serde(deserialize_with = "crate::settlement::requests::required_amount")]
    pub amount: Decimal,
    pub issued_on: NaiveDate,
}

impl From<ReceiptRequest> for Receipt {
    fn from(req: ReceiptRequest) -> Self {
        Receipt {
            id: req.id,
            driver_id: req.driver_id,
            amount: req.amount,
            issued_on: req.issued_on,
        }
    }
}

/// Request to reconcile settlements against receipts
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationRequest {
    #[serde(default)]
    pub records: Vec<SettlementRecordRequest>,
    #[serde(default)]
    pub receipts: Vec<ReceiptRequest>,
}

/// Request to move a settlement through review
#[derive(Debug, Clone, Deserialize)]
pub struct StatusTransitionRequest {
    pub status: SettlementStatus,
    pub action: ReviewAction,
}
