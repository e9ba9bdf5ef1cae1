//! Response DTOs for reporting endpoints.

use serde::Serialize;
use uuid::Uuid;

use crate::settlement::responses::MoneyResponse;

use super::reconciliation::{DriverBalance, ReconciliationReport};
use super::status::SettlementStatus;

#[derive(Debug, Serialize)]
pub struct DriverBalanceResponse {
    pub driver_id: Uuid,
    pub accepted_count: usize,
    pub unaccepted_count: usize,
    pub receipt_count: usize,
    pub accepted_total: MoneyResponse,
    pub receipted_total: MoneyResponse,
    pub pending_balance: MoneyResponse,
}

impl DriverBalanceResponse {
    fn from_balance(b: &DriverBalance, currency: &str) -> Self {
        Self {
            driver_id: b.driver_id,
            accepted_count: b.accepted_count,
            unaccepted_count: b.unaccepted_count,
            receipt_count: b.receipt_count,
            accepted_total: MoneyResponse::rounded(b.accepted_total, currency),
            receipted_total: MoneyResponse::rounded(b.receipted_total, currency),
            pending_balance: MoneyResponse::rounded(b.pending_balance, currency),
        }
    }
}

/// Response for settlement/receipt reconciliation
#[derive(Debug, Serialize)]
pub struct ReconciliationResponse {
    pub drivers: Vec<DriverBalanceResponse>,
    pub accepted_total: MoneyResponse,
    pub receipted_total: MoneyResponse,
    pub pending_balance: MoneyResponse,
}

impl ReconciliationResponse {
    pub fn from_report(report: &ReconciliationReport, currency: &str) -> Self {
        Self {
            drivers: report
                .drivers
                .iter()
                .map(|b| DriverBalanceResponse::from_balance(b, currency))
                .collect(),
            accepted_total: MoneyResponse::rounded(report.accepted_total, currency),
            receipted_total: MoneyResponse::rounded(report.receipted_total, currency),
            pending_balance: MoneyResponse::rounded(report.pending_balance, currency),
        }
    }
}

/// Response for a review status transition
#[derive(Debug, Serialize)]
pub struct StatusTransitionResponse {
    pub previous: SettlementStatus,
    pub status: SettlementStatus,
}
