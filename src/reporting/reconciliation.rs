//! Reconciliation of accepted settlements against issued receipts.
//!
//! Net payable amounts are never stored; they are recomputed from each
//! record's input here, the same way they are for display.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::settlement::{compute_settlement, FuelCapTable, SettlementInput};

use super::status::SettlementStatus;

/// A stored driver-period and its review status.
#[derive(Debug, Clone)]
pub struct SettlementRecord {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: SettlementStatus,
    pub input: SettlementInput,
}

/// An invoice ("recibo verde") issued by a driver.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub amount: Decimal,
    pub issued_on: NaiveDate,
}

/// Per-driver reconciliation totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverBalance {
    pub driver_id: Uuid,
    pub accepted_count: usize,
    pub unaccepted_count: usize,
    pub receipt_count: usize,
    pub accepted_total: Decimal,
    pub receipted_total: Decimal,
    /// Accepted but not yet invoiced; negative when receipts run ahead.
    pub pending_balance: Decimal,
}

impl DriverBalance {
    fn new(driver_id: Uuid) -> Self {
        Self {
            driver_id,
            accepted_count: 0,
            unaccepted_count: 0,
            receipt_count: 0,
            accepted_total: Decimal::ZERO,
            receipted_total: Decimal::ZERO,
            pending_balance: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Ordered by driver id.
    pub drivers: Vec<DriverBalance>,
    pub accepted_total: Decimal,
    pub receipted_total: Decimal,
    pub pending_balance: Decimal,
}

/// Sum accepted settlements and receipts per driver.
pub fn reconcile(
    records: &[SettlementRecord],
    receipts: &[Receipt],
    caps: &FuelCapTable,
) -> ReconciliationReport {
    let mut balances: BTreeMap<Uuid, DriverBalance> = BTreeMap::new();

    for record in records {
        let balance = balances
            .entry(record.driver_id)
            .or_insert_with(|| DriverBalance::new(record.driver_id));
        if record.status.is_accepted() {
            balance.accepted_count += 1;
            balance.accepted_total += compute_settlement(&record.input, caps).net_payable();
        } else {
            balance.unaccepted_count += 1;
        }
    }

    for receipt in receipts {
        let balance = balances
            .entry(receipt.driver_id)
            .or_insert_with(|| DriverBalance::new(receipt.driver_id));
        balance.receipt_count += 1;
        balance.receipted_total += receipt.amount;
    }

    let drivers: Vec<DriverBalance> = balances
        .into_values()
        .map(|mut b| {
            b.pending_balance = b.accepted_total - b.receipted_total;
            b
        })
        .collect();

    let accepted_total: Decimal = drivers.iter().map(|b| b.accepted_total).sum();
    let receipted_total: Decimal = drivers.iter().map(|b| b.receipted_total).sum();

    info!(
        drivers = drivers.len(),
        records = records.len(),
        receipts = receipts.len(),
        "Reconciled settlements against receipts"
    );

    ReconciliationReport {
        drivers,
        accepted_total,
        receipted_total,
        pending_balance: accepted_total - receipted_total,
    }
}
