//! Reporting module.
//!
//! Review status lifecycle for stored settlements, and reconciliation of
//! accepted settlements against the receipts drivers issue.

pub mod reconciliation;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod status;

pub use reconciliation::{reconcile, DriverBalance, Receipt, ReconciliationReport, SettlementRecord};
pub use status::{ReviewAction, ReviewError, SettlementStatus};
