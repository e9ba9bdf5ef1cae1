//! Settlement engine module.
//!
//! Computes a driver's payable amount for a period under the fleet-rental,
//! slot-rental and revenue-share compensation models.

pub mod calculators;
pub mod models;
pub mod profile;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{compute_settlement, round_money};
pub use models::{
    CompensationModel, FuelCapTable, FuelType, PercentageSplit, SettlementInput, SettlementResult,
};
pub use profile::{DriverProfile, ProfileError};
pub use routes::router;
