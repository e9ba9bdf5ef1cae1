//! Driver profile resolution.
//!
//! Turns a driver's contractual configuration plus a period's raw figures
//! into a ready-to-calculate `SettlementInput`. This is where the form-layer
//! guards live; the calculators never validate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{CompensationModel, FuelType, RawFigures, SettlementInput};

/// How a slot-rental driver pays for the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotFeeKind {
    /// Commission on gross earnings.
    #[default]
    Percentage,
    /// Fixed fee billed as the vehicle rental line; no commission.
    FixedFee,
}

/// Compensation configuration held by the driver profile store.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverProfile {
    pub driver_id: Uuid,
    pub name: String,
    pub model: CompensationModel,
    pub slot_fee_kind: SlotFeeKind,
    pub fuel_type: Option<FuelType>,
    pub is_iva_exempt: bool,
    pub is_slot_fee_exempt: bool,
    /// Rental fee (or fixed slot fee) used when the period leaves it blank.
    pub default_vehicle_rental: Option<Decimal>,
    pub outstanding_debt: Decimal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("debt deduction {requested} exceeds outstanding debt {outstanding}")]
    DebtDeductionExceedsOutstanding {
        requested: Decimal,
        outstanding: Decimal,
    },

    #[error("debt deduction cannot be negative: {0}")]
    NegativeDebtDeduction(Decimal),
}

impl DriverProfile {
    /// Build the settlement input for one period of this driver.
    pub fn resolve_input(&self, mut figures: RawFigures) -> Result<SettlementInput, ProfileError> {
        if figures.vehicle_rental.is_none() {
            figures.vehicle_rental = self.default_vehicle_rental;
        }
        let figures = figures.sanitize();

        let requested = figures.debt_deduction_requested;
        if requested < Decimal::ZERO {
            return Err(ProfileError::NegativeDebtDeduction(requested));
        }
        if requested > self.outstanding_debt {
            return Err(ProfileError::DebtDeductionExceedsOutstanding {
                requested,
                outstanding: self.outstanding_debt,
            });
        }

        let fixed_slot =
            self.model == CompensationModel::SlotRental && self.slot_fee_kind == SlotFeeKind::FixedFee;

        Ok(SettlementInput {
            model: self.model,
            fuel_type: self.fuel_type,
            figures,
            is_iva_exempt: self.is_iva_exempt,
            is_slot_fee_exempt: self.is_slot_fee_exempt || fixed_slot,
        })
    }

    /// Outstanding debt left once `input`'s deduction is applied.
    pub fn remaining_debt(&self, input: &SettlementInput) -> Decimal {
        self.outstanding_debt - input.figures.debt_deduction_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::models::PercentageSplit;
    use rust_decimal_macros::dec;

    fn profile(model: CompensationModel) -> DriverProfile {
        DriverProfile {
            driver_id: Uuid::new_v4(),
            name: "Rui Costa".to_string(),
            model,
            slot_fee_kind: SlotFeeKind::Percentage,
            fuel_type: None,
            is_iva_exempt: false,
            is_slot_fee_exempt: false,
            default_vehicle_rental: None,
            outstanding_debt: dec!(300),
        }
    }

    #[test]
    fn test_resolve_input_copies_policy_flags() {
        let mut driver = profile(CompensationModel::RevenueShare(PercentageSplit::SixtyForty));
        driver.fuel_type = Some(FuelType::Electric);
        driver.is_iva_exempt = true;

        let input = driver.resolve_input(RawFigures::default()).unwrap();

        assert_eq!(input.model, driver.model);
        assert_eq!(input.fuel_type, Some(FuelType::Electric));
        assert!(input.is_iva_exempt);
        assert!(!input.is_slot_fee_exempt);
    }

    #[test]
    fn test_fixed_fee_slot_forces_slot_fee_exemption() {
        let mut driver = profile(CompensationModel::SlotRental);
        driver.slot_fee_kind = SlotFeeKind::FixedFee;

        let input = driver.resolve_input(RawFigures::default()).unwrap();

        assert!(input.is_slot_fee_exempt);
    }

    #[test]
    fn test_fixed_fee_kind_ignored_outside_slot_rental() {
        let mut driver = profile(CompensationModel::FleetRental);
        driver.slot_fee_kind = SlotFeeKind::FixedFee;

        let input = driver.resolve_input(RawFigures::default()).unwrap();

        assert!(!input.is_slot_fee_exempt);
    }

    #[test]
    fn test_default_rental_fills_blank_period() {
        let mut driver = profile(CompensationModel::FleetRental);
        driver.default_vehicle_rental = Some(dec!(220));

        let blank = driver.resolve_input(RawFigures::default()).unwrap();
        let explicit = driver
            .resolve_input(RawFigures {
                vehicle_rental: Some(dec!(180)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(blank.figures.vehicle_rental, dec!(220));
        assert_eq!(explicit.figures.vehicle_rental, dec!(180));
    }

    #[test]
    fn test_debt_deduction_above_outstanding_is_rejected() {
        let driver = profile(CompensationModel::FleetRental);

        let err = driver
            .resolve_input(RawFigures {
                debt_deduction_requested: Some(dec!(300.01)),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(
            err,
            ProfileError::DebtDeductionExceedsOutstanding {
                requested: dec!(300.01),
                outstanding: dec!(300),
            }
        );
    }

    #[test]
    fn test_negative_debt_deduction_is_rejected() {
        let driver = profile(CompensationModel::FleetRental);

        let err = driver
            .resolve_input(RawFigures {
                debt_deduction_requested: Some(dec!(-5)),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err, ProfileError::NegativeDebtDeduction(dec!(-5)));
    }

    #[test]
    fn test_remaining_debt_after_full_deduction() {
        let driver = profile(CompensationModel::SlotRental);
        let input = driver
            .resolve_input(RawFigures {
                debt_deduction_requested: Some(dec!(300)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(driver.remaining_debt(&input), Decimal::ZERO);
    }
}
