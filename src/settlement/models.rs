//! Domain types for the settlement engine.
//!
//! A `SettlementInput` is built once per driver-period and never mutated.
//! Missing figures from partially filled records are zero-filled here, at
//! construction, so the calculators only ever see plain `Decimal`s.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default fleet-card cost-sharing cap for diesel vehicles.
pub const DIESEL_FLEET_CARD_CAP: Decimal = dec!(120.00);

/// Default fleet-card cost-sharing cap for electric vehicles.
pub const ELECTRIC_FLEET_CARD_CAP: Decimal = dec!(70.00);

/// Largest magnitude accepted for any single monetary figure or cap.
///
/// Every engine sum and rate product over figures within this bound stays far
/// inside `Decimal`'s range, so `compute_settlement` cannot overflow.
pub const MAX_FIGURE_MAGNITUDE: Decimal = dec!(1000000000);

/// How the driver's net earnings are split under the revenue-share model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PercentageSplit {
    #[serde(rename = "50_50", alias = "50/50")]
    FiftyFifty,
    #[serde(rename = "60_40", alias = "60/40")]
    SixtyForty,
}

/// Contractual compensation model selecting the calculation branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompensationModel {
    /// Driver leases a company vehicle for a fixed rental fee.
    FleetRental,
    /// Driver pays a slot commission (percentage or fixed fee).
    SlotRental,
    /// Net earnings are split with the company.
    RevenueShare(PercentageSplit),
}

impl CompensationModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompensationModel::FleetRental => "fleet_rental",
            CompensationModel::SlotRental => "slot_rental",
            CompensationModel::RevenueShare(_) => "revenue_share",
        }
    }
}

/// Vehicle fuel type, governing the fleet-card cap under revenue share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Diesel,
    Electric,
    /// Any value the profile store holds that is not a known fuel type.
    #[serde(other)]
    Unknown,
}

/// Lookup table from fuel type to fleet-card cost-sharing cap.
///
/// Fuel types without an entry (and an absent fuel type) resolve to a zero
/// cap, so the driver bears the whole fleet-card spend.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelCapTable {
    caps: HashMap<FuelType, Decimal>,
}

impl FuelCapTable {
    pub fn new(diesel: Decimal, electric: Decimal) -> Self {
        let mut caps = HashMap::new();
        caps.insert(FuelType::Diesel, diesel);
        caps.insert(FuelType::Electric, electric);
        Self { caps }
    }

    pub fn cap_for(&self, fuel_type: Option<FuelType>) -> Decimal {
        fuel_type
            .and_then(|fuel| self.caps.get(&fuel).copied())
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for FuelCapTable {
    fn default() -> Self {
        Self::new(DIESEL_FLEET_CARD_CAP, ELECTRIC_FLEET_CARD_CAP)
    }
}

/// Period figures as stored by the record store. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFigures {
    pub uber_earnings: Option<Decimal>,
    pub uber_tips: Option<Decimal>,
    pub uber_tolls: Option<Decimal>,
    pub uber_adjustments: Option<Decimal>,
    pub bolt_earnings: Option<Decimal>,
    pub bolt_tips: Option<Decimal>,
    pub bolt_tolls: Option<Decimal>,
    pub bolt_adjustments: Option<Decimal>,
    pub vehicle_rental: Option<Decimal>,
    pub fleet_card: Option<Decimal>,
    pub rental_tolls: Option<Decimal>,
    pub other_expenses: Option<Decimal>,
    pub debt_deduction_requested: Option<Decimal>,
}

impl RawFigures {
    /// Zero-fill every missing figure.
    pub fn sanitize(self) -> Figures {
        let or_zero = |value: Option<Decimal>| value.unwrap_or(Decimal::ZERO);
        Figures {
            uber_earnings: or_zero(self.uber_earnings),
            uber_tips: or_zero(self.uber_tips),
            uber_tolls: or_zero(self.uber_tolls),
            uber_adjustments: or_zero(self.uber_adjustments),
            bolt_earnings: or_zero(self.bolt_earnings),
            bolt_tips: or_zero(self.bolt_tips),
            bolt_tolls: or_zero(self.bolt_tolls),
            bolt_adjustments: or_zero(self.bolt_adjustments),
            vehicle_rental: or_zero(self.vehicle_rental),
            fleet_card: or_zero(self.fleet_card),
            rental_tolls: or_zero(self.rental_tolls),
            other_expenses: or_zero(self.other_expenses),
            debt_deduction_requested: or_zero(self.debt_deduction_requested),
        }
    }
}

/// Fully populated period figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Figures {
    pub uber_earnings: Decimal,
    pub uber_tips: Decimal,
    pub uber_tolls: Decimal,
    pub uber_adjustments: Decimal,
    pub bolt_earnings: Decimal,
    pub bolt_tips: Decimal,
    pub bolt_tolls: Decimal,
    pub bolt_adjustments: Decimal,
    pub vehicle_rental: Decimal,
    pub fleet_card: Decimal,
    pub rental_tolls: Decimal,
    pub other_expenses: Decimal,
    pub debt_deduction_requested: Decimal,
}

/// One driver-period's figures plus the resolved contractual policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettlementInput {
    pub model: CompensationModel,
    pub fuel_type: Option<FuelType>,
    pub figures: Figures,
    pub is_iva_exempt: bool,
    pub is_slot_fee_exempt: bool,
}

impl SettlementInput {
    /// Input with all figures at zero and no exemptions.
    pub fn zeroed(model: CompensationModel) -> Self {
        Self {
            model,
            fuel_type: None,
            figures: Figures::default(),
            is_iva_exempt: false,
            is_slot_fee_exempt: false,
        }
    }
}

/// Cross-platform totals shared by every branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregates {
    pub total_rides: Decimal,
    pub total_tips: Decimal,
    pub total_platform_tolls: Decimal,
    pub total_adjustments: Decimal,
}

impl Aggregates {
    pub fn from_figures(figures: &Figures) -> Self {
        Self {
            total_rides: figures.uber_earnings + figures.bolt_earnings,
            total_tips: figures.uber_tips + figures.bolt_tips,
            total_platform_tolls: figures.uber_tolls + figures.bolt_tolls,
            total_adjustments: figures.uber_adjustments + figures.bolt_adjustments,
        }
    }
}

/// Breakdown for the fleet-rental and slot-rental models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardBreakdown {
    pub total_rides: Decimal,
    /// Gross including tips, platform tolls and adjustments.
    pub total_earnings: Decimal,
    pub slot_fee: Decimal,
    pub iva: Decimal,
    pub platform_tolls_as_deduction: Decimal,
    pub vehicle_rental: Decimal,
    pub fleet_card: Decimal,
    pub rental_tolls: Decimal,
    pub other_expenses: Decimal,
    pub debt_deduction: Decimal,
    pub total_deductions: Decimal,
    pub net_payable: Decimal,
    // Display-only lines, already embedded in gross.
    pub refunded_tips: Decimal,
    pub refunded_tolls: Decimal,
    pub refunded_adjustments: Decimal,
}

/// Split-specific part of a revenue-share breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitBreakdown {
    FiftyFifty {
        driver_share_raw: Decimal,
        driver_iva_cost: Decimal,
        shared_fleet_card_split: Decimal,
        company_fleet_card_cost: Decimal,
        driver_fleet_card_cost: Decimal,
        driver_costs: Decimal,
    },
    SixtyForty {
        company_assumes_fleet_card: Decimal,
        driver_excess_fleet_card: Decimal,
        total_company_costs: Decimal,
        net_to_split: Decimal,
        driver_share_raw: Decimal,
        company_share: Decimal,
        driver_share_after_excess: Decimal,
    },
}

/// Breakdown for the revenue-share model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueShareBreakdown {
    /// Rides only; tips and tolls excluded.
    pub base_earnings: Decimal,
    pub total_earnings: Decimal,
    pub refunded_tips: Decimal,
    pub total_platform_tolls: Decimal,
    pub total_adjustments: Decimal,
    pub iva: Decimal,
    pub fleet_card: Decimal,
    pub fleet_card_cap: Decimal,
    pub debt_deduction: Decimal,
    pub split: SplitBreakdown,
    pub net_payable: Decimal,
}

/// Engine output: one per `SettlementInput`, recomputed whenever displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementResult {
    Standard(StandardBreakdown),
    RevenueShare(RevenueShareBreakdown),
}

impl SettlementResult {
    pub fn is_percentage(&self) -> bool {
        matches!(self, SettlementResult::RevenueShare(_))
    }

    pub fn net_payable(&self) -> Decimal {
        match self {
            SettlementResult::Standard(b) => b.net_payable,
            SettlementResult::RevenueShare(b) => b.net_payable,
        }
    }
}
