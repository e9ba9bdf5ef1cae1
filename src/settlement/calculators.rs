//! Core settlement calculation functions.
//!
//! Pure functions for settlement math - no I/O, no shared state, no rounding.
//! Rounding happens only at the presentation boundary via [`round_money`].

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::{
    Aggregates, CompensationModel, FuelCapTable, PercentageSplit, RevenueShareBreakdown,
    SettlementInput, SettlementResult, SplitBreakdown, StandardBreakdown,
};

/// IVA charged on gross earnings unless the driver is exempt.
pub const IVA_RATE: Decimal = dec!(0.06);

/// Slot commission on gross earnings for non-exempt slot rentals.
pub const SLOT_FEE_RATE: Decimal = dec!(0.04);

/// Driver share under the 50/50 split.
pub const FIFTY_FIFTY_DRIVER_RATE: Decimal = dec!(0.5);

/// Driver share of the post-cost pot under the 60/40 split.
pub const SIXTY_FORTY_DRIVER_RATE: Decimal = dec!(0.4);

/// Company share of the post-cost pot under the 60/40 split.
pub const SIXTY_FORTY_COMPANY_RATE: Decimal = dec!(0.6);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Only the presentation layer calls this; the engine keeps full precision.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tvde_settlement::settlement::round_money;
///
/// assert_eq!(round_money(dec!(438.205), 2), dec!(438.20)); // rounds to even
/// assert_eq!(round_money(dec!(54.045), 2), dec!(54.04));
/// assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Compute the full payout breakdown for one driver-period.
///
/// Total over every well-formed input: missing figures were zero-filled when
/// the input was built, and inconsistent flags degrade (zero cap, no slot fee)
/// rather than fail.
pub fn compute_settlement(input: &SettlementInput, caps: &FuelCapTable) -> SettlementResult {
    let totals = Aggregates::from_figures(&input.figures);

    match input.model {
        CompensationModel::FleetRental | CompensationModel::SlotRental => {
            SettlementResult::Standard(standard_settlement(input, &totals))
        }
        CompensationModel::RevenueShare(split) => {
            let cap = caps.cap_for(input.fuel_type);
            SettlementResult::RevenueShare(revenue_share_settlement(input, &totals, split, cap))
        }
    }
}

fn iva_on(amount: Decimal, is_exempt: bool) -> Decimal {
    if is_exempt {
        Decimal::ZERO
    } else {
        amount * IVA_RATE
    }
}

/// Fleet rental and slot rental: deductions are subtracted from the full gross.
fn standard_settlement(input: &SettlementInput, totals: &Aggregates) -> StandardBreakdown {
    let figures = &input.figures;
    let is_slot = input.model == CompensationModel::SlotRental;
    let is_fleet = input.model == CompensationModel::FleetRental;

    let total_earnings = totals.total_rides
        + totals.total_tips
        + totals.total_platform_tolls
        + totals.total_adjustments;

    let slot_fee = if is_slot && !input.is_slot_fee_exempt {
        total_earnings * SLOT_FEE_RATE
    } else {
        Decimal::ZERO
    };
    let iva = iva_on(total_earnings, input.is_iva_exempt);

    // The rental company fronts toll costs, so platform toll refunds go back.
    let platform_tolls_as_deduction = if is_fleet {
        totals.total_platform_tolls
    } else {
        Decimal::ZERO
    };

    let total_deductions = figures.vehicle_rental
        + slot_fee
        + iva
        + figures.fleet_card
        + figures.rental_tolls
        + figures.other_expenses
        + figures.debt_deduction_requested
        + platform_tolls_as_deduction;

    StandardBreakdown {
        total_rides: totals.total_rides,
        total_earnings,
        slot_fee,
        iva,
        platform_tolls_as_deduction,
        vehicle_rental: figures.vehicle_rental,
        fleet_card: figures.fleet_card,
        rental_tolls: figures.rental_tolls,
        other_expenses: figures.other_expenses,
        debt_deduction: figures.debt_deduction_requested,
        total_deductions,
        net_payable: total_earnings - total_deductions,
        refunded_tips: totals.total_tips,
        refunded_tolls: if is_slot {
            totals.total_platform_tolls
        } else {
            Decimal::ZERO
        },
        refunded_adjustments: totals.total_adjustments,
    }
}

/// Revenue share: tips pass through untouched, everything else is split.
fn revenue_share_settlement(
    input: &SettlementInput,
    totals: &Aggregates,
    split: PercentageSplit,
    cap: Decimal,
) -> RevenueShareBreakdown {
    let figures = &input.figures;
    let total_earnings =
        totals.total_rides + totals.total_platform_tolls + totals.total_adjustments;
    let refunded_tips = totals.total_tips;
    let iva = iva_on(total_earnings, input.is_iva_exempt);

    let (split, driver_net) = match split {
        PercentageSplit::FiftyFifty => fifty_fifty(total_earnings, iva, figures.fleet_card, cap),
        PercentageSplit::SixtyForty => sixty_forty(input, total_earnings, iva, cap),
    };

    RevenueShareBreakdown {
        base_earnings: totals.total_rides,
        total_earnings,
        refunded_tips,
        total_platform_tolls: totals.total_platform_tolls,
        total_adjustments: totals.total_adjustments,
        iva,
        fleet_card: figures.fleet_card,
        fleet_card_cap: cap,
        debt_deduction: figures.debt_deduction_requested,
        split,
        net_payable: driver_net + refunded_tips - figures.debt_deduction_requested,
    }
}

/// IVA and the capped fleet-card spend are halved; spend above the cap stays
/// with the driver. Returns the split detail and the driver's amount before
/// tips and debt.
fn fifty_fifty(
    total_earnings: Decimal,
    iva: Decimal,
    fleet_card: Decimal,
    cap: Decimal,
) -> (SplitBreakdown, Decimal) {
    let driver_share_raw = total_earnings * FIFTY_FIFTY_DRIVER_RATE;
    let driver_iva_cost = iva / dec!(2);
    let shared_fleet_card_split = fleet_card.min(cap);
    let company_fleet_card_cost = shared_fleet_card_split / dec!(2);
    let driver_fleet_card_cost = fleet_card - company_fleet_card_cost;
    let driver_costs = driver_iva_cost + driver_fleet_card_cost;

    let split = SplitBreakdown::FiftyFifty {
        driver_share_raw,
        driver_iva_cost,
        shared_fleet_card_split,
        company_fleet_card_cost,
        driver_fleet_card_cost,
        driver_costs,
    };
    (split, driver_share_raw - driver_costs)
}

/// Company costs come off the top, the rest splits 60/40, then above-cap
/// fleet-card spend is clawed back from the driver's share.
fn sixty_forty(
    input: &SettlementInput,
    total_earnings: Decimal,
    iva: Decimal,
    cap: Decimal,
) -> (SplitBreakdown, Decimal) {
    let figures = &input.figures;
    let company_assumes_fleet_card = figures.fleet_card.min(cap);
    let driver_excess_fleet_card = (figures.fleet_card - cap).max(Decimal::ZERO);
    let total_company_costs = iva
        + company_assumes_fleet_card
        + figures.vehicle_rental
        + figures.rental_tolls
        + figures.other_expenses;
    let net_to_split = total_earnings - total_company_costs;
    let driver_share_raw = net_to_split * SIXTY_FORTY_DRIVER_RATE;
    let driver_share_after_excess = driver_share_raw - driver_excess_fleet_card;

    let split = SplitBreakdown::SixtyForty {
        company_assumes_fleet_card,
        driver_excess_fleet_card,
        total_company_costs,
        net_to_split,
        driver_share_raw,
        company_share: net_to_split * SIXTY_FORTY_COMPANY_RATE,
        driver_share_after_excess,
    };
    (split, driver_share_after_excess)
}
