//! Response DTOs for settlement API endpoints.
//!
//! Every amount leaving the service is rounded to cents here, and only here.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::round_money;
use super::models::{
    CompensationModel, RevenueShareBreakdown, SettlementResult, SplitBreakdown,
    StandardBreakdown,
};

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    /// Round to cents for display, always carrying two places.
    pub fn rounded(amount: Decimal, currency: &str) -> Self {
        let mut amount = round_money(amount, 2);
        amount.rescale(2);
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// How a receipt line affects the driver's payable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEffect {
    Credit,
    Debit,
    /// Shown for transparency; already contained in another line.
    Info,
}

/// One line of the receipt-style breakdown
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownLine {
    pub key: &'static str,
    pub label: &'static str,
    pub effect: LineEffect,
    pub amount: MoneyResponse,
}

/// Detail for fleet and slot rental settlements
#[derive(Debug, Serialize)]
pub struct StandardSettlementResponse {
    pub total_earnings: MoneyResponse,
    pub slot_fee: MoneyResponse,
    pub iva: MoneyResponse,
    pub platform_tolls_as_deduction: MoneyResponse,
    pub total_deductions: MoneyResponse,
    pub refunded_tips: MoneyResponse,
    pub refunded_tolls: MoneyResponse,
    pub refunded_adjustments: MoneyResponse,
}

/// Split-specific detail for revenue-share settlements
#[derive(Debug, Serialize)]
#[serde(tag = "percentage_split")]
pub enum SplitResponse {
    #[serde(rename = "50_50")]
    FiftyFifty {
        driver_share_raw: MoneyResponse,
        driver_iva_cost: MoneyResponse,
        shared_fleet_card_split: MoneyResponse,
        company_fleet_card_cost: MoneyResponse,
        driver_fleet_card_cost: MoneyResponse,
        driver_costs: MoneyResponse,
    },
    #[serde(rename = "60_40")]
    SixtyForty {
        company_assumes_fleet_card: MoneyResponse,
        driver_excess_fleet_card: MoneyResponse,
        total_company_costs: MoneyResponse,
        net_to_split: MoneyResponse,
        driver_share_raw: MoneyResponse,
        company_share: MoneyResponse,
        driver_share_after_excess: MoneyResponse,
    },
}

/// Detail for revenue-share settlements
#[derive(Debug, Serialize)]
pub struct RevenueShareSettlementResponse {
    pub base_earnings: MoneyResponse,
    pub total_earnings: MoneyResponse,
    pub refunded_tips: MoneyResponse,
    pub total_platform_tolls: MoneyResponse,
    pub iva: MoneyResponse,
    pub fleet_card_cap: MoneyResponse,
    pub split: SplitResponse,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SettlementDetailResponse {
    Standard(StandardSettlementResponse),
    RevenueShare(RevenueShareSettlementResponse),
}

/// Response for a settlement calculation
#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    pub is_percentage: bool,
    pub compensation_model: &'static str,
    pub net_payable: MoneyResponse,
    pub detail: SettlementDetailResponse,
    pub lines: Vec<BreakdownLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_debt: Option<MoneyResponse>,
}

impl SettlementResponse {
    pub fn from_result(model: CompensationModel, result: &SettlementResult, currency: &str) -> Self {
        let money = |amount: Decimal| MoneyResponse::rounded(amount, currency);
        let (detail, lines) = match result {
            SettlementResult::Standard(b) => (
                SettlementDetailResponse::Standard(standard_detail(b, &money)),
                standard_lines(b, &money),
            ),
            SettlementResult::RevenueShare(b) => (
                SettlementDetailResponse::RevenueShare(revenue_share_detail(b, &money)),
                revenue_share_lines(b, &money),
            ),
        };

        Self {
            is_percentage: result.is_percentage(),
            compensation_model: model.as_str(),
            net_payable: money(result.net_payable()),
            detail,
            lines,
            remaining_debt: None,
        }
    }
}

fn standard_detail(
    b: &StandardBreakdown,
    money: &dyn Fn(Decimal) -> MoneyResponse,
) -> StandardSettlementResponse {
    StandardSettlementResponse {
        total_earnings: money(b.total_earnings),
        slot_fee: money(b.slot_fee),
        iva: money(b.iva),
        platform_tolls_as_deduction: money(b.platform_tolls_as_deduction),
        total_deductions: money(b.total_deductions),
        refunded_tips: money(b.refunded_tips),
        refunded_tolls: money(b.refunded_tolls),
        refunded_adjustments: money(b.refunded_adjustments),
    }
}

fn revenue_share_detail(
    b: &RevenueShareBreakdown,
    money: &dyn Fn(Decimal) -> MoneyResponse,
) -> RevenueShareSettlementResponse {
    let split = match &b.split {
        SplitBreakdown::FiftyFifty {
            driver_share_raw,
            driver_iva_cost,
            shared_fleet_card_split,
            company_fleet_card_cost,
            driver_fleet_card_cost,
            driver_costs,
        } => SplitResponse::FiftyFifty {
            driver_share_raw: money(*driver_share_raw),
            driver_iva_cost: money(*driver_iva_cost),
            shared_fleet_card_split: money(*shared_fleet_card_split),
            company_fleet_card_cost: money(*company_fleet_card_cost),
            driver_fleet_card_cost: money(*driver_fleet_card_cost),
            driver_costs: money(*driver_costs),
        },
        SplitBreakdown::SixtyForty {
            company_assumes_fleet_card,
            driver_excess_fleet_card,
            total_company_costs,
            net_to_split,
            driver_share_raw,
            company_share,
            driver_share_after_excess,
        } => SplitResponse::SixtyForty {
            company_assumes_fleet_card: money(*company_assumes_fleet_card),
            driver_excess_fleet_card: money(*driver_excess_fleet_card),
            total_company_costs: money(*total_company_costs),
            net_to_split: money(*net_to_split),
            driver_share_raw: money(*driver_share_raw),
            company_share: money(*company_share),
            driver_share_after_excess: money(*driver_share_after_excess),
        },
    };

    RevenueShareSettlementResponse {
        base_earnings: money(b.base_earnings),
        total_earnings: money(b.total_earnings),
        refunded_tips: money(b.refunded_tips),
        total_platform_tolls: money(b.total_platform_tolls),
        iva: money(b.iva),
        fleet_card_cap: money(b.fleet_card_cap),
        split,
    }
}

fn line(
    key: &'static str,
    label: &'static str,
    effect: LineEffect,
    amount: MoneyResponse,
) -> BreakdownLine {
    BreakdownLine {
        key,
        label,
        effect,
        amount,
    }
}

fn standard_lines(
    b: &StandardBreakdown,
    money: &dyn Fn(Decimal) -> MoneyResponse,
) -> Vec<BreakdownLine> {
    use LineEffect::*;

    let mut lines = vec![
        line("total_earnings", "Gross earnings", Credit, money(b.total_earnings)),
        line("refunded_tips", "Tips (included)", Info, money(b.refunded_tips)),
        line("refunded_adjustments", "Adjustments (included)", Info, money(b.refunded_adjustments)),
    ];
    if b.refunded_tolls > Decimal::ZERO {
        lines.push(line("refunded_tolls", "Platform tolls (included)", Info, money(b.refunded_tolls)));
    }
    lines.extend([
        line("vehicle_rental", "Vehicle rental", Debit, money(b.vehicle_rental)),
        line("slot_fee", "Slot fee", Debit, money(b.slot_fee)),
        line("iva", "IVA", Debit, money(b.iva)),
        line("fleet_card", "Fleet card", Debit, money(b.fleet_card)),
        line("rental_tolls", "Vehicle tolls", Debit, money(b.rental_tolls)),
        line("other_expenses", "Other expenses", Debit, money(b.other_expenses)),
        line("debt_deduction", "Debt deduction", Debit, money(b.debt_deduction)),
    ]);
    if b.platform_tolls_as_deduction > Decimal::ZERO {
        lines.push(line(
            "platform_tolls_as_deduction",
            "Platform tolls returned",
            Debit,
            money(b.platform_tolls_as_deduction),
        ));
    }
    lines.push(line("total_deductions", "Total deductions", Info, money(b.total_deductions)));
    lines
}

fn revenue_share_lines(
    b: &RevenueShareBreakdown,
    money: &dyn Fn(Decimal) -> MoneyResponse,
) -> Vec<BreakdownLine> {
    use LineEffect::*;

    let mut lines = vec![
        line("base_earnings", "Ride earnings", Info, money(b.base_earnings)),
        line("total_platform_tolls", "Platform tolls", Info, money(b.total_platform_tolls)),
        line("total_earnings", "Earnings to split", Info, money(b.total_earnings)),
        line("iva", "IVA", Info, money(b.iva)),
    ];
    match &b.split {
        SplitBreakdown::FiftyFifty {
            driver_share_raw,
            driver_iva_cost,
            driver_fleet_card_cost,
            ..
        } => lines.extend([
            line("driver_share_raw", "Driver share (50%)", Credit, money(*driver_share_raw)),
            line("driver_iva_cost", "IVA (driver half)", Debit, money(*driver_iva_cost)),
            line("driver_fleet_card_cost", "Fleet card (driver part)", Debit, money(*driver_fleet_card_cost)),
        ]),
        SplitBreakdown::SixtyForty {
            total_company_costs,
            driver_share_raw,
            driver_excess_fleet_card,
            ..
        } => lines.extend([
            line("total_company_costs", "Company costs", Info, money(*total_company_costs)),
            line("driver_share_raw", "Driver share (40%)", Credit, money(*driver_share_raw)),
            line("driver_excess_fleet_card", "Fleet card above cap", Debit, money(*driver_excess_fleet_card)),
        ]),
    }
    lines.extend([
        line("refunded_tips", "Tips", Credit, money(b.refunded_tips)),
        line("debt_deduction", "Debt deduction", Debit, money(b.debt_deduction)),
    ]);
    lines
}
