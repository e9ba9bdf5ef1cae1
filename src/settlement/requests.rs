//! Request DTOs for settlement API endpoints.
//!
//! This is the construction boundary: textual currency is coerced here and
//! anything blank or non-numeric becomes an absent figure. Numbers beyond
//! [`MAX_FIGURE_MAGNITUDE`] are rejected rather than dropped.

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use super::models::{
    CompensationModel, FuelType, PercentageSplit, RawFigures, SettlementInput,
    MAX_FIGURE_MAGNITUDE,
};
use super::profile::{DriverProfile, SlotFeeKind};

/// Compensation model as sent by the forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationModelRequest {
    FleetRental,
    SlotRental,
    RevenueShare,
}

impl CompensationModelRequest {
    /// Revenue share without an explicit split is 50/50.
    pub fn resolve(self, split: Option<PercentageSplit>) -> CompensationModel {
        match self {
            CompensationModelRequest::FleetRental => CompensationModel::FleetRental,
            CompensationModelRequest::SlotRental => CompensationModel::SlotRental,
            CompensationModelRequest::RevenueShare => {
                CompensationModel::RevenueShare(split.unwrap_or(PercentageSplit::FiftyFifty))
            }
        }
    }
}

/// A numeric amount outside the accepted range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("amount {text} exceeds the accepted magnitude of {max}", max = MAX_FIGURE_MAGNITUDE)]
pub struct AmountOutOfRange {
    pub text: String,
}

/// Accept a number, a numeric string (decimal comma allowed) or null.
/// Non-numeric values are treated as missing.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => parse_amount(&n.to_string()).map_err(de::Error::custom),
        Some(Value::String(s)) => {
            parse_amount(&s.trim().replace(',', ".")).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Like [`lenient_amount`], but the amount must be present.
pub(crate) fn required_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_amount(deserializer)?
        .ok_or_else(|| de::Error::custom("amount is missing or not a number"))
}

fn parse_amount(text: &str) -> Result<Option<Decimal>, AmountOutOfRange> {
    let out_of_range = || AmountOutOfRange {
        text: text.to_string(),
    };

    match text
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text))
    {
        Ok(amount) if amount.abs() <= MAX_FIGURE_MAGNITUDE => Ok(Some(amount)),
        Ok(_) => Err(out_of_range()),
        // Numeric, but beyond what Decimal can hold.
        Err(_) if text.parse::<f64>().is_ok_and(f64::is_finite) => Err(out_of_range()),
        Err(_) => Ok(None),
    }
}

/// Period figures in a request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FiguresRequest {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub uber_earnings: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub uber_tips: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub uber_tolls: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub uber_adjustments: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub bolt_earnings: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub bolt_tips: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub bolt_tolls: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub bolt_adjustments: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub vehicle_rental: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub fleet_card: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub rental_tolls: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub other_expenses: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub debt_deduction_requested: Option<Decimal>,
}

impl From<FiguresRequest> for RawFigures {
    fn from(req: FiguresRequest) -> Self {
        RawFigures {
            uber_earnings: req.uber_earnings,
            uber_tips: req.uber_tips,
            uber_tolls: req.uber_tolls,
            uber_adjustments: req.uber_adjustments,
            bolt_earnings: req.bolt_earnings,
            bolt_tips: req.bolt_tips,
            bolt_tolls: req.bolt_tolls,
            bolt_adjustments: req.bolt_adjustments,
            vehicle_rental: req.vehicle_rental,
            fleet_card: req.fleet_card,
            rental_tolls: req.rental_tolls,
            other_expenses: req.other_expenses,
            debt_deduction_requested: req.debt_deduction_requested,
        }
    }
}

/// Request to calculate a settlement from already-resolved policy
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateSettlementRequest {
    pub compensation_model: CompensationModelRequest,
    #[serde(default)]
    pub percentage_split: Option<PercentageSplit>,
    #[serde(default)]
    pub fuel_type: Option<FuelType>,
    #[serde(default)]
    pub is_iva_exempt: bool,
    #[serde(default)]
    pub is_slot_fee_exempt: bool,
    #[serde(flatten)]
    pub figures: FiguresRequest,
}

impl CalculateSettlementRequest {
    pub fn into_input(self) -> SettlementInput {
        SettlementInput {
            model: self.compensation_model.resolve(self.percentage_split),
            fuel_type: self.fuel_type,
            figures: RawFigures::from(self.figures).sanitize(),
            is_iva_exempt: self.is_iva_exempt,
            is_slot_fee_exempt: self.is_slot_fee_exempt,
        }
    }
}

/// Driver profile in a preview request
#[derive(Debug, Clone, Deserialize)]
pub struct DriverProfileRequest {
    pub driver_id: Uuid,
    #[serde(default)]
    pub name: String,
    pub compensation_model: CompensationModelRequest,
    #[serde(default)]
    pub percentage_split: Option<PercentageSplit>,
    #[serde(default)]
    pub slot_fee_kind: SlotFeeKind,
    #[serde(default)]
    pub fuel_type: Option<FuelType>,
    #[serde(default)]
    pub is_iva_exempt: bool,
    #[serde(default)]
    pub is_slot_fee_exempt: bool,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub default_vehicle_rental: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub outstanding_debt: Option<Decimal>,
}

impl From<DriverProfileRequest> for DriverProfile {
    fn from(req: DriverProfileRequest) -> Self {
        DriverProfile {
            driver_id: req.driver_id,
            name: req.name,
            model: req.compensation_model.resolve(req.percentage_split),
            slot_fee_kind: req.slot_fee_kind,
            fuel_type: req.fuel_type,
            is_iva_exempt: req.is_iva_exempt,
            is_slot_fee_exempt: req.is_slot_fee_exempt,
            default_vehicle_rental: req.default_vehicle_rental,
            outstanding_debt: req.outstanding_debt.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Request to preview a driver's settlement from their profile
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSettlementRequest {
    pub profile: DriverProfileRequest,
    #[serde(default)]
    pub figures: FiguresRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn parse(body: Value) -> SettlementInput {
        serde_json::from_value::<CalculateSettlementRequest>(body)
            .unwrap()
            .into_input()
    }

    #[test]
    fn test_numbers_and_strings_are_accepted() {
        let input = parse(json!({
            "compensation_model": "fleet_rental",
            "uber_earnings": 450.50,
            "bolt_earnings": "380.75",
            "fleet_card": "12,40"
        }));

        assert_eq!(input.model, CompensationModel::FleetRental);
        assert_eq!(input.figures.uber_earnings, dec!(450.50));
        assert_eq!(input.figures.bolt_earnings, dec!(380.75));
        assert_eq!(input.figures.fleet_card, dec!(12.40));
    }

    #[test]
    fn test_null_blank_and_garbage_become_zero() {
        let input = parse(json!({
            "compensation_model": "slot_rental",
            "uber_earnings": null,
            "uber_tips": "",
            "uber_tolls": "NaN",
            "bolt_tips": true
        }));

        assert_eq!(input.figures.uber_earnings, Decimal::ZERO);
        assert_eq!(input.figures.uber_tips, Decimal::ZERO);
        assert_eq!(input.figures.uber_tolls, Decimal::ZERO);
        assert_eq!(input.figures.bolt_tips, Decimal::ZERO);
        assert_eq!(input.figures.other_expenses, Decimal::ZERO);
    }

    #[test]
    fn test_amounts_beyond_the_ceiling_are_rejected() {
        let max = "79228162514264337593543950335";
        for body in [
            json!({ "compensation_model": "fleet_rental", "uber_earnings": max, "bolt_earnings": max }),
            json!({ "compensation_model": "fleet_rental", "uber_earnings": 1e30 }),
            json!({ "compensation_model": "fleet_rental", "fleet_card": "-1e30" }),
            json!({ "compensation_model": "slot_rental", "bolt_tips": 1000000000.01 }),
        ] {
            let err = serde_json::from_value::<CalculateSettlementRequest>(body).unwrap_err();
            assert!(err.to_string().contains("exceeds the accepted magnitude"), "{}", err);
        }
    }

    #[test]
    fn test_amounts_at_the_ceiling_are_kept() {
        let input = parse(json!({
            "compensation_model": "fleet_rental",
            "uber_earnings": "1000000000",
            "other_expenses": -1000000000
        }));

        assert_eq!(input.figures.uber_earnings, MAX_FIGURE_MAGNITUDE);
        assert_eq!(input.figures.other_expenses, -MAX_FIGURE_MAGNITUDE);
    }

    #[test]
    fn test_parse_amount_outcomes() {
        assert_eq!(parse_amount("12.5"), Ok(Some(dec!(12.5))));
        assert_eq!(parse_amount("4.5e-1"), Ok(Some(dec!(0.45))));
        assert_eq!(parse_amount(""), Ok(None));
        assert_eq!(parse_amount("NaN"), Ok(None));
        assert_eq!(parse_amount("inf"), Ok(None));
        assert_eq!(parse_amount("twelve"), Ok(None));
        assert!(parse_amount("1e30").is_err());
    }

    #[test]
    fn test_revenue_share_defaults_to_fifty_fifty() {
        let input = parse(json!({ "compensation_model": "revenue_share" }));
        assert_eq!(
            input.model,
            CompensationModel::RevenueShare(PercentageSplit::FiftyFifty)
        );

        let input = parse(json!({
            "compensation_model": "revenue_share",
            "percentage_split": "60_40",
            "fuel_type": "diesel"
        }));
        assert_eq!(
            input.model,
            CompensationModel::RevenueShare(PercentageSplit::SixtyForty)
        );
        assert_eq!(input.fuel_type, Some(FuelType::Diesel));
    }

    #[test]
    fn test_split_is_ignored_for_standard_models() {
        let input = parse(json!({
            "compensation_model": "slot_rental",
            "percentage_split": "60_40",
            "is_slot_fee_exempt": true
        }));

        assert_eq!(input.model, CompensationModel::SlotRental);
        assert!(input.is_slot_fee_exempt);
    }

    #[test]
    fn test_profile_request_defaults() {
        let req: PreviewSettlementRequest = serde_json::from_value(json!({
            "profile": {
                "driver_id": "6f2c1f8e-3a57-4d8b-9c35-0b4c1e6f4a21",
                "compensation_model": "slot_rental",
                "slot_fee_kind": "fixed_fee",
                "default_vehicle_rental": "95.00"
            }
        }))
        .unwrap();

        let profile = DriverProfile::from(req.profile);

        assert_eq!(profile.slot_fee_kind, SlotFeeKind::FixedFee);
        assert_eq!(profile.default_vehicle_rental, Some(dec!(95.00)));
        assert_eq!(profile.outstanding_debt, Decimal::ZERO);
        assert!(req.figures.uber_earnings.is_none());
    }
}
