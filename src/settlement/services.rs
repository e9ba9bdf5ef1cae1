//! Settlement service functions.
//!
//! Wrap the pure calculators with memoization and logging for the HTTP layer.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::cache::AppCache;

use super::calculators::compute_settlement;
use super::models::{FuelCapTable, RawFigures, SettlementInput, SettlementResult};
use super::profile::{DriverProfile, ProfileError};

/// Calculate a settlement, reusing a memoized result for an identical input.
pub async fn calculate_settlement(
    cache: &AppCache,
    caps: &FuelCapTable,
    input: SettlementInput,
) -> Arc<SettlementResult> {
    if let Some(cached) = cache.settlements.get(&input).await {
        debug!("Cache HIT for settlement ({})", input.model.as_str());
        return cached;
    }

    debug!("Cache MISS for settlement ({})", input.model.as_str());
    let result = Arc::new(compute_settlement(&input, caps));
    cache.settlements.insert(input, result.clone()).await;
    result
}

/// Outcome of previewing a driver's period from their profile.
#[derive(Debug, Clone)]
pub struct SettlementPreview {
    pub input: SettlementInput,
    pub result: Arc<SettlementResult>,
    pub remaining_debt: Decimal,
}

/// Resolve a driver's period figures against their profile and calculate.
pub async fn preview_settlement(
    cache: &AppCache,
    caps: &FuelCapTable,
    profile: &DriverProfile,
    figures: RawFigures,
) -> Result<SettlementPreview, ProfileError> {
    let input = profile.resolve_input(figures)?;
    let remaining_debt = profile.remaining_debt(&input);
    let result = calculate_settlement(cache, caps, input.clone()).await;

    debug!(
        driver_id = %profile.driver_id,
        net_payable = %result.net_payable(),
        "Previewed settlement"
    );

    Ok(SettlementPreview {
        input,
        result,
        remaining_debt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::models::{CompensationModel, Figures, FuelType, PercentageSplit};
    use crate::settlement::profile::SlotFeeKind;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_calculate_settlement_memoizes_by_input() {
        let cache = AppCache::default();
        let caps = FuelCapTable::default();
        let input = SettlementInput {
            figures: Figures {
                uber_earnings: dec!(500),
                ..Default::default()
            },
            ..SettlementInput::zeroed(CompensationModel::SlotRental)
        };

        let first = calculate_settlement(&cache, &caps, input.clone()).await;
        let second = calculate_settlement(&cache, &caps, input).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.net_payable(), dec!(450));
    }

    #[tokio::test]
    async fn test_preview_reports_remaining_debt() {
        let cache = AppCache::default();
        let profile = DriverProfile {
            driver_id: Uuid::new_v4(),
            name: "Ana Sousa".to_string(),
            model: CompensationModel::RevenueShare(PercentageSplit::FiftyFifty),
            slot_fee_kind: SlotFeeKind::Percentage,
            fuel_type: Some(FuelType::Diesel),
            is_iva_exempt: false,
            is_slot_fee_exempt: false,
            default_vehicle_rental: None,
            outstanding_debt: dec!(100),
        };
        let figures = RawFigures {
            uber_earnings: Some(dec!(500)),
            bolt_earnings: Some(dec!(400)),
            fleet_card: Some(dec!(200)),
            debt_deduction_requested: Some(dec!(40)),
            ..Default::default()
        };

        let preview = preview_settlement(&cache, &FuelCapTable::default(), &profile, figures)
            .await
            .unwrap();

        assert_eq!(preview.result.net_payable(), dec!(243));
        assert_eq!(preview.remaining_debt, dec!(60));
    }

    #[tokio::test]
    async fn test_preview_rejects_excess_debt_without_caching() {
        let cache = AppCache::default();
        let profile = DriverProfile {
            driver_id: Uuid::new_v4(),
            name: String::new(),
            model: CompensationModel::FleetRental,
            slot_fee_kind: SlotFeeKind::Percentage,
            fuel_type: None,
            is_iva_exempt: false,
            is_slot_fee_exempt: false,
            default_vehicle_rental: None,
            outstanding_debt: Decimal::ZERO,
        };
        let figures = RawFigures {
            debt_deduction_requested: Some(dec!(1)),
            ..Default::default()
        };

        let err = preview_settlement(&cache, &FuelCapTable::default(), &profile, figures)
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::DebtDeductionExceedsOutstanding { .. }));
        cache.settlements.run_pending_tasks().await;
        assert_eq!(cache.stats().settlements_size, 0);
    }
}
