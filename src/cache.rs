//! In-memory caching using moka
//!
//! Memoizes settlement results by input identity. Results are a pure
//! projection of their input, so an entry never goes stale; the TTL only
//! bounds memory for records that stop being displayed.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::settlement::models::{SettlementInput, SettlementResult};

/// Application cache holding computed settlements
#[derive(Clone)]
pub struct AppCache {
    /// Settlement results (input -> result)
    pub settlements: Cache<SettlementInput, Arc<SettlementResult>>,
}

impl AppCache {
    /// Create a new cache instance with the given capacity and TTL
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            settlements: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .time_to_idle(ttl / 2)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            settlements_size: self.settlements.entry_count(),
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        // 10k entries, 10 min TTL
        Self::new(10_000, Duration::from_secs(10 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub settlements_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::calculators::compute_settlement;
    use crate::settlement::models::{CompensationModel, FuelCapTable};

    #[tokio::test]
    async fn test_equal_inputs_share_an_entry() {
        let cache = AppCache::default();
        let input = SettlementInput::zeroed(CompensationModel::SlotRental);
        let result = Arc::new(compute_settlement(&input, &FuelCapTable::default()));

        cache.settlements.insert(input.clone(), result.clone()).await;

        let hit = cache.settlements.get(&input).await;
        assert_eq!(hit.as_deref(), Some(result.as_ref()));
    }
}
