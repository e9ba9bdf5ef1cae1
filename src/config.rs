//! Service configuration from the environment.
//!
//! `.env` is loaded first when present; real environment variables win.

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::settlement::models::{
    FuelCapTable, DIESEL_FLEET_CARD_CAP, ELECTRIC_FLEET_CARD_CAP, MAX_FIGURE_MAGNITUDE,
};

#[derive(Debug, thiserror::Error)]
#[error("invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub currency: String,
    pub fuel_caps: FuelCapTable,
    pub cache_capacity: u64,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            currency: "EUR".to_string(),
            fuel_caps: FuelCapTable::default(),
            cache_capacity: 10_000,
            cache_ttl: Duration::from_secs(600),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let diesel = cap_in_range(
            "FLEET_CARD_CAP_DIESEL",
            parse_or(&lookup, "FLEET_CARD_CAP_DIESEL", DIESEL_FLEET_CARD_CAP)?,
        )?;
        let electric = cap_in_range(
            "FLEET_CARD_CAP_ELECTRIC",
            parse_or(&lookup, "FLEET_CARD_CAP_ELECTRIC", ELECTRIC_FLEET_CARD_CAP)?,
        )?;
        let ttl_secs = parse_or(
            &lookup,
            "SETTLEMENT_CACHE_TTL_SECS",
            defaults.cache_ttl.as_secs(),
        )?;

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            currency: lookup("CURRENCY").unwrap_or(defaults.currency),
            fuel_caps: FuelCapTable::new(diesel, electric),
            cache_capacity: parse_or(&lookup, "SETTLEMENT_CACHE_CAPACITY", defaults.cache_capacity)?,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError { key, value: raw }),
        None => Ok(default),
    }
}

fn cap_in_range(key: &'static str, cap: Decimal) -> Result<Decimal, ConfigError> {
    if cap < Decimal::ZERO || cap > MAX_FIGURE_MAGNITUDE {
        return Err(ConfigError {
            key,
            value: cap.to_string(),
        });
    }
    Ok(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::models::FuelType;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.fuel_caps, FuelCapTable::default());
        assert_eq!(config.cache_capacity, 10_000);
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_cap_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("FLEET_CARD_CAP_DIESEL", "135.50"),
            ("FLEET_CARD_CAP_ELECTRIC", " 80 "),
        ]))
        .unwrap();

        assert_eq!(config.fuel_caps.cap_for(Some(FuelType::Diesel)), dec!(135.50));
        assert_eq!(config.fuel_caps.cap_for(Some(FuelType::Electric)), dec!(80));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Config::from_lookup(lookup(&[("SETTLEMENT_CACHE_CAPACITY", "lots")])).unwrap_err();
        assert_eq!(err.key, "SETTLEMENT_CACHE_CAPACITY");

        let err = Config::from_lookup(lookup(&[("FLEET_CARD_CAP_DIESEL", "-1")])).unwrap_err();
        assert_eq!(err.key, "FLEET_CARD_CAP_DIESEL");

        let err = Config::from_lookup(lookup(&[(
            "FLEET_CARD_CAP_ELECTRIC",
            "79228162514264337593543950335",
        )]))
        .unwrap_err();
        assert_eq!(err.key, "FLEET_CARD_CAP_ELECTRIC");
    }
}
