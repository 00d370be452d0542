use chrono_tz::Tz;

use super::{
    constants::{
        config::{DEPOSIT_RATE_KEY, PAYROLL_RATE_KEY, TIME_ZONE_DEFAULT, TIME_ZONE_KEY},
        currency::{DEPOSIT_EXCHANGE_RATE, PAYROLL_EXCHANGE_RATE},
    },
    utils::time::parse_time_zone,
};

// Runtime settings. Values missing from the environment fall back to the constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerConfig {
    pub deposit_exchange_rate: f64,
    pub payroll_exchange_rate: f64,
    pub time_zone: Tz,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            deposit_exchange_rate: DEPOSIT_EXCHANGE_RATE,
            payroll_exchange_rate: PAYROLL_EXCHANGE_RATE,
            time_zone: parse_time_zone(TIME_ZONE_DEFAULT).unwrap_or(chrono_tz::UTC),
        }
    }
}

impl LedgerConfig {
    // Reads settings from the process environment. Does not return an error, assumes defaults.
    pub fn from_env() -> LedgerConfig {
        LedgerConfig::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> LedgerConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LedgerConfig::default();
        LedgerConfig {
            deposit_exchange_rate: read_rate(
                &lookup,
                DEPOSIT_RATE_KEY,
                defaults.deposit_exchange_rate,
            ),
            payroll_exchange_rate: read_rate(
                &lookup,
                PAYROLL_RATE_KEY,
                defaults.payroll_exchange_rate,
            ),
            time_zone: match lookup(TIME_ZONE_KEY) {
                Some(name) => parse_time_zone(&name).unwrap_or_else(|| {
                    log::warn!(
                        "Unknown time zone {:?} in {}, using {}",
                        name,
                        TIME_ZONE_KEY,
                        defaults.time_zone
                    );
                    defaults.time_zone
                }),
                None => defaults.time_zone,
            },
        }
    }
}

fn read_rate<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(key) {
        Some(raw) => raw,
        None => return default,
    };

    match raw.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate > 0.0 => rate,
        _ => {
            log::warn!("Invalid rate {:?} in {}, using {}", raw, key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_keep_both_rates() {
        let config = LedgerConfig::from_lookup(|_| None);
        assert_eq!(config.deposit_exchange_rate, 132.0);
        assert_eq!(config.payroll_exchange_rate, 130.0);
        assert_eq!(config.time_zone, chrono_tz::America::PortauPrince);
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            (DEPOSIT_RATE_KEY, "135.5"),
            (TIME_ZONE_KEY, "UTC"),
        ]));
        assert_eq!(config.deposit_exchange_rate, 135.5);
        assert_eq!(config.payroll_exchange_rate, 130.0);
        assert_eq!(config.time_zone, chrono_tz::UTC);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            (DEPOSIT_RATE_KEY, "lots"),
            (PAYROLL_RATE_KEY, "-3"),
            (TIME_ZONE_KEY, "Nowhere/Land"),
        ]));
        assert_eq!(config, LedgerConfig::default());
    }
}
