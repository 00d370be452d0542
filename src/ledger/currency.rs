use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::currency::{CURRENCIES, CURRENCY_DEFAULT};

// Currencies accepted at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Htg,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Htg => CURRENCIES[0].0,
            Currency::Usd => CURRENCIES[1].0,
        }
    }

    pub fn decimal_places(&self) -> i32 {
        match self {
            Currency::Htg => CURRENCIES[0].1,
            Currency::Usd => CURRENCIES[1].1,
        }
    }

    // Amount in minor units (cents), rounded to the nearest unit.
    pub fn to_minor(&self, amount: f64) -> i64 {
        (amount * 10.0_f64.powi(self.decimal_places())).round() as i64
    }

    pub fn from_minor(&self, minor: i64) -> f64 {
        minor as f64 / 10.0_f64.powi(self.decimal_places())
    }

    pub fn is_usd(&self) -> bool {
        *self == Currency::Usd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

pub fn get_currency_from_code(code: &str) -> Option<Currency> {
    let code = code.trim().to_uppercase();
    if code == CURRENCIES[0].0 {
        Some(Currency::Htg)
    } else if code == CURRENCIES[1].0 {
        Some(Currency::Usd)
    } else {
        None
    }
}

pub fn get_default_currency() -> Currency {
    get_currency_from_code(CURRENCY_DEFAULT.0).unwrap_or(Currency::Htg)
}

// HTG equivalent of an amount. Only USD is scaled; the rate is HTG per USD.
pub fn convert_to_htg(amount: f64, currency: Currency, rate: f64) -> f64 {
    match currency {
        Currency::Htg => amount,
        Currency::Usd => amount * rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_lookup_is_case_insensitive() {
        assert_eq!(get_currency_from_code("usd"), Some(Currency::Usd));
        assert_eq!(get_currency_from_code(" Htg "), Some(Currency::Htg));
        assert_eq!(get_currency_from_code("EUR"), None);
    }

    #[test]
    fn test_default_currency() {
        assert_eq!(get_default_currency(), Currency::Htg);
        assert_eq!(get_default_currency().decimal_places(), 2);
    }

    #[test]
    fn test_convert_to_htg() {
        assert_eq!(convert_to_htg(10.0, Currency::Usd, 132.0), 1320.0);
        assert_eq!(convert_to_htg(10.0, Currency::Htg, 132.0), 10.0);
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(Currency::Usd.to_minor(0.1) + Currency::Usd.to_minor(0.2), 30);
        assert_eq!(Currency::Htg.to_minor(1250.5), 125050);
        assert_eq!(Currency::Htg.from_minor(30000), 300.0);
    }

    #[test]
    fn test_currency_serializes_as_code() {
        let json = serde_json::to_string(&Currency::Usd).unwrap();
        assert_eq!(json, "\"USD\"");
        let back: Currency = serde_json::from_str("\"HTG\"").unwrap();
        assert_eq!(back, Currency::Htg);
    }
}
