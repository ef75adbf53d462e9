//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount, expressed in major units (e.g. pesos, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "ARS", "USD").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Argentine Peso
    #[default]
    Ars,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
}

impl Currency {
    /// Number of decimal places in the currency's minor unit.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::Ars | Self::Usd | Self::Eur => 2,
        }
    }

    /// Rounds an amount to this currency's minor unit.
    ///
    /// Uses banker's rounding, and the result always carries exactly
    /// `minor_units()` decimal places so it renders as `3000.00`.
    #[must_use]
    pub fn round(self, amount: Decimal) -> Decimal {
        let mut rounded =
            amount.round_dp_with_strategy(self.minor_units(), RoundingStrategy::MidpointNearestEven);
        rounded.rescale(self.minor_units());
        rounded
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.currency.round(self.amount), self.currency)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ars => write!(f, "ARS"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ARS" => Ok(Self::Ars),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_money_new() {
        let amount = dec!(100.00);
        let money = Money::new(amount, Currency::Ars);
        assert_eq!(money.amount, amount);
        assert_eq!(money.currency, Currency::Ars);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(dec!(1500.5), Currency::Ars).to_string(), "1500.50 ARS");
        assert_eq!(Money::new(dec!(7), Currency::Usd).to_string(), "7.00 USD");
    }

    #[test]
    fn test_currency_round_bankers() {
        assert_eq!(Currency::Ars.round(dec!(1.005)), dec!(1.00));
        assert_eq!(Currency::Ars.round(dec!(1.015)), dec!(1.02));
        assert_eq!(Currency::Ars.round(dec!(1.2349)), dec!(1.23));
        assert_eq!(Currency::Ars.round(dec!(3000)).to_string(), "3000.00");
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Ars.to_string(), "ARS");
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Eur.to_string(), "EUR");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("ARS").unwrap(), Currency::Ars);
        assert_eq!(Currency::from_str("ars").unwrap(), Currency::Ars);
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("EUR").unwrap(), Currency::Eur);

        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }
}
