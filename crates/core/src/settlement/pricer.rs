//! Two-tier leg pricing.
//!
//! - Urban: the flat segment rate, charged on every leg.
//! - Interurban: kilometres beyond the flat-rate coverage, at the per-km rate.
//! - Waiting: billed hours at the waiting-hour rate, on legs that carry waiting.
//!
//! Each component is rounded to the currency minor unit on its own and the
//! total is their sum.

use std::fmt;

use dispatch_shared::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Leg, LegPrice};
use crate::records::RateProfile;

/// Pricing inputs that are business decisions rather than record data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Kilometres covered by the flat segment rate.
    pub flat_rate_coverage_km: Decimal,
    /// Hours billed when waiting is flagged but no duration was recorded.
    pub default_waiting_hours: Decimal,
    /// Currency used for rounding.
    pub currency: Currency,
}

impl PricingPolicy {
    /// Creates a policy. Negative inputs are clamped to zero.
    #[must_use]
    pub fn new(flat_rate_coverage_km: Decimal, default_waiting_hours: Decimal) -> Self {
        Self {
            flat_rate_coverage_km: flat_rate_coverage_km.max(Decimal::ZERO),
            default_waiting_hours: default_waiting_hours.max(Decimal::ZERO),
            currency: Currency::default(),
        }
    }

    /// Same policy rounding in another currency.
    #[must_use]
    pub const fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

/// Amount of a leg that can exceed the `Decimal` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceComponent {
    /// Kilometres beyond coverage times the per-km rate.
    Interurban,
    /// Waiting hours times the waiting-hour rate.
    Waiting,
    /// Sum of all components.
    Total,
}

impl fmt::Display for PriceComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interurban => f.write_str("interurban"),
            Self::Waiting => f.write_str("waiting"),
            Self::Total => f.write_str("total"),
        }
    }
}

/// Result of pricing one leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Priced components.
    pub price: LegPrice,
    /// Components priced as zero because they overflowed.
    pub overflowed: Vec<PriceComponent>,
}

/// Prices legs under a [`PricingPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct LegPricer {
    policy: PricingPolicy,
}

impl LegPricer {
    /// Creates a pricer.
    #[must_use]
    pub const fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy.
    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Prices one leg with the given rates.
    ///
    /// A component whose amount does not fit in a `Decimal` is priced as zero
    /// and listed in [`Quote::overflowed`]. If the components fit but their sum
    /// does not, the whole leg is priced as zero.
    #[must_use]
    pub fn price(&self, leg: &Leg<'_>, rates: &RateProfile) -> Quote {
        let currency = self.policy.currency;
        let mut overflowed = Vec::new();
        let mut checked = |component: PriceComponent, amount: Option<Decimal>| {
            amount.map_or_else(
                || {
                    overflowed.push(component);
                    Decimal::ZERO
                },
                |amount| currency.round(amount),
            )
        };

        let urban = currency.round(rates.fixed_rate);
        let interurban = checked(
            PriceComponent::Interurban,
            self.excess_km(leg.km).checked_mul(rates.cost_per_km),
        );

        let waiting_hours = leg
            .bills_waiting
            .then(|| self.waiting_hours(leg.transfer.waiting_hours));
        let waiting = waiting_hours.map_or(Decimal::ZERO, |hours| {
            checked(
                PriceComponent::Waiting,
                hours.checked_mul(rates.waiting_hour_cost),
            )
        });

        let misc_expenses = currency.round(leg.misc_expenses);
        let total = urban
            .checked_add(interurban)
            .and_then(|sum| sum.checked_add(waiting))
            .and_then(|sum| sum.checked_add(misc_expenses));

        let price = match total {
            Some(total) => LegPrice {
                urban,
                interurban,
                waiting_hours,
                waiting,
                misc_expenses,
                total: currency.round(total),
            },
            None => {
                overflowed.push(PriceComponent::Total);
                LegPrice::zero(waiting_hours)
            }
        };

        Quote { price, overflowed }
    }

    /// Kilometres billed per km: whatever exceeds the flat-rate coverage.
    #[must_use]
    pub fn excess_km(&self, km: Decimal) -> Decimal {
        (km - self.policy.flat_rate_coverage_km).max(Decimal::ZERO)
    }

    fn waiting_hours(&self, recorded: Option<Decimal>) -> Decimal {
        match recorded {
            Some(hours) if hours > Decimal::ZERO => hours,
            _ => self.policy.default_waiting_hours,
        }
    }
}
