//! Settlement totals.

use std::collections::BTreeMap;

use dispatch_shared::types::{Currency, Money};
use rust_decimal::Decimal;

use super::types::{DriverSettlementRow, EntityTotal, PricedLeg, SettlementRow};

/// A row that contributes an amount to a statement total.
pub trait RowTotal {
    /// Amount of this row.
    fn row_total(&self) -> Decimal;
}

impl RowTotal for SettlementRow {
    fn row_total(&self) -> Decimal {
        self.total_amount
    }
}

impl RowTotal for DriverSettlementRow {
    fn row_total(&self) -> Decimal {
        self.total
    }
}

/// Sums statement rows.
pub struct TotalsReducer;

impl TotalsReducer {
    /// Sums the totals of any rows. Empty input yields zero.
    ///
    /// Returns `None` if the sum overflows.
    #[must_use]
    pub fn total<R: RowTotal>(rows: &[R], currency: Currency) -> Option<Money> {
        let amount = rows
            .iter()
            .try_fold(Decimal::ZERO, |sum, row| sum.checked_add(row.row_total()))?;
        Some(Money::new(currency.round(amount), currency))
    }

    /// Grand total billable to companies.
    #[must_use]
    pub fn company_total(rows: &[SettlementRow], currency: Currency) -> Option<Money> {
        Self::total(rows, currency)
    }

    /// Grand total payable to drivers.
    #[must_use]
    pub fn driver_total(rows: &[DriverSettlementRow], currency: Currency) -> Option<Money> {
        Self::total(rows, currency)
    }

    /// Subtotals per party, ordered by label then ID.
    ///
    /// Returns `None` if any party's sum overflows.
    #[must_use]
    pub fn by_entity(legs: &[PricedLeg<'_>]) -> Option<Vec<EntityTotal>> {
        let mut grouped: BTreeMap<(&str, &str), (usize, Decimal)> = BTreeMap::new();
        for priced in legs {
            let entry = grouped
                .entry((priced.party.label.as_str(), priced.party.id.as_str()))
                .or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 = entry.1.checked_add(priced.price.total)?;
        }

        Some(
            grouped
                .into_iter()
                .map(|((label, id), (legs, total))| EntityTotal {
                    id: id.to_owned(),
                    label: label.to_owned(),
                    legs,
                    total,
                })
                .collect(),
        )
    }
}
