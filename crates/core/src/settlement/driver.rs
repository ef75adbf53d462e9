//! Driver-facing settlement rows.

use super::types::{DriverSettlementRow, PricedLeg};

/// Folds driver-priced legs into payout rows.
pub struct DriverSettlementBuilder;

impl DriverSettlementBuilder {
    /// Builds one row per leg, in the same order as company rows.
    #[must_use]
    pub fn build(legs: &[PricedLeg<'_>]) -> Vec<DriverSettlementRow> {
        let mut keyed: Vec<(&str, DriverSettlementRow)> = legs
            .iter()
            .map(|priced| (priced.leg.transfer.transfer_number.as_str(), Self::row(priced)))
            .collect();
        keyed.sort_by(|(a_number, a), (b_number, b)| {
            a.date.cmp(&b.date).then_with(|| a_number.cmp(b_number))
        });
        keyed.into_iter().map(|(_, row)| row).collect()
    }

    fn row(priced: &PricedLeg<'_>) -> DriverSettlementRow {
        let leg = &priced.leg;
        let transfer = leg.transfer;

        DriverSettlementRow {
            date: transfer.date,
            patient_name: transfer.patient_name.clone(),
            from: leg.from.clone(),
            to: leg.to.clone(),
            is_outbound: leg.direction.is_outbound(),
            is_return: leg.direction.is_return(),
            waiting: leg.waiting,
            expenses: priced.price.misc_expenses,
            art: priced.contract.clone(),
            total: priced.price.total,
        }
    }
}
