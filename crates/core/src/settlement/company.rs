//! Company-facing settlement rows.

use super::types::{PricedLeg, SettlementRow};

/// Folds company-priced legs into billing rows.
pub struct CompanySettlementBuilder;

impl CompanySettlementBuilder {
    /// Builds one row per leg, ordered by date then transfer number.
    ///
    /// The sort is stable, so the outbound leg of a round trip stays right
    /// before its return leg.
    #[must_use]
    pub fn build(legs: &[PricedLeg<'_>]) -> Vec<SettlementRow> {
        let mut rows: Vec<SettlementRow> = legs.iter().map(Self::row).collect();
        rows.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.transfer_number.cmp(&b.transfer_number))
        });
        rows
    }

    fn row(priced: &PricedLeg<'_>) -> SettlementRow {
        let leg = &priced.leg;
        let transfer = leg.transfer;
        let price = &priced.price;

        SettlementRow {
            date: transfer.date,
            transfer_number: transfer.transfer_number.clone(),
            claim_number: transfer.claim_number.clone(),
            patient_name: transfer.patient_name.clone(),
            origin: leg.from.clone(),
            destination: leg.to.clone(),
            km: leg.km,
            urban_amount: price.urban,
            interurban_amount: price.interurban,
            waiting_time: price.waiting_hours,
            waiting_amount: price.waiting,
            misc_expenses: price.misc_expenses,
            total_amount: price.total,
            trip_part: leg.direction.trip_part(),
        }
    }
}
