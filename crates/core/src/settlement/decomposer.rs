//! Trip decomposition into directional legs.

use rust_decimal::Decimal;

use super::error::SettlementWarning;
use super::types::{Leg, LegDirection};
use crate::records::{Transfer, TripType};

/// Legs of one transfer plus any problem found while building them.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition<'t> {
    /// One leg, or two for a round trip (outbound first).
    pub legs: Vec<Leg<'t>>,
    /// Set when the recorded distance was unusable and priced as zero.
    pub warning: Option<SettlementWarning>,
}

/// Expands transfers into legs.
pub struct TripDecomposer;

impl TripDecomposer {
    /// Decomposes a transfer into its legs.
    ///
    /// Both legs of a round trip reuse the transfer's date, patient, distance
    /// and waiting flag. The waiting surcharge and miscellaneous expenses
    /// happen once per transfer, so only the first leg carries them.
    #[must_use]
    pub fn decompose(transfer: &Transfer) -> Decomposition<'_> {
        let km = transfer.km.billable_km();
        let warning = transfer
            .km
            .invalid_value()
            .map(|raw| SettlementWarning::InvalidDistance {
                transfer: transfer.id.clone(),
                raw,
            });

        let misc_expenses = transfer
            .misc_expenses
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO);
        let origin = transfer.origin_label();
        let destination = transfer.destination_label();

        let first = |direction: LegDirection, from: String, to: String| Leg {
            transfer,
            direction,
            from,
            to,
            km,
            waiting: transfer.waiting,
            bills_waiting: transfer.waiting,
            misc_expenses,
        };

        let legs = match transfer.trip_type {
            TripType::OneWay | TripType::MultipleStop => {
                vec![first(LegDirection::Single, origin, destination)]
            }
            TripType::RoundTrip => {
                let back = Leg {
                    transfer,
                    direction: LegDirection::Return,
                    from: destination.clone(),
                    to: origin.clone(),
                    km,
                    waiting: transfer.waiting,
                    bills_waiting: false,
                    misc_expenses: Decimal::ZERO,
                };
                vec![first(LegDirection::Outbound, origin, destination), back]
            }
        };

        Decomposition { legs, warning }
    }
}
