//! Settlement data types.

use chrono::NaiveDate;
use dispatch_shared::types::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::SettlementWarning;
use crate::records::Transfer;

/// Direction of a leg within its transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegDirection {
    /// The only leg of a one-way or multiple-stop transfer.
    Single,
    /// Origin to destination leg of a round trip.
    Outbound,
    /// Destination to origin leg of a round trip.
    Return,
}

impl LegDirection {
    /// Row tag shown on company statements. Only round-trip legs are tagged.
    #[must_use]
    pub const fn trip_part(self) -> Option<TripPart> {
        match self {
            Self::Single => None,
            Self::Outbound => Some(TripPart::A),
            Self::Return => Some(TripPart::B),
        }
    }

    /// Returns true for the outbound leg of a round trip.
    #[must_use]
    pub const fn is_outbound(self) -> bool {
        matches!(self, Self::Outbound)
    }

    /// Returns true for the return leg of a round trip.
    #[must_use]
    pub const fn is_return(self) -> bool {
        matches!(self, Self::Return)
    }
}

/// Round-trip leg tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TripPart {
    /// Outbound leg.
    A,
    /// Return leg.
    B,
}

impl std::fmt::Display for TripPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// One directional segment of a transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg<'t> {
    /// Transfer the leg belongs to.
    pub transfer: &'t Transfer,
    /// Direction within the transfer.
    pub direction: LegDirection,
    /// Departure place label.
    pub from: String,
    /// Arrival place label.
    pub to: String,
    /// Kilometres to price. Never negative.
    pub km: Decimal,
    /// Waiting flag inherited from the transfer.
    pub waiting: bool,
    /// Whether this leg carries the transfer's waiting surcharge.
    pub bills_waiting: bool,
    /// Miscellaneous expenses attributed to this leg.
    pub misc_expenses: Decimal,
}

/// Price of one leg under one rate profile.
///
/// Components are computed independently and only summed, so a reviewer can
/// see which portion of the total is flat, distance-based, or waiting-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegPrice {
    /// Flat segment rate.
    pub urban: Decimal,
    /// Per-kilometre amount beyond the flat-rate coverage.
    pub interurban: Decimal,
    /// Billed waiting hours, when the leg carries waiting.
    pub waiting_hours: Option<Decimal>,
    /// Waiting surcharge.
    pub waiting: Decimal,
    /// Miscellaneous expenses.
    pub misc_expenses: Decimal,
    /// Sum of the four components.
    pub total: Decimal,
}

impl LegPrice {
    /// A price with every amount at zero.
    #[must_use]
    pub const fn zero(waiting_hours: Option<Decimal>) -> Self {
        Self {
            urban: Decimal::ZERO,
            interurban: Decimal::ZERO,
            waiting_hours,
            waiting: Decimal::ZERO,
            misc_expenses: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// The party a priced leg is billed to or paid to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Referenced ID as it appears on the transfer.
    pub id: String,
    /// Display label; the placeholder when the reference is dangling.
    pub label: String,
    /// False when the ID was not found in the snapshot.
    pub resolved: bool,
}

/// A leg priced for one side of the settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLeg<'t> {
    /// The leg.
    pub leg: Leg<'t>,
    /// Price under the party's rate profile.
    pub price: LegPrice,
    /// Company (billing side) or driver (payout side).
    pub party: Party,
    /// Contract label shown to drivers.
    pub contract: String,
}

/// Company-facing settlement row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRow {
    /// Trip date.
    pub date: NaiveDate,
    /// Transfer number.
    pub transfer_number: String,
    /// Claim number.
    pub claim_number: String,
    /// Patient name.
    pub patient_name: String,
    /// Departure place.
    pub origin: String,
    /// Arrival place.
    pub destination: String,
    /// Priced kilometres.
    pub km: Decimal,
    /// Flat-rate amount.
    pub urban_amount: Decimal,
    /// Distance-rate amount.
    pub interurban_amount: Decimal,
    /// Billed waiting hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_time: Option<Decimal>,
    /// Waiting amount.
    pub waiting_amount: Decimal,
    /// Miscellaneous expenses.
    pub misc_expenses: Decimal,
    /// Row total.
    pub total_amount: Decimal,
    /// Round-trip tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_part: Option<TripPart>,
}

/// Driver-facing settlement row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSettlementRow {
    /// Trip date.
    pub date: NaiveDate,
    /// Patient name.
    pub patient_name: String,
    /// Departure place.
    pub from: String,
    /// Arrival place.
    pub to: String,
    /// Outbound leg of a round trip.
    pub is_outbound: bool,
    /// Return leg of a round trip.
    pub is_return: bool,
    /// Waiting flag of the transfer.
    pub waiting: bool,
    /// Expenses reimbursed to the driver.
    pub expenses: Decimal,
    /// Contract label of the originating company.
    pub art: String,
    /// Row total.
    pub total: Decimal,
}

/// Subtotal for one company or driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTotal {
    /// Referenced ID.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Number of legs.
    pub legs: usize,
    /// Sum of leg totals.
    pub total: Decimal,
}

/// Result of one settlement computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRun {
    /// Company statement rows.
    pub company_rows: Vec<SettlementRow>,
    /// Driver statement rows.
    pub driver_rows: Vec<DriverSettlementRow>,
    /// Company grand total.
    pub company_total: Money,
    /// Driver grand total.
    pub driver_total: Money,
    /// Per-company subtotals, ordered by label.
    pub company_subtotals: Vec<EntityTotal>,
    /// Per-driver subtotals, ordered by label.
    pub driver_subtotals: Vec<EntityTotal>,
    /// Row-level problems that were absorbed.
    pub warnings: Vec<SettlementWarning>,
}
