//! Dispatch record types.
//!
//! These are flat, directly serializable shapes. Field names follow the
//! camelCase layout used by the entry forms and the persisted snapshot.

use chrono::NaiveDate;
use dispatch_shared::types::{CompanyId, DriverId, TransferId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::distance::Distance;

/// Trip type of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripType {
    /// Single trip from origin to destination.
    #[serde(rename = "IDA", alias = "one_way")]
    OneWay,
    /// Outbound trip and return trip.
    #[serde(rename = "IDA Y VUELTA", alias = "round_trip")]
    RoundTrip,
    /// One-way trip with intermediate stops, billed as a single leg.
    #[serde(rename = "IDA MULTIPLE", alias = "multiple_stop")]
    MultipleStop,
}

impl TripType {
    /// Label used on screens and in exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneWay => "IDA",
            Self::RoundTrip => "IDA Y VUELTA",
            Self::MultipleStop => "IDA MULTIPLE",
        }
    }
}

/// Lifecycle status of a transfer.
///
/// Annulment is the only supported removal: annulled transfers stay in the
/// log but are excluded from every settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Trip was performed.
    #[serde(rename = "Realizado", alias = "completed")]
    Completed,
    /// Trip was cancelled.
    #[serde(rename = "Anulado", alias = "annulled")]
    Annulled,
}

impl TransferStatus {
    /// Label used on screens and in exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Realizado",
            Self::Annulled => "Anulado",
        }
    }
}

/// Billing or payout rates of a driver or company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateProfile {
    /// Price per kilometre beyond the flat-rate coverage.
    pub cost_per_km: Decimal,
    /// Flat segment rate charged on every leg.
    pub fixed_rate: Decimal,
    /// Price per hour of waiting.
    pub waiting_hour_cost: Decimal,
}

impl RateProfile {
    /// Profile with every rate at zero, used when a reference cannot be resolved.
    pub const ZERO: Self = Self {
        cost_per_km: Decimal::ZERO,
        fixed_rate: Decimal::ZERO,
        waiting_hour_cost: Decimal::ZERO,
    };

    /// Creates a rate profile.
    #[must_use]
    pub const fn new(cost_per_km: Decimal, fixed_rate: Decimal, waiting_hour_cost: Decimal) -> Self {
        Self {
            cost_per_km,
            fixed_rate,
            waiting_hour_cost,
        }
    }

    /// Same profile with negative rates clamped to zero.
    #[must_use]
    pub fn non_negative(self) -> Self {
        Self {
            cost_per_km: self.cost_per_km.max(Decimal::ZERO),
            fixed_rate: self.fixed_rate.max(Decimal::ZERO),
            waiting_hour_cost: self.waiting_hour_cost.max(Decimal::ZERO),
        }
    }
}

/// A driver performing transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Driver ID.
    pub id: DriverId,
    /// Full name.
    pub name: String,
    /// National identity document number.
    #[serde(default)]
    pub dni: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Driving licence expiry, `YYYY-MM-DD` as entered.
    #[serde(default)]
    pub license_expiry: String,
    /// Payout rates.
    #[serde(flatten)]
    pub rates: RateProfile,
}

/// A contracting company billed for transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company ID.
    pub id: CompanyId,
    /// Company name.
    pub name: String,
    /// Tax identifier.
    #[serde(default)]
    pub cuit: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Contact person.
    #[serde(default)]
    pub contact: String,
    /// Billing rates.
    #[serde(flatten)]
    pub rates: RateProfile,
}

/// A single dispatch record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Record ID.
    pub id: TransferId,
    /// Internal reference.
    #[serde(default)]
    pub internal_id: String,
    /// Transfer number assigned by the company.
    #[serde(default)]
    pub transfer_number: String,
    /// Insurance claim number.
    #[serde(default)]
    pub claim_number: String,
    /// Trip date.
    pub date: NaiveDate,
    /// Pickup time, `HH:MM` as entered.
    #[serde(default)]
    pub time: String,
    /// Patient name.
    #[serde(default)]
    pub patient_name: String,
    /// Patient phone.
    #[serde(default)]
    pub patient_phone: String,
    /// Driver who performed the transfer.
    pub driver_id: DriverId,
    /// Company billed for the transfer.
    pub company_id: CompanyId,
    /// Contract (insurer) label the transfer is billed under.
    #[serde(default)]
    pub art: String,
    /// Trip type.
    pub trip_type: TripType,
    /// Origin city.
    #[serde(default)]
    pub origin_city: String,
    /// Origin street address.
    #[serde(default)]
    pub origin_address: String,
    /// Destination city.
    #[serde(default)]
    pub destination_city: String,
    /// Destination street address.
    #[serde(default)]
    pub destination_address: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Whether billable waiting time occurred.
    #[serde(default)]
    pub waiting: bool,
    /// Lifecycle status.
    pub status: TransferStatus,
    /// Recorded distance in kilometres.
    #[serde(default)]
    pub km: Distance,
    /// Recorded waiting duration in hours, when captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_hours: Option<Decimal>,
    /// Miscellaneous expenses (tolls, parking), when captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misc_expenses: Option<Decimal>,
}

impl Transfer {
    /// Returns true if the transfer is excluded from settlement.
    #[must_use]
    pub fn is_annulled(&self) -> bool {
        self.status == TransferStatus::Annulled
    }

    /// Origin as `"<address>, <city>"`.
    #[must_use]
    pub fn origin_label(&self) -> String {
        place_label(&self.origin_address, &self.origin_city)
    }

    /// Destination as `"<address>, <city>"`.
    #[must_use]
    pub fn destination_label(&self) -> String {
        place_label(&self.destination_address, &self.destination_city)
    }
}

fn place_label(address: &str, city: &str) -> String {
    match (address.trim(), city.trim()) {
        ("", city) => city.to_owned(),
        (address, "") => address.to_owned(),
        (address, city) => format!("{address}, {city}"),
    }
}

/// Immutable input of one settlement computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Transfer log.
    pub transfers: Vec<Transfer>,
    /// Known drivers.
    pub drivers: Vec<Driver>,
    /// Known companies.
    pub companies: Vec<Company>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TRANSFER_JSON: &str = r#"{
        "id": "trans1", "internalId": "INT001", "transferNumber": "TRN001",
        "claimNumber": "SIN001", "date": "2024-07-20", "time": "10:00",
        "patientName": "Ana Martinez", "patientPhone": "1122334455",
        "driverId": "driv1", "companyId": "comp1", "art": "Prevencion ART",
        "tripType": "IDA Y VUELTA", "originCity": "Buenos Aires",
        "originAddress": "Av. Corrientes 1234", "destinationCity": "La Plata",
        "destinationAddress": "Calle 7 567", "notes": "Paciente estable",
        "waiting": true, "status": "Realizado", "km": 60
    }"#;

    #[test]
    fn test_transfer_deserialize() {
        let transfer: Transfer = serde_json::from_str(TRANSFER_JSON).unwrap();
        assert_eq!(transfer.id, TransferId::new("trans1"));
        assert_eq!(transfer.trip_type, TripType::RoundTrip);
        assert_eq!(transfer.status, TransferStatus::Completed);
        assert_eq!(transfer.km, Distance::km(dec!(60)));
        assert_eq!(transfer.waiting_hours, None);
        assert!(transfer.waiting);
        assert!(!transfer.is_annulled());
    }

    #[test]
    fn test_transfer_without_km() {
        let json = TRANSFER_JSON.replace(r#", "km": 60"#, "");
        let transfer: Transfer = serde_json::from_str(&json).unwrap();
        assert_eq!(transfer.km, Distance::Missing);
    }

    #[test]
    fn test_place_labels() {
        let transfer: Transfer = serde_json::from_str(TRANSFER_JSON).unwrap();
        assert_eq!(transfer.origin_label(), "Av. Corrientes 1234, Buenos Aires");
        assert_eq!(transfer.destination_label(), "Calle 7 567, La Plata");
        assert_eq!(place_label("", "Quilmes"), "Quilmes");
        assert_eq!(place_label("Maipu 200", " "), "Maipu 200");
    }

    #[test]
    fn test_driver_flattened_rates() {
        let json = r#"{
            "id": "driv1", "name": "Carlos Rodriguez", "dni": "25123456",
            "phone": "1155667788", "email": "c.rodriguez@email.com",
            "licenseExpiry": "2025-12-31",
            "costPerKm": 100, "fixedRate": 3000, "waitingHourCost": 800
        }"#;
        let driver: Driver = serde_json::from_str(json).unwrap();
        assert_eq!(
            driver.rates,
            RateProfile::new(dec!(100), dec!(3000), dec!(800))
        );
    }

    #[test]
    fn test_status_aliases() {
        let annulled: TransferStatus = serde_json::from_str("\"annulled\"").unwrap();
        assert_eq!(annulled, TransferStatus::Annulled);
        assert_eq!(
            serde_json::to_string(&TransferStatus::Annulled).unwrap(),
            "\"Anulado\""
        );
    }

    #[test]
    fn test_rate_profile_non_negative() {
        let profile = RateProfile::new(dec!(-1), dec!(10), dec!(-5)).non_negative();
        assert_eq!(profile, RateProfile::new(dec!(0), dec!(10), dec!(0)));
    }

    #[test]
    fn test_snapshot_defaults_to_empty() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.transfers.is_empty());
        assert!(snapshot.drivers.is_empty());
        assert!(snapshot.companies.is_empty());
    }
}
