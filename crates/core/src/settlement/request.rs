//! Settlement request filters.

use chrono::NaiveDate;
use dispatch_shared::types::{CompanyId, DriverId};
use serde::{Deserialize, Serialize};

use super::error::SettlementError;
use crate::records::Transfer;

/// Which transfers a settlement covers.
///
/// The period applies to both statements. The company filter narrows company
/// rows only and the driver filter narrows driver rows only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRequest {
    /// First included date.
    pub period_start: Option<NaiveDate>,
    /// Last included date.
    pub period_end: Option<NaiveDate>,
    /// Restrict company rows to one company.
    pub company_id: Option<CompanyId>,
    /// Restrict driver rows to one driver.
    pub driver_id: Option<DriverId>,
}

impl SettlementRequest {
    /// Creates an unfiltered request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive period.
    #[must_use]
    pub const fn with_period(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.period_start = start;
        self.period_end = end;
        self
    }

    /// Restricts company rows.
    #[must_use]
    pub fn with_company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Restricts driver rows.
    #[must_use]
    pub fn with_driver(mut self, driver_id: DriverId) -> Self {
        self.driver_id = Some(driver_id);
        self
    }

    /// Rejects a period whose start is after its end.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when both bounds are set and out of order.
    pub fn validate(&self) -> Result<(), SettlementError> {
        match (self.period_start, self.period_end) {
            (Some(start), Some(end)) if start > end => {
                Err(SettlementError::InvalidDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// Returns true if the transfer date falls in the period.
    #[must_use]
    pub fn includes_date(&self, transfer: &Transfer) -> bool {
        self.period_start.is_none_or(|start| transfer.date >= start)
            && self.period_end.is_none_or(|end| transfer.date <= end)
    }

    /// Returns true if the transfer belongs on the company statement.
    #[must_use]
    pub fn includes_company(&self, transfer: &Transfer) -> bool {
        self.company_id
            .as_ref()
            .is_none_or(|id| *id == transfer.company_id)
    }

    /// Returns true if the transfer belongs on the driver statement.
    #[must_use]
    pub fn includes_driver(&self, transfer: &Transfer) -> bool {
        self.driver_id
            .as_ref()
            .is_none_or(|id| *id == transfer.driver_id)
    }
}
