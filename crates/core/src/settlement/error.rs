//! Settlement error types.

use chrono::NaiveDate;
use dispatch_shared::AppError;
use dispatch_shared::types::{CompanyId, DriverId, TransferId};
use serde::Serialize;
use thiserror::Error;

use super::pricer::PriceComponent;
use crate::access::Role;

/// Request-level settlement errors.
///
/// Record-level problems never abort a run; they surface as [`SettlementWarning`].
#[derive(Debug, Error)]
pub enum SettlementError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Role may not view settlements.
    #[error("Role {role} may not view settlements")]
    Forbidden {
        /// Requesting role.
        role: Role,
    },

    /// A statement total does not fit in a `Decimal`.
    #[error("The {statement} statement total exceeds the representable amount")]
    TotalOverflow {
        /// `company` or `driver`.
        statement: &'static str,
    },
}

impl From<SettlementError> for AppError {
    fn from(value: SettlementError) -> Self {
        match value {
            SettlementError::InvalidDateRange { .. } | SettlementError::TotalOverflow { .. } => {
                Self::Validation(value.to_string())
            }
            SettlementError::Forbidden { .. } => Self::Forbidden(value.to_string()),
        }
    }
}

/// Non-fatal problem found while settling one transfer.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettlementWarning {
    /// Transfer references a driver absent from the snapshot.
    #[error("Transfer {transfer} references unknown driver {driver_id}; priced at zero rate")]
    MissingDriver {
        /// Transfer ID.
        transfer: TransferId,
        /// Dangling driver ID.
        driver_id: DriverId,
    },

    /// Transfer references a company absent from the snapshot.
    #[error("Transfer {transfer} references unknown company {company_id}; priced at zero rate")]
    MissingCompany {
        /// Transfer ID.
        transfer: TransferId,
        /// Dangling company ID.
        company_id: CompanyId,
    },

    /// Distance is negative or not a number.
    #[error("Transfer {transfer} has invalid distance {raw:?}; priced as 0 km")]
    InvalidDistance {
        /// Transfer ID.
        transfer: TransferId,
        /// Value as recorded.
        raw: String,
    },

    /// An amount on the transfer is too large to compute.
    #[error("Transfer {transfer} overflows the {component} amount; priced as 0")]
    AmountOverflow {
        /// Transfer ID.
        transfer: TransferId,
        /// Component that overflowed.
        component: PriceComponent,
    },
}

impl SettlementWarning {
    /// Transfer the warning refers to.
    #[must_use]
    pub fn transfer(&self) -> &TransferId {
        match self {
            Self::MissingDriver { transfer, .. }
            | Self::MissingCompany { transfer, .. }
            | Self::InvalidDistance { transfer, .. }
            | Self::AmountOverflow { transfer, .. } => transfer,
        }
    }
}
