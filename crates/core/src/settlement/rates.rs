//! Rate profile resolution.

use std::collections::HashMap;

use dispatch_shared::types::{CompanyId, DriverId};

use super::types::Party;
use crate::records::{Company, Driver, RateProfile, Snapshot};

/// A resolved party and the rates to price it with.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Who the amounts belong to.
    pub party: Party,
    /// Rates, clamped to non-negative. Zero when the reference is dangling.
    pub rates: RateProfile,
}

/// Looks up driver and company rate profiles in a snapshot.
///
/// When an ID appears more than once, the first record wins.
pub struct RateResolver<'s> {
    drivers: HashMap<&'s str, &'s Driver>,
    companies: HashMap<&'s str, &'s Company>,
    placeholder: &'s str,
}

impl<'s> RateResolver<'s> {
    /// Indexes the snapshot's drivers and companies.
    #[must_use]
    pub fn new(snapshot: &'s Snapshot, placeholder: &'s str) -> Self {
        let mut drivers = HashMap::with_capacity(snapshot.drivers.len());
        for driver in &snapshot.drivers {
            drivers.entry(driver.id.as_str()).or_insert(driver);
        }

        let mut companies = HashMap::with_capacity(snapshot.companies.len());
        for company in &snapshot.companies {
            companies.entry(company.id.as_str()).or_insert(company);
        }

        Self {
            drivers,
            companies,
            placeholder,
        }
    }

    /// Resolves a driver reference.
    #[must_use]
    pub fn resolve_driver(&self, id: &DriverId) -> Resolution {
        match self.drivers.get(id.as_str()) {
            Some(driver) => Self::found(id.as_str(), &driver.name, driver.rates),
            None => self.dangling(id.as_str()),
        }
    }

    /// Resolves a company reference.
    #[must_use]
    pub fn resolve_company(&self, id: &CompanyId) -> Resolution {
        match self.companies.get(id.as_str()) {
            Some(company) => Self::found(id.as_str(), &company.name, company.rates),
            None => self.dangling(id.as_str()),
        }
    }

    fn found(id: &str, name: &str, rates: RateProfile) -> Resolution {
        Resolution {
            party: Party {
                id: id.to_owned(),
                label: name.to_owned(),
                resolved: true,
            },
            rates: rates.non_negative(),
        }
    }

    fn dangling(&self, id: &str) -> Resolution {
        Resolution {
            party: Party {
                id: id.to_owned(),
                label: self.placeholder.to_owned(),
                resolved: false,
            },
            rates: RateProfile::ZERO,
        }
    }
}
