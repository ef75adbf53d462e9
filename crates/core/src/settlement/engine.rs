//! Settlement engine.

use dispatch_shared::{AppError, SettlementConfig};
use tracing::{debug, info, warn};

use super::company::CompanySettlementBuilder;
use super::decomposer::TripDecomposer;
use super::driver::DriverSettlementBuilder;
use super::error::{SettlementError, SettlementWarning};
use super::pricer::{LegPricer, PricingPolicy};
use super::rates::{RateResolver, Resolution};
use super::request::SettlementRequest;
use super::totals::TotalsReducer;
use super::types::{Leg, PricedLeg, SettlementRun};
use crate::records::{Snapshot, Transfer};

/// Default label for dangling driver or company references.
pub const DEFAULT_PLACEHOLDER: &str = "unknown";

/// Derives both statements from a snapshot.
///
/// Pure and synchronous: the same snapshot and request always produce the
/// same run.
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    pricer: LegPricer,
    placeholder_label: String,
}

impl SettlementEngine {
    /// Creates an engine with the default placeholder label.
    #[must_use]
    pub fn new(policy: PricingPolicy) -> Self {
        Self {
            pricer: LegPricer::new(policy),
            placeholder_label: DEFAULT_PLACEHOLDER.to_owned(),
        }
    }

    /// Builds an engine from the `settlement` config section.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a required value is missing or negative.
    pub fn from_config(config: &SettlementConfig) -> Result<Self, AppError> {
        let policy = PricingPolicy::new(
            config.require_flat_rate_coverage_km()?,
            config.require_default_waiting_hours()?,
        )
        .with_currency(config.currency);

        Ok(Self::new(policy).with_placeholder(config.placeholder_label.clone()))
    }

    /// Overrides the label used for dangling references.
    #[must_use]
    pub fn with_placeholder(mut self, label: impl Into<String>) -> Self {
        self.placeholder_label = label.into();
        self
    }

    /// Returns the pricing policy.
    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        self.pricer.policy()
    }

    /// Computes company and driver statements for the request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` for a reversed period and `TotalOverflow`
    /// when a statement sum does not fit in a `Decimal`. Record-level problems
    /// are reported as warnings on the run instead.
    pub fn compute(
        &self,
        snapshot: &Snapshot,
        request: &SettlementRequest,
    ) -> Result<SettlementRun, SettlementError> {
        request.validate()?;

        let resolver = RateResolver::new(snapshot, &self.placeholder_label);
        let mut company_legs = Vec::new();
        let mut driver_legs = Vec::new();
        let mut warnings = Vec::new();

        for transfer in &snapshot.transfers {
            if transfer.is_annulled() {
                debug!(transfer = %transfer.id, "Skipping annulled transfer");
                continue;
            }
            if !request.includes_date(transfer) {
                continue;
            }

            let on_company = request.includes_company(transfer);
            let on_driver = request.includes_driver(transfer);
            if !on_company && !on_driver {
                continue;
            }

            let decomposition = TripDecomposer::decompose(transfer);
            warnings.extend(decomposition.warning);

            let company = resolver.resolve_company(&transfer.company_id);
            let contract = contract_label(transfer, &company);

            if on_company {
                if !company.party.resolved {
                    warnings.push(SettlementWarning::MissingCompany {
                        transfer: transfer.id.clone(),
                        company_id: transfer.company_id.clone(),
                    });
                }
                company_legs.extend(self.price_legs(
                    &decomposition.legs,
                    &company,
                    &contract,
                    &mut warnings,
                ));
            }

            if on_driver {
                let driver = resolver.resolve_driver(&transfer.driver_id);
                if !driver.party.resolved {
                    warnings.push(SettlementWarning::MissingDriver {
                        transfer: transfer.id.clone(),
                        driver_id: transfer.driver_id.clone(),
                    });
                }
                driver_legs.extend(self.price_legs(
                    &decomposition.legs,
                    &driver,
                    &contract,
                    &mut warnings,
                ));
            }
        }

        for warning in &warnings {
            warn!(transfer = %warning.transfer(), "{warning}");
        }

        let currency = self.policy().currency;
        let company_rows = CompanySettlementBuilder::build(&company_legs);
        let driver_rows = DriverSettlementBuilder::build(&driver_legs);
        let company_total = TotalsReducer::company_total(&company_rows, currency)
            .ok_or_else(|| total_overflow("company"))?;
        let driver_total = TotalsReducer::driver_total(&driver_rows, currency)
            .ok_or_else(|| total_overflow("driver"))?;
        let company_subtotals =
            TotalsReducer::by_entity(&company_legs).ok_or_else(|| total_overflow("company"))?;
        let driver_subtotals =
            TotalsReducer::by_entity(&driver_legs).ok_or_else(|| total_overflow("driver"))?;

        info!(
            company_rows = company_rows.len(),
            driver_rows = driver_rows.len(),
            company_total = %company_total,
            driver_total = %driver_total,
            warnings = warnings.len(),
            "Settlement computed"
        );

        Ok(SettlementRun {
            company_subtotals,
            driver_subtotals,
            company_rows,
            driver_rows,
            company_total,
            driver_total,
            warnings,
        })
    }

    fn price_legs<'t>(
        &self,
        legs: &[Leg<'t>],
        resolution: &Resolution,
        contract: &str,
        warnings: &mut Vec<SettlementWarning>,
    ) -> Vec<PricedLeg<'t>> {
        legs.iter()
            .map(|leg| {
                let quote = self.pricer.price(leg, &resolution.rates);
                for component in quote.overflowed {
                    let warning = SettlementWarning::AmountOverflow {
                        transfer: leg.transfer.id.clone(),
                        component,
                    };
                    if !warnings.contains(&warning) {
                        warnings.push(warning);
                    }
                }
                PricedLeg {
                    leg: leg.clone(),
                    price: quote.price,
                    party: resolution.party.clone(),
                    contract: contract.to_owned(),
                }
            })
            .collect()
    }
}

const fn total_overflow(statement: &'static str) -> SettlementError {
    SettlementError::TotalOverflow { statement }
}

/// Transfer contract label, falling back to the company label.
fn contract_label(transfer: &Transfer, company: &Resolution) -> String {
    let art = transfer.art.trim();
    if art.is_empty() {
        company.party.label.clone()
    } else {
        art.to_owned()
    }
}
