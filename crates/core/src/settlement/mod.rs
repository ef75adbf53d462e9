//! Settlement computation.
//!
//! Turns a transfer log into two independent statements:
//! - what each contracting company is billed
//! - what each driver is paid
//!
//! Transfers are decomposed into legs, each leg is priced twice (company
//! rates and driver rates), and the priced legs are folded into ordered rows
//! and totals. Annulled transfers never produce rows.

pub mod company;
pub mod decomposer;
pub mod driver;
pub mod engine;
pub mod error;
pub mod pricer;
pub mod rates;
pub mod request;
pub mod service;
pub mod totals;
pub mod types;


pub use company::CompanySettlementBuilder;
pub use decomposer::{Decomposition, TripDecomposer};
pub use driver::DriverSettlementBuilder;
pub use engine::SettlementEngine;
pub use error::{SettlementError, SettlementWarning};
pub use pricer::{LegPricer, PriceComponent, PricingPolicy, Quote};
pub use rates::{RateResolver, Resolution};
pub use request::SettlementRequest;
pub use service::SettlementService;
pub use totals::{RowTotal, TotalsReducer};
pub use types::*;
