//! Dispatch records consumed by the settlement engine.

pub mod distance;
pub mod types;

pub use distance::Distance;
pub use types::{Company, Driver, RateProfile, Snapshot, Transfer, TransferStatus, TripType};
