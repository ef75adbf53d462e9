//! Core business logic for dispatch settlements.
//!
//! This crate contains pure business logic with no storage or UI dependencies.
//! Records come in as an immutable [`records::Snapshot`]; statements come out
//! as plain rows and totals.
//!
//! # Modules
//!
//! - `records` - Transfer, driver and company records
//! - `settlement` - Leg decomposition, pricing, statements and totals
//! - `access` - Coarse role-based view access
//! - `table` - Tabular views of the record directories
//! - `export` - CSV exports of statements and the transfer log

pub mod access;
pub mod export;
pub mod records;
pub mod settlement;
pub mod table;
