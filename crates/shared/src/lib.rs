//! Shared types, errors, and configuration for the dispatch workspace.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision and minor-unit rounding
//! - Typed IDs for type-safe references between records
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ExportConfig, SettlementConfig};
pub use error::AppError;
