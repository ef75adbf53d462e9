//! Application configuration management.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppError;
use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Settlement pricing configuration.
    #[serde(default)]
    pub settlement: SettlementConfig,
    /// Export formatting configuration.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Settlement pricing configuration.
///
/// The coverage threshold and the default waiting duration have no built-in
/// value and must be supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Kilometres covered by the flat segment rate before per-km pricing applies.
    #[serde(default)]
    pub flat_rate_coverage_km: Option<Decimal>,
    /// Hours billed when a transfer is flagged as waiting but records no duration.
    #[serde(default)]
    pub default_waiting_hours: Option<Decimal>,
    /// Label shown for drivers or companies missing from the snapshot.
    #[serde(default = "default_placeholder_label")]
    pub placeholder_label: String,
    /// Currency all rate profiles are expressed in.
    #[serde(default)]
    pub currency: Currency,
}

fn default_placeholder_label() -> String {
    "unknown".to_string()
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            flat_rate_coverage_km: None,
            default_waiting_hours: None,
            placeholder_label: default_placeholder_label(),
            currency: Currency::default(),
        }
    }
}

impl SettlementConfig {
    /// Returns the flat-rate coverage threshold or a configuration error naming the key.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when the value is unset or negative.
    pub fn require_flat_rate_coverage_km(&self) -> Result<Decimal, AppError> {
        Self::require(self.flat_rate_coverage_km, "settlement.flat_rate_coverage_km")
    }

    /// Returns the default waiting duration or a configuration error naming the key.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when the value is unset or negative.
    pub fn require_default_waiting_hours(&self) -> Result<Decimal, AppError> {
        Self::require(self.default_waiting_hours, "settlement.default_waiting_hours")
    }

    fn require(value: Option<Decimal>, key: &str) -> Result<Decimal, AppError> {
        match value {
            Some(v) if v.is_sign_negative() && !v.is_zero() => Err(AppError::Configuration(
                format!("{key} must not be negative, got {v}"),
            )),
            Some(v) => Ok(v),
            None => Err(AppError::Configuration(format!("{key} is not set"))),
        }
    }
}

/// Export formatting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Field delimiter for delimited-text exports.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Prefix exports with a UTF-8 byte order mark so spreadsheets detect the encoding.
    #[serde(default = "default_byte_order_mark")]
    pub byte_order_mark: bool,
}

fn default_delimiter() -> char {
    ','
}

fn default_byte_order_mark() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            byte_order_mark: default_byte_order_mark(),
        }
    }
}

impl ExportConfig {
    /// Returns the delimiter as a single byte, rejecting non-ASCII characters.
    pub fn delimiter_byte(&self) -> Result<u8, AppError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "export.delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                ))
            })
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Loads configuration from files under `config_dir` and the environment.
    ///
    /// Sources, later ones overriding earlier ones: `<dir>/default`,
    /// `<dir>/<RUN_MODE>`, then `DISPATCH__SECTION__KEY` environment variables.
    pub fn load_from(config_dir: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let dir = config_dir.as_ref();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            .add_source(config::Environment::with_prefix("DISPATCH").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const MISSING_DIR: &str = "/nonexistent/dispatch-config";

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            [
                "DISPATCH__SETTLEMENT__FLAT_RATE_COVERAGE_KM",
                "DISPATCH__SETTLEMENT__DEFAULT_WAITING_HOURS",
            ],
            || {
                let config = AppConfig::load_from(MISSING_DIR).unwrap();
                assert_eq!(config.settlement.flat_rate_coverage_km, None);
                assert_eq!(config.settlement.placeholder_label, "unknown");
                assert_eq!(config.settlement.currency, Currency::Ars);
                assert_eq!(config.export.delimiter, ',');
                assert!(config.export.byte_order_mark);
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("DISPATCH__SETTLEMENT__FLAT_RATE_COVERAGE_KM", Some("25")),
                ("DISPATCH__SETTLEMENT__DEFAULT_WAITING_HOURS", Some("1.5")),
                ("DISPATCH__SETTLEMENT__PLACEHOLDER_LABEL", Some("desconocido")),
            ],
            || {
                let config = AppConfig::load_from(MISSING_DIR).unwrap();
                assert_eq!(
                    config.settlement.require_flat_rate_coverage_km().unwrap(),
                    dec!(25)
                );
                assert_eq!(
                    config.settlement.require_default_waiting_hours().unwrap(),
                    dec!(1.5)
                );
                assert_eq!(config.settlement.placeholder_label, "desconocido");
            },
        );
    }

    #[test]
    fn test_require_missing_value() {
        let err = SettlementConfig::default()
            .require_flat_rate_coverage_km()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: settlement.flat_rate_coverage_km is not set"
        );
    }

    #[test]
    fn test_require_rejects_negative() {
        let config = SettlementConfig {
            default_waiting_hours: Some(dec!(-1)),
            ..SettlementConfig::default()
        };
        assert!(config.require_default_waiting_hours().is_err());
    }

    #[test]
    fn test_delimiter_byte() {
        let semicolon = ExportConfig {
            delimiter: ';',
            byte_order_mark: false,
        };
        assert_eq!(semicolon.delimiter_byte().unwrap(), b';');

        let non_ascii = ExportConfig {
            delimiter: 'é',
            byte_order_mark: false,
        };
        assert!(non_ascii.delimiter_byte().is_err());
    }
}
