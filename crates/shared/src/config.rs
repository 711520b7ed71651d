//! Application configuration management.

use serde::Deserialize;

use crate::types::{Currency, MoneyError};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Consignment reporting configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Consignment reporting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Currency code used for totals of reports without stock movements.
    #[serde(default = "default_currency_code")]
    pub default_currency: String,
    /// Directory generated report files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_currency_code() -> String {
    "DKK".to_string()
}

fn default_output_dir() -> String {
    "var/reports".to_string()
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency_code(),
            output_dir: default_output_dir(),
        }
    }
}

impl ReportingConfig {
    /// Parses the configured default currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured code is not a valid currency code.
    pub fn default_currency(&self) -> Result<Currency, MoneyError> {
        Currency::new(&self.default_currency)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CONSIGNMENT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
