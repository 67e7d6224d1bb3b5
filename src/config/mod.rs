//! Configuration module.
//!
//! Provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Values are read with the
//! `ACH_WORKBENCH` prefix and nested values use `__` as separator; every
//! field has a default, so an empty environment is valid.

mod analysis;
mod error;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ConfigValidationError};

use serde::Deserialize;

/// Root configuration for the engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Analyzer tunables (thresholds, minimums).
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variable Format
    ///
    /// - `ACH_WORKBENCH__ANALYSIS__GAP_MIN_RATINGS=4`
    /// - `ACH_WORKBENCH__ANALYSIS__SENSITIVITY_CREDIBILITY_THRESHOLD=0.6`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ACH_WORKBENCH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if any threshold is out of range.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.analysis.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }
}
