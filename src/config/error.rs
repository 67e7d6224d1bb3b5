//! Configuration error types.

use thiserror::Error;

/// Error loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),
}

/// Error validating loaded configuration values.
#[derive(Debug, Clone, Error)]
pub enum ConfigValidationError {
    #[error("Configuration value '{name}' is out of range: {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_name_and_value() {
        let err = ConfigValidationError::ThresholdOutOfRange {
            name: "low_quality_threshold",
            value: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "Configuration value 'low_quality_threshold' is out of range: 2"
        );
    }
}
