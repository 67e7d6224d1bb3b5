//! Analyzer configuration.

use serde::Deserialize;

use super::error::ConfigValidationError;

/// Tunables consumed by the analyzers.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Evidence below this credibility is excluded by the sensitivity run.
    #[serde(default = "default_sensitivity_threshold")]
    pub sensitivity_credibility_threshold: f64,

    /// Minimum substantive ratings per hypothesis before it counts as
    /// under-evidenced.
    #[serde(default = "default_gap_min_ratings")]
    pub gap_min_ratings: usize,

    /// Credibility/relevance below this counts as low quality.
    #[serde(default = "default_low_quality_threshold")]
    pub low_quality_threshold: f64,

    /// Proportion of low-quality evidence that triggers a quality finding.
    #[serde(default = "default_quality_concern_ratio")]
    pub quality_concern_ratio: f64,

    /// Weight-variance split between high and low diagnosticity.
    #[serde(default = "default_diagnosticity_threshold")]
    pub diagnosticity_threshold: f64,
}

impl AnalysisConfig {
    /// Validate threshold ranges.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (name, value) in [
            (
                "sensitivity_credibility_threshold",
                self.sensitivity_credibility_threshold,
            ),
            ("low_quality_threshold", self.low_quality_threshold),
            ("quality_concern_ratio", self.quality_concern_ratio),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::ThresholdOutOfRange { name, value });
            }
        }
        if !self.diagnosticity_threshold.is_finite() || self.diagnosticity_threshold < 0.0 {
            return Err(ConfigValidationError::ThresholdOutOfRange {
                name: "diagnosticity_threshold",
                value: self.diagnosticity_threshold,
            });
        }
        Ok(())
    }

    /// Gap analyzer view of this configuration.
    pub fn gap_config(&self) -> crate::domain::analysis::GapConfig {
        crate::domain::analysis::GapConfig {
            min_ratings: self.gap_min_ratings,
            low_quality_threshold: self.low_quality_threshold,
            quality_concern_ratio: self.quality_concern_ratio,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sensitivity_credibility_threshold: default_sensitivity_threshold(),
            gap_min_ratings: default_gap_min_ratings(),
            low_quality_threshold: default_low_quality_threshold(),
            quality_concern_ratio: default_quality_concern_ratio(),
            diagnosticity_threshold: default_diagnosticity_threshold(),
        }
    }
}

fn default_sensitivity_threshold() -> f64 {
    0.5
}

fn default_gap_min_ratings() -> usize {
    3
}

fn default_low_quality_threshold() -> f64 {
    0.5
}

fn default_quality_concern_ratio() -> f64 {
    0.5
}

fn default_diagnosticity_threshold() -> f64 {
    0.25
}
