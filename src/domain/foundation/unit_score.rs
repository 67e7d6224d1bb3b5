//! UnitScore value object (0.0-1.0 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A score in the closed interval [0.0, 1.0].
///
/// Used for evidence credibility, evidence relevance, and rating confidence.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitScore(f64);

impl UnitScore {
    /// Zero score.
    pub const ZERO: Self = Self(0.0);

    /// Full score.
    pub const ONE: Self = Self(1.0);

    /// Creates a UnitScore, returning error if outside [0, 1] or not finite.
    pub fn try_new(field: &str, value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range(field, 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Creates a UnitScore, clamping into [0, 1]. Non-finite input becomes 0.
    pub fn clamped(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true if this score is strictly below the given threshold.
    pub fn is_below(&self, threshold: f64) -> bool {
        self.0 < threshold
    }
}

impl Default for UnitScore {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for UnitScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_boundary_values() {
        assert_eq!(UnitScore::try_new("credibility", 0.0).unwrap().value(), 0.0);
        assert_eq!(UnitScore::try_new("credibility", 1.0).unwrap().value(), 1.0);
        assert_eq!(UnitScore::try_new("credibility", 0.5).unwrap().value(), 0.5);
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(UnitScore::try_new("relevance", -0.1).is_err());
        assert!(UnitScore::try_new("relevance", 1.1).is_err());
    }

    #[test]
    fn try_new_rejects_non_finite() {
        assert!(UnitScore::try_new("confidence", f64::NAN).is_err());
        assert!(UnitScore::try_new("confidence", f64::INFINITY).is_err());
    }

    #[test]
    fn try_new_error_names_the_field() {
        let err = UnitScore::try_new("confidence", 2.0).unwrap_err();
        assert!(err.to_string().contains("confidence"));
    }

    #[test]
    fn clamped_limits_to_unit_interval() {
        assert_eq!(UnitScore::clamped(-0.5).value(), 0.0);
        assert_eq!(UnitScore::clamped(1.5).value(), 1.0);
        assert_eq!(UnitScore::clamped(0.3).value(), 0.3);
        assert_eq!(UnitScore::clamped(f64::NAN).value(), 0.0);
    }

    #[test]
    fn is_below_compares_strictly() {
        let score = UnitScore::try_new("credibility", 0.5).unwrap();
        assert!(!score.is_below(0.5));
        assert!(score.is_below(0.6));
    }

    #[test]
    fn default_is_full_score() {
        assert_eq!(UnitScore::default(), UnitScore::ONE);
    }

    #[test]
    fn serializes_transparently() {
        let score = UnitScore::try_new("credibility", 0.75).unwrap();
        assert_eq!(serde_json::to_string(&score).unwrap(), "0.75");
    }
}
