//! Consistency rating value object - the six-point ACH scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DomainError, ErrorCode};

/// How a piece of evidence bears on a hypothesis.
///
/// The scale runs from strongly inconsistent (`--`) to strongly
/// consistent (`++`). `NotApplicable` means the evidence has no bearing
/// on the hypothesis at all; it is distinct from `Neutral` and is
/// excluded from every aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Consistency {
    #[serde(rename = "--")]
    StronglyInconsistent,
    #[serde(rename = "-")]
    Inconsistent,
    #[serde(rename = "N")]
    Neutral,
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "+")]
    Consistent,
    #[serde(rename = "++")]
    StronglyConsistent,
}

impl Consistency {
    /// All values of the scale, in display order.
    pub const ALL: [Consistency; 6] = [
        Consistency::StronglyInconsistent,
        Consistency::Inconsistent,
        Consistency::Neutral,
        Consistency::NotApplicable,
        Consistency::Consistent,
        Consistency::StronglyConsistent,
    ];

    /// Returns the numeric weight, or None for `NotApplicable`.
    ///
    /// `--` is -2, `-` is -1, `N` is 0, `+` is +1, `++` is +2.
    pub fn weight(&self) -> Option<i8> {
        match self {
            Consistency::StronglyInconsistent => Some(-2),
            Consistency::Inconsistent => Some(-1),
            Consistency::Neutral => Some(0),
            Consistency::NotApplicable => None,
            Consistency::Consistent => Some(1),
            Consistency::StronglyConsistent => Some(2),
        }
    }

    /// Returns the scale symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Consistency::StronglyInconsistent => "--",
            Consistency::Inconsistent => "-",
            Consistency::Neutral => "N",
            Consistency::NotApplicable => "N/A",
            Consistency::Consistent => "+",
            Consistency::StronglyConsistent => "++",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Consistency::StronglyInconsistent => "Strongly Inconsistent",
            Consistency::Inconsistent => "Inconsistent",
            Consistency::Neutral => "Neutral",
            Consistency::NotApplicable => "Not Applicable",
            Consistency::Consistent => "Consistent",
            Consistency::StronglyConsistent => "Strongly Consistent",
        }
    }

    /// Returns true for `--` and `-`.
    pub fn is_inconsistent(&self) -> bool {
        matches!(self.weight(), Some(w) if w < 0)
    }

    /// Returns true for `+` and `++`.
    pub fn is_consistent(&self) -> bool {
        matches!(self.weight(), Some(w) if w > 0)
    }

    /// Returns false only for `N/A`.
    pub fn is_applicable(&self) -> bool {
        self.weight().is_some()
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Consistency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "--" => Ok(Consistency::StronglyInconsistent),
            "-" => Ok(Consistency::Inconsistent),
            "N" => Ok(Consistency::Neutral),
            "N/A" => Ok(Consistency::NotApplicable),
            "+" => Ok(Consistency::Consistent),
            "++" => Ok(Consistency::StronglyConsistent),
            other => Err(DomainError::new(
                ErrorCode::InvalidRating,
                format!("'{}' is not a consistency value", other),
            )
            .with_detail("value", other)),
        }
    }
}
