//! Matrix lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixStatus {
    #[default]
    Draft,
    Active,
    Completed,
    Archived,
}

impl MatrixStatus {
    /// Checks whether a transition to the target status is permitted.
    ///
    /// The lifecycle moves forward only: Draft -> Active -> Completed ->
    /// Archived, with archiving allowed from any earlier status.
    pub fn can_transition_to(&self, target: MatrixStatus) -> bool {
        use MatrixStatus::*;
        matches!(
            (*self, target),
            (Draft, Active)
                | (Active, Completed)
                | (Draft, Archived)
                | (Active, Archived)
                | (Completed, Archived)
        )
    }

    /// Returns true while the matrix accepts structural mutation.
    pub fn allows_mutation(&self) -> bool {
        !matches!(self, MatrixStatus::Archived)
    }
}

impl fmt::Display for MatrixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatrixStatus::Draft => "draft",
            MatrixStatus::Active => "active",
            MatrixStatus::Completed => "completed",
            MatrixStatus::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(MatrixStatus::default(), MatrixStatus::Draft);
    }

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(MatrixStatus::Draft.can_transition_to(MatrixStatus::Active));
        assert!(MatrixStatus::Active.can_transition_to(MatrixStatus::Completed));
        assert!(MatrixStatus::Completed.can_transition_to(MatrixStatus::Archived));
    }

    #[test]
    fn archiving_is_allowed_from_any_earlier_status() {
        assert!(MatrixStatus::Draft.can_transition_to(MatrixStatus::Archived));
        assert!(MatrixStatus::Active.can_transition_to(MatrixStatus::Archived));
    }

    #[test]
    fn backward_transitions_are_rejected() {
        assert!(!MatrixStatus::Active.can_transition_to(MatrixStatus::Draft));
        assert!(!MatrixStatus::Completed.can_transition_to(MatrixStatus::Active));
        assert!(!MatrixStatus::Archived.can_transition_to(MatrixStatus::Draft));
        assert!(!MatrixStatus::Archived.can_transition_to(MatrixStatus::Active));
    }

    #[test]
    fn self_transition_is_rejected() {
        assert!(!MatrixStatus::Draft.can_transition_to(MatrixStatus::Draft));
    }

    #[test]
    fn archived_blocks_mutation() {
        assert!(MatrixStatus::Draft.allows_mutation());
        assert!(MatrixStatus::Active.allows_mutation());
        assert!(MatrixStatus::Completed.allows_mutation());
        assert!(!MatrixStatus::Archived.allows_mutation());
    }

    #[test]
    fn serializes_to_lowercase() {
        assert_eq!(
            serde_json::to_string(&MatrixStatus::Archived).unwrap(),
            "\"archived\""
        );
    }
}
