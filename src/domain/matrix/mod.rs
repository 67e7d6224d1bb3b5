//! Matrix module - the ACH matrix aggregate and its parts.
//!
//! A matrix owns an ordered column of hypotheses, an ordered row of
//! evidence, and the ratings linking them. All mutation goes through the
//! `Matrix` aggregate, which keeps indices contiguous and ratings free of
//! orphans. Analyzers consume the immutable `MatrixSnapshot` view.

mod aggregate;
mod evidence;
mod events;
mod hypothesis;
mod rating;
mod snapshot;
mod suggestions;

pub use aggregate::Matrix;
pub use evidence::Evidence;
pub use events::{
    EvidenceAdded, EvidenceRemoved, HypothesisAdded, HypothesisRemoved, MatrixCreated,
    MatrixDeleted, MatrixUpdated, RatingSet, ScoresCalculated,
};
pub use hypothesis::Hypothesis;
pub use rating::Rating;
pub use snapshot::{MatrixSnapshot, RatingCell};
pub use suggestions::{EvidenceSuggestion, HypothesisSuggestion, RatingSuggestion};
