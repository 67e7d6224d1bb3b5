//! Analysis module - pure functions over a matrix snapshot.
//!
//! Every analyzer consumes a `MatrixSnapshot` (and, where relevant,
//! previously computed scores) and produces derived values without
//! touching the store.

mod diagnosticity;
mod evidence_gaps;
mod scoring;
mod sensitivity;

pub use diagnosticity::{DiagnosticityAnalyzer, DiagnosticityClass, EvidenceDiagnosticity};
pub use evidence_gaps::{EvidenceGapAnalyzer, GapConfig, GapFinding, GapKind};
pub use scoring::{HypothesisScore, ScoringEngine};
pub use sensitivity::{RankChange, SensitivityAnalyzer, SensitivityReport};
