//! Evidence type tags.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Category of an evidence item.
///
/// The six core categories are fixed; `Other` carries a free-form label
/// for anything outside them. Only the core categories participate in the
/// missing-evidence-type gap check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    Fact,
    Testimony,
    Document,
    Physical,
    Circumstantial,
    Inference,
    Other(String),
}

/// Lookup table from canonical names to core types.
static CORE_BY_NAME: Lazy<HashMap<&'static str, EvidenceType>> = Lazy::new(|| {
    HashMap::from([
        ("fact", EvidenceType::Fact),
        ("testimony", EvidenceType::Testimony),
        ("document", EvidenceType::Document),
        ("physical", EvidenceType::Physical),
        ("circumstantial", EvidenceType::Circumstantial),
        ("inference", EvidenceType::Inference),
    ])
});

impl EvidenceType {
    /// The fixed core categories, in canonical order.
    pub const CORE: [EvidenceType; 6] = [
        EvidenceType::Fact,
        EvidenceType::Testimony,
        EvidenceType::Document,
        EvidenceType::Physical,
        EvidenceType::Circumstantial,
        EvidenceType::Inference,
    ];

    /// Parses a type name; unknown names become `Other`.
    pub fn parse(name: &str) -> Self {
        let normalized = name.trim().to_lowercase();
        CORE_BY_NAME
            .get(normalized.as_str())
            .cloned()
            .unwrap_or(EvidenceType::Other(normalized))
    }

    /// Returns the canonical lowercase name.
    pub fn name(&self) -> &str {
        match self {
            EvidenceType::Fact => "fact",
            EvidenceType::Testimony => "testimony",
            EvidenceType::Document => "document",
            EvidenceType::Physical => "physical",
            EvidenceType::Circumstantial => "circumstantial",
            EvidenceType::Inference => "inference",
            EvidenceType::Other(label) => label,
        }
    }

    /// Returns true for the six core categories.
    pub fn is_core(&self) -> bool {
        !matches!(self, EvidenceType::Other(_))
    }
}

impl fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
