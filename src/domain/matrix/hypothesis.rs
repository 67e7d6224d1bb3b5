//! Hypothesis entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, HypothesisId};

/// A candidate explanation, one column of the matrix.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `column_index` is kept contiguous by the owning `Matrix`
/// - `is_lead` is written only by the score-calculation path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    id: HypothesisId,
    title: String,
    description: String,
    column_index: usize,
    is_lead: bool,
}

impl Hypothesis {
    /// Creates a new hypothesis at the given column.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        column_index: usize,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Hypothesis title cannot be empty"));
        }
        Ok(Self {
            id: HypothesisId::new(),
            title,
            description: description.into(),
            column_index,
            is_lead: false,
        })
    }

    /// Returns the hypothesis id.
    pub fn id(&self) -> &HypothesisId {
        &self.id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the column index.
    pub fn column_index(&self) -> usize {
        self.column_index
    }

    /// Returns true if this hypothesis is the current lead.
    pub fn is_lead(&self) -> bool {
        self.is_lead
    }

    pub(crate) fn set_column_index(&mut self, index: usize) {
        self.column_index = index;
    }

    pub(crate) fn set_lead(&mut self, lead: bool) {
        self.is_lead = lead;
    }
}
