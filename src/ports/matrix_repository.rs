//! Matrix repository port.
//!
//! Defines the contract for persisting and retrieving Matrix aggregates
//! so the Matrix Store can be backed by any storage engine without the
//! analytical components changing.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MatrixId};
use crate::domain::matrix::Matrix;

/// Repository port for Matrix aggregate persistence.
///
/// `save` has upsert semantics keyed by matrix id. Implementations must
/// store and return whole aggregates so readers never observe a
/// partially-applied mutation.
#[async_trait]
pub trait MatrixRepository: Send + Sync {
    /// Save (create or replace) a matrix.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, matrix: &Matrix) -> Result<(), DomainError>;

    /// Find a matrix by its id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MatrixId) -> Result<Option<Matrix>, DomainError>;

    /// Check if a matrix exists.
    async fn exists(&self, id: &MatrixId) -> Result<bool, DomainError>;

    /// Delete a matrix.
    ///
    /// # Errors
    ///
    /// - `MatrixNotFound` if the matrix doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &MatrixId) -> Result<(), DomainError>;

    /// List the ids of all stored matrices.
    async fn list_ids(&self) -> Result<Vec<MatrixId>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn matrix_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MatrixRepository) {}
    }
}
