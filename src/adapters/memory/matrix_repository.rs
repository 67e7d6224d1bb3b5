//! In-memory matrix repository.
//!
//! Holds the authoritative in-process copy of every matrix during a
//! process lifetime. Whole aggregates are swapped on save, so readers
//! only ever observe fully-applied mutations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MatrixId};
use crate::domain::matrix::Matrix;
use crate::ports::MatrixRepository;

/// In-memory implementation of `MatrixRepository`.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned, which only happens
/// after another thread panicked while holding it.
pub struct InMemoryMatrixRepository {
    matrices: RwLock<HashMap<MatrixId, Matrix>>,
}

impl InMemoryMatrixRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            matrices: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored matrices.
    pub fn matrix_count(&self) -> usize {
        self.matrices
            .read()
            .expect("InMemoryMatrixRepository: lock poisoned")
            .len()
    }

    /// Removes every stored matrix (for test isolation).
    pub fn clear(&self) {
        self.matrices
            .write()
            .expect("InMemoryMatrixRepository: lock poisoned")
            .clear();
    }
}

impl Default for InMemoryMatrixRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatrixRepository for InMemoryMatrixRepository {
    async fn save(&self, matrix: &Matrix) -> Result<(), DomainError> {
        self.matrices
            .write()
            .expect("InMemoryMatrixRepository: lock poisoned")
            .insert(*matrix.id(), matrix.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MatrixId) -> Result<Option<Matrix>, DomainError> {
        Ok(self
            .matrices
            .read()
            .expect("InMemoryMatrixRepository: lock poisoned")
            .get(id)
            .cloned())
    }

    async fn exists(&self, id: &MatrixId) -> Result<bool, DomainError> {
        Ok(self
            .matrices
            .read()
            .expect("InMemoryMatrixRepository: lock poisoned")
            .contains_key(id))
    }

    async fn delete(&self, id: &MatrixId) -> Result<(), DomainError> {
        let removed = self
            .matrices
            .write()
            .expect("InMemoryMatrixRepository: lock poisoned")
            .remove(id);
        if removed.is_none() {
            return Err(DomainError::new(
                ErrorCode::MatrixNotFound,
                format!("Matrix not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<MatrixId>, DomainError> {
        let mut ids: Vec<MatrixId> = self
            .matrices
            .read()
            .expect("InMemoryMatrixRepository: lock poisoned")
            .keys()
            .copied()
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(title: &str) -> Matrix {
        Matrix::new(title, "").unwrap()
    }

    #[tokio::test]
    async fn save_then_find_returns_the_matrix() {
        let repo = InMemoryMatrixRepository::new();
        let m = matrix("First");

        repo.save(&m).await.unwrap();

        let found = repo.find_by_id(m.id()).await.unwrap().unwrap();
        assert_eq!(found, m);
    }

    #[tokio::test]
    async fn find_unknown_id_returns_none() {
        let repo = InMemoryMatrixRepository::new();
        assert!(repo.find_by_id(&MatrixId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_existing_matrix() {
        let repo = InMemoryMatrixRepository::new();
        let mut m = matrix("Original");
        repo.save(&m).await.unwrap();

        m.update_details("Renamed", "").unwrap();
        repo.save(&m).await.unwrap();

        assert_eq!(repo.matrix_count(), 1);
        let found = repo.find_by_id(m.id()).await.unwrap().unwrap();
        assert_eq!(found.title(), "Renamed");
    }

    #[tokio::test]
    async fn exists_reflects_storage() {
        let repo = InMemoryMatrixRepository::new();
        let m = matrix("Here");

        assert!(!repo.exists(m.id()).await.unwrap());
        repo.save(&m).await.unwrap();
        assert!(repo.exists(m.id()).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_the_matrix() {
        let repo = InMemoryMatrixRepository::new();
        let m = matrix("Doomed");
        repo.save(&m).await.unwrap();

        repo.delete(m.id()).await.unwrap();

        assert_eq!(repo.matrix_count(), 0);
        assert!(repo.find_by_id(m.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_unknown_id_fails() {
        let repo = InMemoryMatrixRepository::new();
        let err = repo.delete(&MatrixId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MatrixNotFound);
    }

    #[tokio::test]
    async fn list_ids_returns_all_stored_matrices() {
        let repo = InMemoryMatrixRepository::new();
        let m1 = matrix("A");
        let m2 = matrix("B");
        repo.save(&m1).await.unwrap();
        repo.save(&m2).await.unwrap();

        let ids = repo.list_ids().await.unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(m1.id()));
        assert!(ids.contains(m2.id()));
    }
}
