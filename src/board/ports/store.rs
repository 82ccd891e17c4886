//! Storage port persisting the whole board as one snapshot.

use crate::board::domain::{BoardSnapshot, InvalidSnapshotError};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for snapshot store operations.
pub type SnapshotStoreResult<T> = Result<T, SnapshotStoreError>;

/// Load-all/save-all persistence contract.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the stored snapshot.
    ///
    /// Returns `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError`] when the stored snapshot cannot be read
    /// or decoded.
    async fn load(&self) -> SnapshotStoreResult<Option<BoardSnapshot>>;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError`] when the snapshot cannot be written.
    async fn save(&self, snapshot: &BoardSnapshot) -> SnapshotStoreResult<()>;
}

/// Errors returned by snapshot store implementations.
#[derive(Debug, Clone, Error)]
pub enum SnapshotStoreError {
    /// Reading or writing the backing medium failed.
    #[error("snapshot I/O error: {0}")]
    Io(Arc<std::io::Error>),

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot serialization error: {0}")]
    Serialization(Arc<serde_json::Error>),

    /// The stored snapshot decoded but breaks a board invariant.
    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] InvalidSnapshotError),

    /// Any other persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotStoreError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<std::io::Error> for SnapshotStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for SnapshotStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(err))
    }
}
