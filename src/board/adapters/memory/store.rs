//! In-memory snapshot store.

use crate::board::{
    domain::BoardSnapshot,
    ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe snapshot store holding the latest snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    snapshot: Option<BoardSnapshot>,
    save_count: usize,
}

impl InMemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: BoardSnapshot) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.write() {
            state.snapshot = Some(snapshot);
        }
        store
    }

    /// Returns the last saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] if the lock is poisoned.
    pub fn current(&self) -> SnapshotStoreResult<Option<BoardSnapshot>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.snapshot.clone())
    }

    /// Returns how many times [`SnapshotStore::save`] succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] if the lock is poisoned.
    pub fn save_count(&self) -> SnapshotStoreResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.save_count)
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> SnapshotStoreError {
    SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> SnapshotStoreResult<Option<BoardSnapshot>> {
        self.current()
    }

    async fn save(&self, snapshot: &BoardSnapshot) -> SnapshotStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.snapshot = Some(snapshot.clone());
        state.save_count += 1;
        Ok(())
    }
}
