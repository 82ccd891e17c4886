//! Snapshot store writing the board to a single JSON document.

use crate::board::{
    domain::BoardSnapshot,
    ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult},
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

/// Snapshot store backed by one pretty-printed JSON file.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: Utf8PathBuf,
}

impl JsonFileSnapshotStore {
    /// Creates a store for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn load(&self) -> SnapshotStoreResult<Option<BoardSnapshot>> {
        let path = self.path.clone();
        run_blocking(move || read_snapshot(&path)).await
    }

    async fn save(&self, snapshot: &BoardSnapshot) -> SnapshotStoreResult<()> {
        let path = self.path.clone();
        let document = serde_json::to_string_pretty(snapshot)?;
        run_blocking(move || write_document(&path, &document)).await
    }
}

async fn run_blocking<F, T>(f: F) -> SnapshotStoreResult<T>
where
    F: FnOnce() -> SnapshotStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(SnapshotStoreError::persistence)?
}

fn split_path(path: &Utf8Path) -> io::Result<(&Utf8Path, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("path '{path}' must include a file name")))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Ok((parent, file_name))
}

fn read_snapshot(path: &Utf8Path) -> SnapshotStoreResult<Option<BoardSnapshot>> {
    let (parent, file_name) = split_path(path)?;
    let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let contents = match dir.read_to_string(file_name) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&contents)?))
}

fn write_document(path: &Utf8Path, document: &str) -> SnapshotStoreResult<()> {
    let (parent, file_name) = split_path(path)?;
    Dir::create_ambient_dir_all(parent, ambient_authority())?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    let staging_name = format!(".{file_name}.tmp");
    dir.write(&staging_name, document)?;
    if let Err(err) = dir.rename(&staging_name, &dir, file_name) {
        let _cleanup = dir.remove_file(&staging_name);
        return Err(err.into());
    }
    Ok(())
}
