//! Whole-file JSON adapter.

mod store;

pub use store::JsonFileSnapshotStore;
