//! Persistence: profile currency, artefacts, the saved run and records.
//!
//! ## Key Types
//!
//! - `KeyValueStore`: string storage contract (`Send + Sync`)
//! - `InMemoryStore`: `RwLock`-guarded map for tests and local runs
//! - `FileStore`: one file per key, atomic temp-file rename on write
//! - `ProfileStore`: typed, forgiving reads over any store

mod file;
mod profile;
mod store;

pub use file::FileStore;
pub use profile::{keys, ProfileStore};
pub use store::{InMemoryStore, KeyValueStore, Result, StorageError};
