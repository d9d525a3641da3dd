//! `camline-store` — Persistence for the Camline cinematic engine.
//!
//! Cinematics serialize to compact JSON blobs under `cin:`-prefixed keys in
//! a host-provided key-value [`BlobStore`]. The [`Library`] is the loaded
//! registry on top, and [`AutoSaver`] paces editor autosaves.

pub mod autosave;
pub mod blob;
pub mod error;
pub mod library;

// Re-export primary API
pub use autosave::AutoSaver;
pub use blob::{BlobStore, FileStore, MemoryStore};
pub use error::{StoreError, StoreResult};
pub use library::{Library, KEY_PREFIX};
