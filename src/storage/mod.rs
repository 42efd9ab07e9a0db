//! # Persistence Adapter
//!
//! This module defines the storage abstraction for jotter. The
//! [`StorageBackend`] trait wraps the durable key-value medium the store
//! persists into.
//!
//! ## Contract
//!
//! The adapter reports failure instead of raising it:
//! - `get` returns `None` on absence *or* access failure — the store treats
//!   both as "nothing persisted"
//! - `set` returns `false` on failure — the store surfaces that as a
//!   non-fatal warning, never a crash
//!
//! The medium offers no transactional guarantees beyond "last full write
//! wins"; callers that need one entry durable before another must order
//! their `set` calls accordingly.
//!
//! ## Implementations
//!
//! - [`fs::FileBackend`]: production storage, one file per key under a
//!   root directory
//! - [`memory::MemoryBackend`]: in-memory storage for tests, with optional
//!   write-failure injection
//!
//! ## Persisted layout
//!
//! Two named entries:
//! - [`NOTES_KEY`]: the serialized note collection (JSON array of records)
//! - [`SELECTED_KEY`]: the scalar selected-note id (empty/absent = none)

pub mod fs;
pub mod memory;

/// Entry holding the serialized note collection.
pub const NOTES_KEY: &str = "jotter_notes";

/// Entry holding the selected-note id.
pub const SELECTED_KEY: &str = "jotter_selected";

/// Abstract interface over the durable key-value medium.
pub trait StorageBackend {
    /// Read the raw value for `key`. Absence and access failure both
    /// yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`. Returns `false` on failure (medium
    /// unavailable, quota exceeded); never panics.
    fn set(&mut self, key: &str, value: &str) -> bool;
}
