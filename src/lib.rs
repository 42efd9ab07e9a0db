//! # Jotter Architecture
//!
//! Jotter is a **UI-agnostic note store** for offline-first note apps. The
//! crate owns the data, its consistency discipline, and its timing behavior;
//! a host (desktop shell, web view, TUI, test harness) owns the pixels and
//! the event loop.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (event loop, editor widgets, toasts)                  │
//! │  - implements RenderSink, arms one timer via next_wakeup()  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ mutations in, renders out
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  NoteStore (store.rs)                                       │
//! │  - canonical collection, selection, search projection       │
//! │  - SaveScheduler debounce + DeletionLifecycle gate          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ raw strings
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Codec (codec.rs) over StorageBackend (storage/)            │
//! │  - defensive decode: a corrupt record never fails the load  │
//! │  - FileBackend (production), MemoryBackend (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key principles
//!
//! - **Single-threaded and pull-driven.** The store never spawns threads or
//!   blocks. Its two timers (save debounce, deletion delay) are deadlines
//!   against an injected [`clock::Clock`]; the host calls
//!   [`store::NoteStore::tick`] when [`store::NoteStore::next_wakeup`] says
//!   so. Tests drive time with [`clock::ManualClock`].
//! - **Failure is reported, never raised.** Storage absence/failure reads as
//!   "nothing persisted"; write failure becomes a warning notice while the
//!   in-memory state stays authoritative and the user can retry.
//! - **Mutations are capability-gated.** While a deletion is pending, every
//!   other mutation is rejected in the core, so non-UI callers observe the
//!   same guarantee the disabled editor gives the user.
//!
//! ## Module overview
//!
//! - [`store`]: the `NoteStore` facade — entry point for all operations
//! - [`model`]: `Note` and `NotePatch`
//! - [`storage`]: the persistence adapter trait and its backends
//! - [`codec`]: tolerant (de)serialization of the persisted entries
//! - [`scheduler`]: debounced save deadline
//! - [`lifecycle`]: the Idle/Pending deletion state machine
//! - [`render`]: the presentation collaborator boundary
//! - [`export`]: portable backup snapshots
//! - [`clipboard`]: system clipboard collaborator for exports
//! - [`clock`]: time source seam
//! - [`error`]: error types

pub mod clipboard;
pub mod clock;
pub mod codec;
pub mod error;
pub mod export;
pub mod lifecycle;
pub mod model;
pub mod render;
pub mod scheduler;
pub mod storage;
pub mod store;

pub use error::{JotterError, Result};
pub use model::{Note, NotePatch};
pub use store::{NoteStore, StoreOptions};
