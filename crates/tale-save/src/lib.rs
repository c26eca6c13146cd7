//! Slot-based snapshot persistence for the Talespinner engine.
//!
//! [`SaveStore`] maps `(game id, slot name)` pairs to serialized
//! [`tale_engine::Snapshot`] values over a pluggable [`StorageBackend`].
//! Save data is not safety-critical, so the whole crate is deliberately
//! fail-soft: backend failures report `false`, absent keys are `None`, and
//! corrupt entries are logged and treated as absent rather than crashing the
//! caller.

/// Key-value backend trait and implementations.
pub mod backend;
/// The slot-keyed snapshot store.
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use store::{AUTO_SLOT, SaveStore, SlotSummary};
