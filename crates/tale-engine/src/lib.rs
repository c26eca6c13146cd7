//! Narrative state machine for the Talespinner engine.
//!
//! [`StoryEngine`] walks a [`tale_story::Story`] graph: it tracks the current
//! scene, accumulates flags set by choices, keeps an ordered choice history
//! for undo, and notifies registered listeners on every transition. The whole
//! machine is single-threaded and synchronous: every operation completes
//! before it returns, which is what makes the history and flag invariants
//! hold without locking.

/// State machine implementation.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// Synchronous listener registration and dispatch.
pub mod events;
/// Cooperative, cancelable text reveal.
pub mod reveal;
/// Serializable snapshots of engine state.
pub mod snapshot;

pub use engine::StoryEngine;
pub use error::{EngineError, EngineResult};
pub use reveal::{Tick, Typewriter};
pub use snapshot::{HistoryEntry, Snapshot};
