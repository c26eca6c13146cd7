//! Play-session controller for the Talespinner engine.
//!
//! [`StorySession`] is the one object a frontend holds: it owns the
//! [`tale_engine::StoryEngine`] and the [`tale_save::SaveStore`] and
//! enforces the orchestration rules between them: an automatic snapshot
//! after every successful navigation, manual slots by name, and auto-save
//! restoration on session start. There are no ambient singletons; construct
//! one session per play and pass it by reference.

/// Session configuration.
pub mod config;
/// The session controller.
pub mod session;

pub use config::SessionConfig;
pub use session::StorySession;
