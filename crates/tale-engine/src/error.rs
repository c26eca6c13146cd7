//! Error types for the engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while traversing a story.
///
/// All of these are recoverable and local: the session keeps running, the
/// caller decides how to surface them. None of them leaves the engine in an
/// unusable state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The navigation target does not exist in the story graph.
    #[error("scene not found: \"{0}\"")]
    SceneNotFound(String),

    /// The choice index is out of range for the current filtered choice list.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// A conditional transition was exhausted with no matching branch.
    ///
    /// The scene does not change; flags and history set by the selection
    /// remain applied. Usually a content authoring issue.
    #[error("no branch matched for choice {choice} in scene \"{scene}\"")]
    NoMatchingBranch {
        /// Scene the choice was selected in.
        scene: String,
        /// Filtered index of the selected choice.
        choice: usize,
    },
}
