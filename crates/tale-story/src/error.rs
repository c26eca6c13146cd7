//! Error types for story loading.

use thiserror::Error;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur when loading a story document.
///
/// These are the only fatal conditions in the system: a story that is not a
/// well-formed record set must be rejected before any engine exists. Dangling
/// scene references are deliberately not load errors: they surface as
/// authoring lints and fail navigation at runtime instead.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The document is not valid story JSON.
    #[error("invalid story document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured start scene does not exist in the graph.
    #[error("start scene not found: \"{0}\"")]
    MissingStartScene(String),
}
