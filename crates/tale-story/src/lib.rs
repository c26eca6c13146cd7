//! Scene graph data model for the Talespinner narrative engine.
//!
//! A story is a directed graph of scenes. Each scene carries display text and
//! an ordered list of choices; each choice resolves to the next scene either
//! directly or through an ordered list of conditional branches gated on the
//! accumulated flag map. This crate holds the static, authored side of the
//! system: the graph itself, the flag value model, and the pure condition
//! evaluator. Runtime traversal lives in `tale-engine`.

/// Condition evaluation for gated choices and branches.
pub mod condition;
/// Error types for story loading.
pub mod error;
/// Scenes, choices, and transitions.
pub mod scene;
/// The story container and authoring lints.
pub mod story;
/// Typed flag values.
pub mod value;

pub use condition::Condition;
pub use error::{StoryError, StoryResult};
pub use scene::{Branch, Choice, Scene, Transition};
pub use story::{LintWarning, Story};
pub use value::FlagValue;

use std::collections::HashMap;

/// The flag map accumulated during play: named, typed values set by choices.
pub type FlagMap = HashMap<String, FlagValue>;
