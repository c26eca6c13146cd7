//! Condition evaluation for gated choices and branches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::FlagMap;
use crate::value::FlagValue;

/// A predicate over the flag map.
///
/// Satisfied iff every required entry is present in the flag map with an
/// exactly equal value. An empty condition is vacuously satisfied; a missing
/// flag never matches, whatever value is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition {
    requirements: HashMap<String, FlagValue>,
}

impl Condition {
    /// Create an empty (always satisfied) condition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a flag to hold an exact value.
    pub fn require(mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.requirements.insert(key.into(), value.into());
        self
    }

    /// Evaluate the condition against the current flag map.
    pub fn evaluate(&self, flags: &FlagMap) -> bool {
        self.requirements
            .iter()
            .all(|(key, required)| flags.get(key) == Some(required))
    }

    /// Whether the condition has no requirements.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Number of required entries.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }
}
