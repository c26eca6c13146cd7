//! Scenes, choices, and transitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::FlagMap;
use crate::condition::Condition;
use crate::value::FlagValue;

/// A node in the narrative graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Scene identifier. Filled from the story's scene-map key at load time.
    #[serde(default)]
    pub id: String,
    /// The narrative text shown when the scene is entered.
    pub text: String,
    /// Available choices, in authored order.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Whether this scene is an ending (a terminal state).
    #[serde(default)]
    pub is_ending: bool,
    /// Title shown on the ending screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending_title: Option<String>,
    /// Epilogue text shown on the ending screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending_text: Option<String>,
}

impl Scene {
    /// Create a new scene with the given ID and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
            is_ending: false,
            ending_title: None,
            ending_text: None,
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Mark the scene as an ending with a title and epilogue.
    pub fn with_ending(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.is_ending = true;
        self.ending_title = Some(title.into());
        self.ending_text = Some(text.into());
        self
    }
}

/// An edge candidate from a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// The text shown to the player.
    pub text: String,
    /// The rule resolving this choice to a target scene.
    pub next: Transition,
    /// Condition gating whether the choice is offered at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Flags merged into the flag map when this choice is selected.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub set_flags: HashMap<String, FlagValue>,
}

impl Choice {
    /// Create a new choice with the given text and transition.
    pub fn new(text: impl Into<String>, next: impl Into<Transition>) -> Self {
        Self {
            text: text.into(),
            next: next.into(),
            condition: None,
            set_flags: HashMap::new(),
        }
    }

    /// Gate the choice behind a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set a flag when this choice is selected.
    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.set_flags.insert(key.into(), value.into());
        self
    }

    /// Whether the choice is offered under the given flag map.
    pub fn is_available(&self, flags: &FlagMap) -> bool {
        self.condition.as_ref().is_none_or(|c| c.evaluate(flags))
    }
}

/// The rule resolving a choice to its target scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Transition {
    /// A direct scene-id reference.
    Scene(String),
    /// Conditional branches, evaluated in authored order; first match wins.
    Branches(Vec<Branch>),
}

impl Transition {
    /// Resolve the transition to a target scene id under the given flags.
    ///
    /// Returns `None` when every branch condition fails; the caller decides
    /// how to surface the exhausted transition.
    pub fn resolve(&self, flags: &FlagMap) -> Option<&str> {
        match self {
            Self::Scene(id) => Some(id),
            Self::Branches(branches) => branches
                .iter()
                .find(|b| b.when.evaluate(flags))
                .map(|b| b.scene.as_str()),
        }
    }

    /// All scene ids this transition can possibly target.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Scene(id) => vec![id],
            Self::Branches(branches) => branches.iter().map(|b| b.scene.as_str()).collect(),
        }
    }
}

impl From<&str> for Transition {
    fn from(scene_id: &str) -> Self {
        Self::Scene(scene_id.to_string())
    }
}

impl From<String> for Transition {
    fn from(scene_id: String) -> Self {
        Self::Scene(scene_id)
    }
}

impl From<Vec<Branch>> for Transition {
    fn from(branches: Vec<Branch>) -> Self {
        Self::Branches(branches)
    }
}

/// One conditional branch of a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Condition gating this branch. Empty means "always taken".
    #[serde(rename = "if", default)]
    pub when: Condition,
    /// Target scene id when the condition holds.
    pub scene: String,
}

impl Branch {
    /// Create a branch targeting the given scene.
    pub fn new(when: Condition, scene: impl Into<String>) -> Self {
        Self {
            when,
            scene: scene.into(),
        }
    }

    /// Create an unconditional fallback branch.
    pub fn fallback(scene: impl Into<String>) -> Self {
        Self::new(Condition::new(), scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_transition_from_json() {
        let choice: Choice = serde_json::from_str(r#"{"text": "go", "next": "clearing"}"#).unwrap();
        assert_eq!(choice.next, Transition::Scene("clearing".to_string()));
        assert!(choice.condition.is_none());
        assert!(choice.set_flags.is_empty());
    }

    #[test]
    fn conditional_transition_from_json() {
        let choice: Choice = serde_json::from_str(
            r#"{
                "text": "press on",
                "next": [
                    {"if": {"metGuide": true}, "scene": "safePath"},
                    {"if": {}, "scene": "dangerPath"}
                ]
            }"#,
        )
        .unwrap();

        let Transition::Branches(branches) = &choice.next else {
            panic!("expected conditional transition");
        };
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].scene, "safePath");
        assert!(branches[1].when.is_empty());
    }

    #[test]
    fn first_match_wins() {
        let transition: Transition = vec![
            Branch::new(Condition::new().require("metGuide", true), "safePath"),
            Branch::fallback("dangerPath"),
        ]
        .into();

        let mut flags = FlagMap::new();
        assert_eq!(transition.resolve(&flags), Some("dangerPath"));

        flags.insert("metGuide".to_string(), true.into());
        assert_eq!(transition.resolve(&flags), Some("safePath"));
    }

    #[test]
    fn exhausted_branches_resolve_to_none() {
        let transition: Transition =
            vec![Branch::new(Condition::new().require("key", true), "vault")].into();
        assert_eq!(transition.resolve(&FlagMap::new()), None);
    }

    #[test]
    fn choice_availability() {
        let choice = Choice::new("whisper the password", "inner_door")
            .with_condition(Condition::new().require("knowsPassword", true));

        let mut flags = FlagMap::new();
        assert!(!choice.is_available(&flags));

        flags.insert("knowsPassword".to_string(), true.into());
        assert!(choice.is_available(&flags));

        // No condition means always offered.
        assert!(Choice::new("wait", "camp").is_available(&FlagMap::new()));
    }

    #[test]
    fn set_flags_from_json() {
        let choice: Choice = serde_json::from_str(
            r#"{"text": "go", "next": "clearing", "setFlags": {"metGuide": true, "coins": 2}}"#,
        )
        .unwrap();
        assert_eq!(
            choice.set_flags.get("metGuide"),
            Some(&FlagValue::Bool(true))
        );
        assert_eq!(choice.set_flags.get("coins"), Some(&FlagValue::Integer(2)));
    }

    #[test]
    fn transition_targets() {
        let t: Transition = "clearing".into();
        assert_eq!(t.targets(), vec!["clearing"]);

        let t: Transition = vec![
            Branch::new(Condition::new().require("a", true), "b"),
            Branch::fallback("c"),
        ]
        .into();
        assert_eq!(t.targets(), vec!["b", "c"]);
    }
}
