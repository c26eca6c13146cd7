//! The story container and authoring lints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{StoryError, StoryResult};
use crate::scene::Scene;

/// A complete, immutable scene graph.
///
/// Loaded once per session; the engine only ever reads from it. Scene ids are
/// the keys of the scene map, copied into each [`Scene`] record at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Story title, if the author provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Scene id the story begins at.
    #[serde(default = "default_start")]
    start: String,
    scenes: HashMap<String, Scene>,
}

fn default_start() -> String {
    "start".to_string()
}

impl Story {
    /// Create an empty story beginning at the given scene id.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            title: None,
            start: start.into(),
            scenes: HashMap::new(),
        }
    }

    /// Add a scene, keyed by its id. Replaces any scene with the same id.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.insert(scene.id.clone(), scene);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse a story from its JSON document form.
    ///
    /// Malformed documents and a missing start scene are fatal here, before
    /// any engine exists. Dangling scene references are not (see [`lint`]).
    ///
    /// [`lint`]: Story::lint
    pub fn from_json(document: &str) -> StoryResult<Self> {
        let mut story: Story = serde_json::from_str(document)?;
        for (id, scene) in &mut story.scenes {
            scene.id.clone_from(id);
        }
        if !story.scenes.contains_key(&story.start) {
            return Err(StoryError::MissingStartScene(story.start));
        }
        Ok(story)
    }

    /// The scene id the story begins at.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Whether a scene id exists in the graph.
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// Iterate over all scenes.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the story has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Check the graph for authoring problems.
    ///
    /// These are tolerated at runtime (a dangling target simply fails
    /// navigation when reached) but worth surfacing to authors.
    pub fn lint(&self) -> Vec<LintWarning> {
        let mut warnings = Vec::new();
        let mut scene_ids: Vec<&String> = self.scenes.keys().collect();
        scene_ids.sort();

        for id in scene_ids {
            let scene = &self.scenes[id];
            for (index, choice) in scene.choices.iter().enumerate() {
                for target in choice.next.targets() {
                    if !self.scenes.contains_key(target) {
                        warnings.push(LintWarning::DanglingTarget {
                            scene: id.clone(),
                            choice: index,
                            target: target.to_string(),
                        });
                    }
                }
            }
            if !scene.is_ending && scene.choices.is_empty() {
                warnings.push(LintWarning::DeadEnd { scene: id.clone() });
            }
        }
        warnings
    }
}

/// An authoring problem found by [`Story::lint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// A transition references a scene that does not exist.
    #[error("scene \"{scene}\", choice {choice}: target scene \"{target}\" does not exist")]
    DanglingTarget {
        /// Scene containing the offending choice.
        scene: String,
        /// Index of the choice within the scene.
        choice: usize,
        /// The missing target scene id.
        target: String,
    },

    /// A non-ending scene offers no choices.
    #[error("scene \"{scene}\" has no choices and is not an ending")]
    DeadEnd {
        /// The dead-end scene id.
        scene: String,
    },
}
