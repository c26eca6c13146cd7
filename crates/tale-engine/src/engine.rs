//! State machine implementation.

use chrono::Utc;

use tale_story::{Choice, FlagMap, Scene, Story};

use crate::error::{EngineError, EngineResult};
use crate::events::Listeners;
use crate::snapshot::{HistoryEntry, Snapshot};

/// The narrative state machine.
///
/// Owns the immutable story graph plus the mutable play state: the current
/// scene id, the accumulated flag map, and the ordered choice history. All
/// mutation goes through [`select_choice`], [`go_to_scene`], [`go_back`],
/// [`restart`], and [`load_state`].
///
/// [`select_choice`]: StoryEngine::select_choice
/// [`go_to_scene`]: StoryEngine::go_to_scene
/// [`go_back`]: StoryEngine::go_back
/// [`restart`]: StoryEngine::restart
/// [`load_state`]: StoryEngine::load_state
pub struct StoryEngine {
    story: Story,
    start_scene: String,
    current_scene_id: String,
    flags: FlagMap,
    history: Vec<HistoryEntry>,
    listeners: Listeners,
}

impl StoryEngine {
    /// Create an engine positioned at the story's configured start scene.
    ///
    /// Nothing is entered yet; no listeners fire until [`start`] or the
    /// first navigation.
    ///
    /// [`start`]: StoryEngine::start
    pub fn new(story: Story) -> Self {
        let start_scene = story.start().to_string();
        Self {
            current_scene_id: start_scene.clone(),
            start_scene,
            story,
            flags: FlagMap::new(),
            history: Vec::new(),
            listeners: Listeners::new(),
        }
    }

    /// Override the start scene used by [`start`] and [`restart`].
    ///
    /// [`start`]: StoryEngine::start
    /// [`restart`]: StoryEngine::restart
    pub fn with_start_scene(mut self, scene_id: impl Into<String>) -> Self {
        self.start_scene = scene_id.into();
        self.current_scene_id.clone_from(&self.start_scene);
        self
    }

    /// The story being played.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// The id of the scene the machine is currently on.
    pub fn current_scene_id(&self) -> &str {
        &self.current_scene_id
    }

    /// The current scene record, if the current id resolves.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.story.scene(&self.current_scene_id)
    }

    /// The accumulated flag map.
    pub fn flags(&self) -> &FlagMap {
        &self.flags
    }

    /// The ordered choice history.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Register a listener fired after every scene entry.
    pub fn on_scene_changed(&mut self, listener: impl FnMut(&Scene, &str) + 'static) {
        self.listeners.on_scene_changed(listener);
    }

    /// Register a listener fired when a choice is selected.
    pub fn on_choice_selected(&mut self, listener: impl FnMut(&Choice, usize) + 'static) {
        self.listeners.on_choice_selected(listener);
    }

    /// Register a listener fired when an ending scene is entered.
    pub fn on_game_ended(&mut self, listener: impl FnMut(&Scene, &str) + 'static) {
        self.listeners.on_game_ended(listener);
    }

    /// Enter the configured start scene.
    pub fn start(&mut self) -> EngineResult<()> {
        let start = self.start_scene.clone();
        self.go_to_scene(&start).map(|_| ())
    }

    /// Navigate to a scene by id.
    ///
    /// On an unknown id the operation is a logged no-op: state is unchanged
    /// and `SceneNotFound` is returned. On success the scene-changed
    /// listeners fire, followed by game-ended if the scene is an ending. The
    /// machine never auto-transitions past an ending.
    pub fn go_to_scene(&mut self, scene_id: &str) -> EngineResult<&Scene> {
        if !self.story.contains(scene_id) {
            tracing::warn!(scene = scene_id, "scene not found");
            return Err(EngineError::SceneNotFound(scene_id.to_string()));
        }

        self.current_scene_id.clear();
        self.current_scene_id.push_str(scene_id);
        tracing::debug!(scene = scene_id, "entered scene");

        let scene = self
            .story
            .scene(scene_id)
            .ok_or_else(|| EngineError::SceneNotFound(scene_id.to_string()))?;
        self.listeners.notify_scene_changed(scene);
        if scene.is_ending {
            self.listeners.notify_game_ended(scene);
        }
        Ok(scene)
    }

    /// The current scene's choices whose conditions hold, in authored order.
    ///
    /// Choice indices elsewhere in the API are relative to this filtered
    /// view. A non-ending scene with no surviving choices is a dead end; the
    /// caller observes an empty list.
    pub fn available_choices(&self) -> Vec<&Choice> {
        self.current_scene()
            .map(|scene| {
                scene
                    .choices
                    .iter()
                    .filter(|c| c.is_available(&self.flags))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Select a choice by its index in the filtered choice list.
    ///
    /// The filtered list is re-derived inside the call, so the index always
    /// refers to the list as of this moment. On success: a history entry is
    /// appended, the choice's flags are merged (overwriting existing keys),
    /// choice-selected listeners fire, and the transition is resolved and
    /// taken. A conditional transition with no matching branch leaves the
    /// scene unchanged and returns `NoMatchingBranch`; the history entry
    /// and flag merge are not rolled back.
    pub fn select_choice(&mut self, index: usize) -> EngineResult<()> {
        let choice = match self.available_choices().get(index) {
            Some(choice) => (*choice).clone(),
            None => {
                tracing::warn!(index, scene = %self.current_scene_id, "invalid choice");
                return Err(EngineError::InvalidChoice(index));
            }
        };

        self.history.push(HistoryEntry {
            scene_id: self.current_scene_id.clone(),
            choice_index: index,
            choice_text: choice.text.clone(),
            timestamp: Utc::now().timestamp_millis(),
        });

        for (key, value) in &choice.set_flags {
            self.flags.insert(key.clone(), value.clone());
        }

        self.listeners.notify_choice_selected(&choice, index);

        match choice.next.resolve(&self.flags) {
            Some(target) => {
                let target = target.to_string();
                self.go_to_scene(&target).map(|_| ())
            }
            None => {
                tracing::warn!(
                    scene = %self.current_scene_id,
                    choice = index,
                    "conditional transition exhausted, staying put"
                );
                Err(EngineError::NoMatchingBranch {
                    scene: self.current_scene_id.clone(),
                    choice: index,
                })
            }
        }
    }

    /// Undo the last choice: pop the tail history entry and navigate back to
    /// the scene it was made on.
    ///
    /// This is a navigation-only rewind. Flags set by the undone choice stay
    /// applied. Returns `false` when there is nothing to undo, or when the
    /// recorded scene no longer resolves.
    pub fn go_back(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        self.go_to_scene(&entry.scene_id).is_ok()
    }

    /// Reset to the start scene, clearing history and flags, and re-enter it.
    pub fn restart(&mut self) -> EngineResult<()> {
        self.history.clear();
        self.flags.clear();
        self.start()
    }

    /// Capture the machine's navigable state.
    ///
    /// `saved_at` is stamped now; `slot_name` is left empty for the
    /// persistence store to fill.
    pub fn save_state(&self) -> Snapshot {
        Snapshot {
            current_scene_id: self.current_scene_id.clone(),
            history: self.history.clone(),
            flags: self.flags.clone(),
            saved_at: Utc::now().timestamp_millis(),
            slot_name: String::new(),
        }
    }

    /// Restore a snapshot, then re-enter its scene.
    ///
    /// Re-entering goes through [`go_to_scene`], so scene-changed and
    /// game-ended listeners fire exactly as with normal navigation. If the
    /// snapshot's scene is missing from the graph the history and flags are
    /// still restored and `SceneNotFound` is returned.
    ///
    /// [`go_to_scene`]: StoryEngine::go_to_scene
    pub fn load_state(&mut self, snapshot: Snapshot) -> EngineResult<()> {
        self.history = snapshot.history;
        self.flags = snapshot.flags;
        self.go_to_scene(&snapshot.current_scene_id).map(|_| ())
    }
}
