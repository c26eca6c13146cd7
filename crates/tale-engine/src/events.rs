//! Synchronous listener registration and dispatch.
//!
//! Listeners are plain boxed closures invoked in registration order, on the
//! caller's thread, before the triggering operation returns. Ordering
//! guarantees elsewhere in the engine depend on this staying synchronous.

use std::fmt;

use tale_story::{Choice, Scene};

type SceneListener = Box<dyn FnMut(&Scene, &str)>;
type ChoiceListener = Box<dyn FnMut(&Choice, usize)>;

/// Registered listeners for the three engine events.
#[derive(Default)]
pub struct Listeners {
    scene_changed: Vec<SceneListener>,
    choice_selected: Vec<ChoiceListener>,
    game_ended: Vec<SceneListener>,
}

impl Listeners {
    /// Create an empty listener set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener fired after every scene entry.
    pub fn on_scene_changed(&mut self, listener: impl FnMut(&Scene, &str) + 'static) {
        self.scene_changed.push(Box::new(listener));
    }

    /// Register a listener fired when a choice is selected.
    pub fn on_choice_selected(&mut self, listener: impl FnMut(&Choice, usize) + 'static) {
        self.choice_selected.push(Box::new(listener));
    }

    /// Register a listener fired when an ending scene is entered.
    pub fn on_game_ended(&mut self, listener: impl FnMut(&Scene, &str) + 'static) {
        self.game_ended.push(Box::new(listener));
    }

    pub(crate) fn notify_scene_changed(&mut self, scene: &Scene) {
        for listener in &mut self.scene_changed {
            listener(scene, &scene.id);
        }
    }

    pub(crate) fn notify_choice_selected(&mut self, choice: &Choice, index: usize) {
        for listener in &mut self.choice_selected {
            listener(choice, index);
        }
    }

    pub(crate) fn notify_game_ended(&mut self, scene: &Scene) {
        for listener in &mut self.game_ended {
            listener(scene, &scene.id);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("scene_changed", &self.scene_changed.len())
            .field("choice_selected", &self.choice_selected.len())
            .field("game_ended", &self.game_ended.len())
            .finish()
    }
}
