//! Session configuration.

/// Configuration for a play session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Identifier scoping this game's save slots.
    pub game_id: String,
    /// Override for the story's own start scene, if set.
    pub start_scene: Option<String>,
    /// Whether to write an automatic snapshot after each transition.
    pub autosave: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_id: "story".to_string(),
            start_scene: None,
            autosave: true,
        }
    }
}

impl SessionConfig {
    /// Create a configuration for the given game id.
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            ..Self::default()
        }
    }

    /// Override the start scene.
    pub fn with_start_scene(mut self, scene_id: impl Into<String>) -> Self {
        self.start_scene = Some(scene_id.into());
        self
    }

    /// Enable or disable automatic snapshots.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.game_id, "story");
        assert!(cfg.start_scene.is_none());
        assert!(cfg.autosave);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::new("forest")
            .with_start_scene("prologue")
            .with_autosave(false);
        assert_eq!(cfg.game_id, "forest");
        assert_eq!(cfg.start_scene.as_deref(), Some("prologue"));
        assert!(!cfg.autosave);
    }
}
