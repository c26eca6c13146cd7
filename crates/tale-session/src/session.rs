//! The session controller.

use tale_engine::{EngineResult, StoryEngine};
use tale_save::{SaveStore, SlotSummary, StorageBackend};
use tale_story::Story;

use crate::config::SessionConfig;

/// One play session: the engine plus its save store.
///
/// Navigation methods ([`start_fresh`], [`choose`], [`back`], [`restart`])
/// write an automatic snapshot after each successful scene transition.
/// Restoration ([`resume`], [`load`]) never does; restoring is not
/// navigation.
///
/// [`start_fresh`]: StorySession::start_fresh
/// [`choose`]: StorySession::choose
/// [`back`]: StorySession::back
/// [`restart`]: StorySession::restart
/// [`resume`]: StorySession::resume
/// [`load`]: StorySession::load
pub struct StorySession<B> {
    engine: StoryEngine,
    store: SaveStore<B>,
    autosave: bool,
}

impl<B: StorageBackend> StorySession<B> {
    /// Create a session for `story` persisting through `backend`.
    ///
    /// Nothing is entered yet: the frontend checks [`has_auto_save`] and
    /// calls either [`resume`] or [`start_fresh`].
    ///
    /// [`has_auto_save`]: StorySession::has_auto_save
    /// [`resume`]: StorySession::resume
    /// [`start_fresh`]: StorySession::start_fresh
    pub fn new(story: Story, backend: B, config: SessionConfig) -> Self {
        let mut engine = StoryEngine::new(story);
        if let Some(start) = &config.start_scene {
            engine = engine.with_start_scene(start);
        }
        Self {
            engine,
            store: SaveStore::new(&config.game_id, backend),
            autosave: config.autosave,
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &StoryEngine {
        &self.engine
    }

    /// Mutable access to the engine, e.g. for listener registration.
    pub fn engine_mut(&mut self) -> &mut StoryEngine {
        &mut self.engine
    }

    /// The underlying save store.
    pub fn store(&self) -> &SaveStore<B> {
        &self.store
    }

    /// Whether an automatic snapshot exists to offer for restoration.
    pub fn has_auto_save(&self) -> bool {
        self.store.has_auto_save()
    }

    /// Restore the automatic snapshot. Returns `false` when there is none
    /// or it no longer applies to this story.
    pub fn resume(&mut self) -> bool {
        let Some(snapshot) = self.store.load_auto() else {
            return false;
        };
        match self.engine.load_state(snapshot) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "auto-save restoration failed");
                false
            }
        }
    }

    /// Begin a fresh playthrough at the start scene.
    pub fn start_fresh(&mut self) -> EngineResult<()> {
        self.engine.start()?;
        self.write_auto_save();
        Ok(())
    }

    /// Select a choice by filtered index, auto-saving after the transition.
    ///
    /// On `NoMatchingBranch` the scene did not change, so no snapshot is
    /// written; the error is surfaced for the frontend to report.
    pub fn choose(&mut self, index: usize) -> EngineResult<()> {
        self.engine.select_choice(index)?;
        self.write_auto_save();
        Ok(())
    }

    /// Undo the last choice, auto-saving when navigation succeeded.
    pub fn back(&mut self) -> bool {
        if self.engine.go_back() {
            self.write_auto_save();
            true
        } else {
            false
        }
    }

    /// Restart from the beginning, auto-saving the fresh state.
    pub fn restart(&mut self) -> EngineResult<()> {
        self.engine.restart()?;
        self.write_auto_save();
        Ok(())
    }

    /// Manually save to a named slot. Free-form names; last write wins.
    pub fn save(&mut self, slot: &str) -> bool {
        self.store.put(slot, self.engine.save_state())
    }

    /// Load a named slot. Returns `false` on an absent or corrupt slot, or
    /// when the snapshot does not apply to this story.
    pub fn load(&mut self, slot: &str) -> bool {
        let Some(snapshot) = self.store.get(slot) else {
            return false;
        };
        match self.engine.load_state(snapshot) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(slot, error = %e, "slot restoration failed");
                false
            }
        }
    }

    /// Summaries of all stored slots, newest first.
    pub fn saves(&self) -> Vec<SlotSummary> {
        self.store.list()
    }

    /// Delete a named slot.
    pub fn delete_save(&mut self, slot: &str) -> bool {
        self.store.delete(slot)
    }

    /// Delete every slot for this game.
    pub fn delete_all_saves(&mut self) {
        self.store.delete_all();
    }

    fn write_auto_save(&mut self) {
        if self.autosave && !self.store.auto_save(self.engine.save_state()) {
            tracing::warn!("auto-save write failed");
        }
    }
}
