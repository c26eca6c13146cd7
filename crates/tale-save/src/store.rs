//! The slot-keyed snapshot store.

use chrono::Utc;

use tale_engine::Snapshot;

use crate::backend::StorageBackend;

/// Slot name reserved for automatic snapshots taken after scene transitions.
pub const AUTO_SLOT: &str = "auto";

/// A slot-keyed snapshot store for one game.
///
/// Keys follow the scheme `story-save-<gameId>-<slot>`. Slot names are
/// free-form and collide silently: writing an existing slot overwrites it.
/// All operations are synchronous and fail-soft: nothing here ever
/// propagates a storage error past the save boundary.
#[derive(Debug)]
pub struct SaveStore<B> {
    backend: B,
    prefix: String,
}

/// What [`SaveStore::list`] reports about one stored slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSummary {
    /// The slot's name.
    pub slot_name: String,
    /// Epoch milliseconds when the slot was written.
    pub saved_at: i64,
    /// Scene the snapshot was taken on.
    pub current_scene_id: String,
}

impl<B: StorageBackend> SaveStore<B> {
    /// Create a store for the given game id over `backend`.
    pub fn new(game_id: &str, backend: B) -> Self {
        Self {
            backend,
            prefix: format!("story-save-{game_id}"),
        }
    }

    fn key(&self, slot: &str) -> String {
        format!("{}-{slot}", self.prefix)
    }

    /// Write a snapshot to a slot, stamping `saved_at` and `slot_name`.
    ///
    /// Returns `false` when serialization or the backend write fails; the
    /// failure is logged, never thrown.
    pub fn put(&mut self, slot: &str, mut snapshot: Snapshot) -> bool {
        snapshot.saved_at = Utc::now().timestamp_millis();
        snapshot.slot_name = slot.to_string();

        match serde_json::to_string(&snapshot) {
            Ok(data) => self.backend.set(&self.key(slot), &data),
            Err(e) => {
                tracing::warn!(slot, error = %e, "snapshot serialization failed");
                false
            }
        }
    }

    /// Read a snapshot from a slot.
    ///
    /// Absent slots return `None`. Corrupt data is logged and treated as
    /// absent; save data is not safety-critical.
    pub fn get(&self, slot: &str) -> Option<Snapshot> {
        let data = self.backend.get(&self.key(slot))?;
        match serde_json::from_str(&data) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(slot, error = %e, "corrupt snapshot, treating as absent");
                None
            }
        }
    }

    /// Write the automatic snapshot.
    pub fn auto_save(&mut self, snapshot: Snapshot) -> bool {
        self.put(AUTO_SLOT, snapshot)
    }

    /// Read the automatic snapshot.
    pub fn load_auto(&self) -> Option<Snapshot> {
        self.get(AUTO_SLOT)
    }

    /// Whether an automatic snapshot exists (and parses).
    pub fn has_auto_save(&self) -> bool {
        self.load_auto().is_some()
    }

    /// Summaries of every stored slot, newest first.
    ///
    /// Corrupt entries are skipped (with a warning) rather than reported.
    pub fn list(&self) -> Vec<SlotSummary> {
        let marker = format!("{}-", self.prefix);
        let mut summaries: Vec<SlotSummary> = self
            .backend
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&marker))
            .filter_map(|key| {
                let data = self.backend.get(&key)?;
                match serde_json::from_str::<Snapshot>(&data) {
                    Ok(snapshot) => Some(SlotSummary {
                        slot_name: snapshot.slot_name,
                        saved_at: snapshot.saved_at,
                        current_scene_id: snapshot.current_scene_id,
                    }),
                    Err(e) => {
                        tracing::warn!(key, error = %e, "skipping corrupt save entry");
                        None
                    }
                }
            })
            .collect();
        summaries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        summaries
    }

    /// Delete a slot. Deleting an absent slot succeeds.
    pub fn delete(&mut self, slot: &str) -> bool {
        self.backend.remove(&self.key(slot))
    }

    /// Delete every slot belonging to this game.
    pub fn delete_all(&mut self) {
        let marker = format!("{}-", self.prefix);
        let keys: Vec<String> = self
            .backend
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&marker))
            .collect();
        for key in keys {
            self.backend.remove(&key);
        }
    }

    /// Probe whether the backend accepts writes right now.
    pub fn is_available(&mut self) -> bool {
        let probe = format!("{}-__probe__", self.prefix);
        self.backend.set(&probe, "probe") && self.backend.remove(&probe)
    }
}
