//! Serializable snapshots of engine state.
//!
//! The snapshot JSON field names are part of the save-file format and must
//! stay stable across reimplementations: `currentSceneId`, `history`,
//! `flags`, `savedAt`, `slotName`.

use serde::{Deserialize, Serialize};

use tale_story::FlagMap;

/// One selected choice, as recorded in the engine's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Scene the player was on when the choice was made.
    pub scene_id: String,
    /// Index of the choice within the filtered list shown at the time.
    pub choice_index: usize,
    /// Resolved display text of the choice.
    pub choice_text: String,
    /// Epoch milliseconds when the choice was made.
    pub timestamp: i64,
}

/// A serializable capture of the machine's full navigable state.
///
/// `load_state(save_state())` restores `current_scene_id`, `history`, and
/// `flags` exactly. `saved_at` is stamped at serialize time and `slot_name`
/// is filled by the persistence store on write; neither participates in the
/// round-trip contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Scene the session was on.
    pub current_scene_id: String,
    /// Ordered choice history.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Accumulated flag map.
    #[serde(default)]
    pub flags: FlagMap,
    /// Epoch milliseconds when the snapshot was serialized.
    #[serde(default)]
    pub saved_at: i64,
    /// Persistence slot the snapshot was written to.
    #[serde(default)]
    pub slot_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tale_story::FlagValue;

    #[test]
    fn snapshot_uses_stable_field_names() {
        let snapshot = Snapshot {
            current_scene_id: "clearing".to_string(),
            history: vec![HistoryEntry {
                scene_id: "start".to_string(),
                choice_index: 0,
                choice_text: "go".to_string(),
                timestamp: 1_700_000_000_000,
            }],
            flags: [("metGuide".to_string(), FlagValue::Bool(true))]
                .into_iter()
                .collect(),
            saved_at: 1_700_000_000_500,
            slot_name: "auto".to_string(),
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&snapshot).unwrap()).unwrap();
        assert_eq!(json["currentSceneId"], "clearing");
        assert_eq!(json["history"][0]["sceneId"], "start");
        assert_eq!(json["history"][0]["choiceIndex"], 0);
        assert_eq!(json["history"][0]["choiceText"], "go");
        assert_eq!(json["flags"]["metGuide"], true);
        assert_eq!(json["savedAt"], 1_700_000_000_500i64);
        assert_eq!(json["slotName"], "auto");
    }

    #[test]
    fn missing_optional_fields_default() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"currentSceneId": "start"}"#).unwrap();
        assert_eq!(snapshot.current_scene_id, "start");
        assert!(snapshot.history.is_empty());
        assert!(snapshot.flags.is_empty());
        assert_eq!(snapshot.saved_at, 0);
        assert!(snapshot.slot_name.is_empty());
    }
}
