//! Frame clip registry.
//!
//! A minimal store of reusable frame animations keyed by string IDs. Queues
//! play a clip through [`ActionQueue::animate_clip`](crate::actions::ActionQueue::animate_clip).
//!
//! # JSON format
//!
//! ```json
//! {
//!   "clips": {
//!     "walk": { "frames": ["walk_0", "walk_1", "walk_2"], "fps": 12.0 },
//!     "blink": { "frames": ["open", "closed"], "fps": 8.0, "repetitions": 3 }
//!   }
//! }
//! ```

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ActionError, check_frame_rate};

/// Immutable description of a frame animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameClip {
    /// Frame references, in display order.
    pub frames: Vec<String>,
    /// Frames per second.
    pub fps: f32,
    /// Number of frame advances before the animation ends. Loops forever when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<u32>,
}

/// Central registry of frame clips keyed by name.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameStore {
    pub clips: FxHashMap<String, FrameClip>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads clips from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, ActionError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ActionError::ClipLoad(format!("{}: {}", path, e)))?;
        Self::from_json_str(&content)
    }

    /// Parses clips from JSON text. Every clip is validated up front.
    pub fn from_json_str(json: &str) -> Result<Self, ActionError> {
        let store: FrameStore =
            serde_json::from_str(json).map_err(|e| ActionError::ClipLoad(e.to_string()))?;
        for clip in store.clips.values() {
            if clip.frames.is_empty() {
                return Err(ActionError::EmptyFrameList);
            }
            check_frame_rate(clip.fps)?;
        }
        Ok(store)
    }

    pub fn insert(&mut self, key: impl Into<String>, clip: FrameClip) {
        self.clips.insert(key.into(), clip);
    }

    pub fn get(&self, key: &str) -> Result<&FrameClip, ActionError> {
        self.clips
            .get(key)
            .ok_or_else(|| ActionError::UnknownClip(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIPS: &str = r#"{
        "clips": {
            "walk": { "frames": ["walk_0", "walk_1", "walk_2"], "fps": 12.0 },
            "blink": { "frames": ["open", "closed"], "fps": 8.0, "repetitions": 3 }
        }
    }"#;

    #[test]
    fn test_parse_clips() {
        let store = FrameStore::from_json_str(CLIPS).unwrap();
        assert_eq!(store.clips.len(), 2);

        let walk = store.get("walk").unwrap();
        assert_eq!(walk.frames, vec!["walk_0", "walk_1", "walk_2"]);
        assert_eq!(walk.fps, 12.0);
        assert_eq!(walk.repetitions, None);
        assert_eq!(store.get("blink").unwrap().repetitions, Some(3));
    }

    #[test]
    fn test_unknown_clip() {
        let store = FrameStore::new();
        assert_eq!(
            store.get("run").unwrap_err(),
            ActionError::UnknownClip("run".into())
        );
    }

    #[test]
    fn test_rejects_empty_frames_and_bad_fps() {
        let empty = r#"{ "clips": { "x": { "frames": [], "fps": 10.0 } } }"#;
        assert_eq!(
            FrameStore::from_json_str(empty).unwrap_err(),
            ActionError::EmptyFrameList
        );
        let zero = r#"{ "clips": { "x": { "frames": ["a"], "fps": 0.0 } } }"#;
        assert_eq!(
            FrameStore::from_json_str(zero).unwrap_err(),
            ActionError::InvalidFrameRate(0.0)
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            FrameStore::from_json_str("{ nope"),
            Err(ActionError::ClipLoad(_))
        ));
        assert!(matches!(
            FrameStore::load_from_file("./missing_clips.json"),
            Err(ActionError::ClipLoad(_))
        ));
    }

    #[test]
    fn test_insert_and_serialize() {
        let mut store = FrameStore::new();
        store.insert(
            "idle",
            FrameClip {
                frames: vec!["idle_0".into()],
                fps: 1.0,
                repetitions: Some(1),
            },
        );
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(FrameStore::from_json_str(&json).unwrap(), store);
    }
}
