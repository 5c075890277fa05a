//! Animation set registry.
//!
//! Holds the immutable frame data of every animation set, keyed by set name
//! (`"knight"`, `"goblin"`) and then by action name. Frame lists are shared
//! through `Arc`, so building an actor only allocates fresh playback cursors.
//!
//! # Data format
//!
//! ```json
//! {
//!   "knight": {
//!     "idle": {
//!       "sheet": "knight",
//!       "frames": [
//!         { "sprite": [0, 0, 16, 28], "hitbox": [2, 10, 12, 18], "duration": 9 }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! `sprite` is `[x, y, width, height]` on the sheet, `hitbox` is
//! `[offset_x, offset_y, width, height]` relative to the actor position and
//! `duration` defaults to [`DEFAULT_FRAME_DURATION`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::components::animation::{
    DEFAULT_FRAME_DURATION, Frame, FrameAnimator, FrameTiming, SpriteRef,
};
use crate::components::arbiter::ActionArbiter;
use crate::error::ActorError;

const BUILTIN_ANIMATIONS: &str = include_str!("../../assets/animations.json");

#[derive(Debug, Deserialize)]
struct AnimationDef {
    sheet: String,
    frames: Vec<FrameDef>,
}

#[derive(Debug, Deserialize)]
struct FrameDef {
    sprite: [f32; 4],
    #[serde(default)]
    hitbox: Option<[f32; 4]>,
    #[serde(default)]
    duration: Option<u32>,
}

impl FrameDef {
    fn into_frame(self, sheet: &Arc<str>) -> Frame {
        let [x, y, width, height] = self.sprite;
        let mut frame = Frame::new(SpriteRef::new(sheet.clone(), Vec2::new(x, y)), width, height)
            .with_duration(self.duration.unwrap_or(DEFAULT_FRAME_DURATION));
        if let Some([ox, oy, w, h]) = self.hitbox {
            frame = frame.with_hitbox(Vec2::new(ox, oy), Vec2::new(w, h));
        }
        frame
    }
}

/// Central registry of animation sets.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    sets: FxHashMap<String, FxHashMap<String, Arc<[Frame]>>>,
    timing: FrameTiming,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document of animation sets.
    pub fn from_json_str(text: &str) -> Result<Self, ActorError> {
        let raw: BTreeMap<String, BTreeMap<String, AnimationDef>> = serde_json::from_str(text)?;
        let mut store = Self::new();
        for (set, actions) in raw {
            for (action, def) in actions {
                let sheet: Arc<str> = Arc::from(def.sheet.as_str());
                let frames: Vec<Frame> = def
                    .frames
                    .into_iter()
                    .map(|frame| frame.into_frame(&sheet))
                    .collect();
                store.insert(&set, &action, frames)?;
            }
        }
        info!("Loaded {} animation sets", store.sets.len());
        Ok(store)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ActorError> {
        let path = path.as_ref();
        debug!("Loading animations from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets shipped with the crate.
    pub fn builtin() -> Result<Self, ActorError> {
        Self::from_json_str(BUILTIN_ANIMATIONS)
    }

    /// Timing applied to every animator built from this store.
    pub fn with_timing(mut self, timing: FrameTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    /// Add or replace one action of a set. Empty frame lists are rejected.
    pub fn insert(
        &mut self,
        set: &str,
        action: &str,
        frames: impl Into<Arc<[Frame]>>,
    ) -> Result<(), ActorError> {
        let frames = frames.into();
        if frames.is_empty() {
            return Err(ActorError::EmptyAnimation(format!("{set}.{action}")));
        }
        self.sets
            .entry(set.to_string())
            .or_default()
            .insert(action.to_string(), frames);
        Ok(())
    }

    pub fn has_set(&self, set: &str) -> bool {
        self.sets.contains_key(set)
    }

    /// Set names, sorted.
    pub fn set_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn frames(&self, set: &str, action: &str) -> Option<&Arc<[Frame]>> {
        self.sets.get(set).and_then(|actions| actions.get(action))
    }

    /// Fresh playback cursors for every action of `set`.
    pub fn animators(&self, set: &str) -> Result<FxHashMap<String, FrameAnimator>, ActorError> {
        let actions = self
            .sets
            .get(set)
            .ok_or_else(|| ActorError::UnknownSet(set.to_string()))?;
        actions
            .iter()
            .map(|(action, frames)| {
                FrameAnimator::new(frames.clone())
                    .map(|animator| (action.clone(), animator.with_timing(self.timing)))
                    .ok_or_else(|| ActorError::EmptyAnimation(format!("{set}.{action}")))
            })
            .collect()
    }

    /// Arbiter over `set`, starting in `initial`.
    pub fn arbiter(&self, set: &str, initial: &str) -> Result<ActionArbiter, ActorError> {
        ActionArbiter::new(self.animators(set)?, initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::arbiter::{ATTACK, IDLE, MOVE};

    const SAMPLE: &str = r#"{
        "hero": {
            "idle": { "sheet": "hero", "frames": [
                { "sprite": [0, 0, 16, 28] },
                { "sprite": [16, 0, 16, 28], "duration": 3 }
            ]},
            "move": { "sheet": "hero", "frames": [
                { "sprite": [0, 28, 16, 28], "hitbox": [2, 10, 12, 18] }
            ]}
        }
    }"#;

    #[test]
    fn parses_frames_and_defaults() {
        let store = AnimationStore::from_json_str(SAMPLE).expect("valid json");
        let idle = store.frames("hero", IDLE).expect("idle");
        assert_eq!(idle.len(), 2);
        assert_eq!(idle[0].duration, DEFAULT_FRAME_DURATION);
        assert_eq!(idle[1].duration, 3);
        assert_eq!(idle[1].sprite.offset, Vec2::new(16.0, 0.0));
        assert_eq!(&*idle[1].sprite.sheet, "hero");

        let step = &store.frames("hero", MOVE).expect("move")[0];
        let bbox = step.bounding_box(Vec2::new(100.0, 100.0));
        assert_eq!(bbox.min(), Vec2::new(102.0, 110.0));
        assert_eq!(bbox.max(), Vec2::new(114.0, 128.0));
    }

    #[test]
    fn builds_arbiters_sharing_frame_data() {
        let store = AnimationStore::from_json_str(SAMPLE)
            .expect("valid json")
            .with_timing(FrameTiming::SharedCounter);
        let a = store.arbiter("hero", IDLE).expect("arbiter");
        let b = store.arbiter("hero", MOVE).expect("arbiter");
        assert_eq!(a.animation().timing(), FrameTiming::SharedCounter);
        assert!(Arc::ptr_eq(
            a.animation_for(MOVE).expect("move").frames(),
            b.animation().frames()
        ));
    }

    #[test]
    fn missing_pieces_are_errors() {
        let store = AnimationStore::from_json_str(SAMPLE).expect("valid json");
        assert!(matches!(store.arbiter("ghost", IDLE), Err(ActorError::UnknownSet(_))));
        assert!(matches!(
            store.arbiter("hero", ATTACK),
            Err(ActorError::UnknownAction(_))
        ));
        assert!(matches!(
            AnimationStore::from_json_str(r#"{"x": {"idle": {"sheet": "x", "frames": []}}}"#),
            Err(ActorError::EmptyAnimation(name)) if name == "x.idle"
        ));
        assert!(matches!(
            AnimationStore::from_json_str("{ not json"),
            Err(ActorError::Parse(_))
        ));
    }

    #[test]
    fn builtin_sets_are_complete() {
        let store = AnimationStore::builtin().expect("builtin animations");
        let knight = store.arbiter("knight", IDLE).expect("knight");
        for action in [IDLE, MOVE, ATTACK] {
            assert!(knight.has_action(action), "knight lacks {action}");
        }
        for monster in ["goblin", "imp", "tiny_zombie"] {
            let arbiter = store.arbiter(monster, MOVE).expect(monster);
            assert!(arbiter.has_action(IDLE));
        }
    }
}
