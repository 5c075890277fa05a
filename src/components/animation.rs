//! Frame-sequenced animation playback.
//!
//! A [`FrameAnimator`] walks an immutable, shared list of [`Frame`]s. Each
//! frame stays on screen for `duration + 1` ticks; the animator is stepped
//! once per simulation tick with [`FrameAnimator::advance`] and reports two
//! edge-triggered flags for that tick:
//!
//! - [`FrameAnimator::is_current_frame_done`] – the cursor moved this tick
//! - [`FrameAnimator::is_all_frames_done`] – the cursor wrapped back to frame 0
//!
//! Arbitration code reads these right after the advance, so they always
//! describe the current tick.
//!
//! # Related
//!
//! - [`crate::components::arbiter::ActionArbiter`] – owns one animator per action
//! - [`crate::resources::animationstore::AnimationStore`] – shared frame data

use std::sync::Arc;

use glam::Vec2;

use crate::components::boundingbox::BoundingBox;

/// Ticks a frame lasts when the data does not say otherwise.
pub const DEFAULT_FRAME_DURATION: u32 = 9;

/// Where a frame's pixels live. Opaque to the simulation, read by renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteRef {
    /// Sprite sheet key.
    pub sheet: Arc<str>,
    /// Top-left corner of the frame on the sheet.
    pub offset: Vec2,
}

impl SpriteRef {
    pub fn new(sheet: impl Into<Arc<str>>, offset: Vec2) -> Self {
        Self {
            sheet: sheet.into(),
            offset,
        }
    }

    /// A sprite that draws nothing. Used by invisible hit boxes.
    pub fn blank() -> Self {
        Self::new("", Vec2::ZERO)
    }
}

/// Optional collision rectangle overriding the sprite rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub offset: Vec2,
    pub size: Vec2,
}

/// One renderable step of an animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub sprite: SpriteRef,
    pub width: f32,
    pub height: f32,
    /// Extra ticks the frame is held; the frame lasts `duration + 1` ticks.
    pub duration: u32,
    pub hitbox: Option<Hitbox>,
}

impl Frame {
    pub fn new(sprite: SpriteRef, width: f32, height: f32) -> Self {
        Self {
            sprite,
            width,
            height,
            duration: DEFAULT_FRAME_DURATION,
            hitbox: None,
        }
    }

    /// Invisible frame of the given size, held for a single tick.
    pub fn blank(width: f32, height: f32) -> Self {
        Self::new(SpriteRef::blank(), width, height).with_duration(0)
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_hitbox(mut self, offset: Vec2, size: Vec2) -> Self {
        self.hitbox = Some(Hitbox { offset, size });
        self
    }

    /// Collision box of this frame when drawn at `position`.
    pub fn bounding_box(&self, position: Vec2) -> BoundingBox {
        match self.hitbox {
            Some(hitbox) => BoundingBox::new(position, hitbox.size).with_offset(hitbox.offset),
            None => BoundingBox::new(position, Vec2::new(self.width, self.height)),
        }
    }
}

/// How the tick counter behind frame changes is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameTiming {
    /// Counter restarts at every frame change; frame `i` lasts exactly
    /// `duration_i + 1` ticks.
    #[default]
    PerFrame,
    /// One counter runs for the whole cycle and is tested modulo the current
    /// frame's `duration + 1`. Frames of different lengths drift from their
    /// nominal duration; kept for content tuned against that pacing.
    SharedCounter,
}

impl FrameTiming {
    /// Parse a config value (`per_frame` / `shared_counter`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "per_frame" | "perframe" => Some(Self::PerFrame),
            "shared_counter" | "sharedcounter" | "legacy" => Some(Self::SharedCounter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerFrame => "per_frame",
            Self::SharedCounter => "shared_counter",
        }
    }
}

/// Playback cursor over a shared frame sequence.
///
/// Cloning yields an independent cursor over the same frames.
#[derive(Debug, Clone)]
pub struct FrameAnimator {
    frames: Arc<[Frame]>,
    timing: FrameTiming,
    index: usize,
    counter: u64,
    frame_done: bool,
    all_done: bool,
}

impl FrameAnimator {
    /// Returns `None` for an empty frame list.
    pub fn new(frames: impl Into<Arc<[Frame]>>) -> Option<Self> {
        let frames = frames.into();
        if frames.is_empty() {
            return None;
        }
        Some(Self {
            frames,
            timing: FrameTiming::default(),
            index: 0,
            counter: 0,
            frame_done: false,
            all_done: false,
        })
    }

    pub fn with_timing(mut self, timing: FrameTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    /// Back to frame 0 with both flags cleared and the counter restarted.
    pub fn reset(&mut self) {
        self.index = 0;
        self.counter = 0;
        self.frame_done = false;
        self.all_done = false;
    }

    /// Step one tick.
    pub fn advance(&mut self) {
        self.counter += 1;
        let period = u64::from(self.frames[self.index].duration) + 1;
        let boundary = match self.timing {
            FrameTiming::PerFrame => self.counter >= period,
            FrameTiming::SharedCounter => self.counter % period == 0,
        };

        if boundary {
            self.index = (self.index + 1) % self.frames.len();
            if self.timing == FrameTiming::PerFrame {
                self.counter = 0;
            }
            self.frame_done = true;
            self.all_done = self.index == 0;
        } else {
            self.frame_done = false;
            self.all_done = false;
        }
    }

    /// Advance, then hand back the frame to draw.
    pub fn next_frame(&mut self) -> &Frame {
        self.advance();
        self.current_frame()
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.index]
    }

    pub fn current_frame_index(&self) -> usize {
        self.index
    }

    pub fn is_current_frame_done(&self) -> bool {
        self.frame_done
    }

    pub fn is_all_frames_done(&self) -> bool {
        self.all_done
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &Arc<[Frame]> {
        &self.frames
    }

    /// Ticks in one full cycle under [`FrameTiming::PerFrame`].
    pub fn cycle_length(&self) -> u64 {
        self.frames
            .iter()
            .map(|frame| u64::from(frame.duration) + 1)
            .sum()
    }
}
