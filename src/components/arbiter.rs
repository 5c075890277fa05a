//! Action arbitration.
//!
//! An [`ActionArbiter`] owns one [`FrameAnimator`] per declared action and
//! decides whether a requested transition may happen right now. A request
//! for `name` is granted when any of these holds:
//!
//! - the current animation finished its current frame this tick
//! - the current action is [`IDLE`] (idle is always interruptible)
//! - `name` is in the prioritized set
//!
//! A denied request changes nothing; callers retry on a later tick.

use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::animation::{Frame, FrameAnimator};
use crate::error::ActorError;

pub const IDLE: &str = "idle";
pub const MOVE: &str = "move";
pub const ATTACK: &str = "attack";

#[derive(Debug, Clone)]
pub struct ActionArbiter {
    labels: Vec<String>,
    animators: Vec<FrameAnimator>,
    index: FxHashMap<String, usize>,
    current: usize,
    prioritized: FxHashSet<String>,
    /// Latched request to fall back to idle; cleared by a successful stop.
    pub will_stop: bool,
}

impl ActionArbiter {
    /// Build an arbiter starting in `initial`.
    ///
    /// Fails when the map has no [`IDLE`] entry or `initial` is unknown.
    pub fn new(
        animations: FxHashMap<String, FrameAnimator>,
        initial: &str,
    ) -> Result<Self, ActorError> {
        if !animations.contains_key(IDLE) {
            return Err(ActorError::MissingIdle);
        }

        // Stable ordering keeps debug output reproducible.
        let mut entries: Vec<(String, FrameAnimator)> = animations.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut labels = Vec::with_capacity(entries.len());
        let mut animators = Vec::with_capacity(entries.len());
        let mut index = FxHashMap::default();
        for (slot, (label, animator)) in entries.into_iter().enumerate() {
            index.insert(label.clone(), slot);
            labels.push(label);
            animators.push(animator);
        }

        let current = *index
            .get(initial)
            .ok_or_else(|| ActorError::UnknownAction(initial.to_string()))?;

        Ok(Self {
            labels,
            animators,
            index,
            current,
            prioritized: FxHashSet::default(),
            will_stop: false,
        })
    }

    /// Current action name.
    pub fn action(&self) -> &str {
        &self.labels[self.current]
    }

    pub fn is_idle(&self) -> bool {
        self.action() == IDLE
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declared action names, sorted.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<(), ActorError> {
        if self.has_action(name) {
            Ok(())
        } else {
            Err(ActorError::UnknownAction(name.to_string()))
        }
    }

    /// Allow `name` to interrupt a running, unfinished action.
    pub fn prioritize(&mut self, name: &str) -> Result<(), ActorError> {
        self.require(name)?;
        self.prioritized.insert(name.to_string());
        Ok(())
    }

    pub fn is_prioritized(&self, name: &str) -> bool {
        self.prioritized.contains(name)
    }

    /// Would a request for `name` be granted this tick?
    pub fn can_enter(&self, name: &str) -> bool {
        self.animation().is_current_frame_done() || self.is_idle() || self.is_prioritized(name)
    }

    /// Request a transition to `name`, resetting its animation on success.
    ///
    /// # Panics
    ///
    /// If `name` has no animation. Actor constructors validate every action
    /// their behaviors use, so this only fires on programming errors.
    pub fn set_action(&mut self, name: &str) -> bool {
        match self.try_set_action(name) {
            Ok(granted) => granted,
            Err(err) => panic!("{err}"),
        }
    }

    /// Non-panicking form of [`ActionArbiter::set_action`].
    pub fn try_set_action(&mut self, name: &str) -> Result<bool, ActorError> {
        let slot = *self
            .index
            .get(name)
            .ok_or_else(|| ActorError::UnknownAction(name.to_string()))?;

        if !self.can_enter(name) {
            trace!("transition {} -> {} denied", self.action(), name);
            return Ok(false);
        }

        trace!("transition {} -> {}", self.action(), name);
        self.current = slot;
        self.animators[slot].reset();
        Ok(true)
    }

    /// Animator of the current action.
    pub fn animation(&self) -> &FrameAnimator {
        &self.animators[self.current]
    }

    pub fn animation_mut(&mut self) -> &mut FrameAnimator {
        &mut self.animators[self.current]
    }

    /// Animator registered under `name`, whether or not it is playing.
    pub fn animation_for(&self, name: &str) -> Option<&FrameAnimator> {
        self.index.get(name).map(|&slot| &self.animators[slot])
    }

    /// Step the current animation one tick.
    pub fn advance(&mut self) {
        self.animation_mut().advance();
    }

    pub fn current_frame(&self) -> &Frame {
        self.animation().current_frame()
    }
}
