//! Actor component: arbiter, spatial state and registered behaviors.
//!
//! An [`Actor`] is split in two halves so behaviors can borrow the data they
//! mutate while the actor iterates its behavior list:
//!
//! - [`ActorState`] – arbiter, position, facing, direction flags, speed and
//!   optional attack state
//! - the behavior registry – boxed [`Behavior`]s evaluated every tick
//!
//! Each tick [`Actor::update`] advances the current animation first, then
//! either retries a pending stop or runs every ready behavior, most recently
//! registered first. Behaviors arbitrate for themselves through
//! [`ActorState::set_action`].

use std::fmt;

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::behaviors::attack::{AttackBehavior, AttackHook, AttackState};
use crate::behaviors::movement::MoveBehavior;
use crate::behaviors::{Behavior, FnBehavior, TickContext};
use crate::components::arbiter::{ATTACK, ActionArbiter, IDLE, MOVE};
use crate::components::boundingbox::BoundingBox;
use crate::error::ActorError;
use crate::resources::arena::CollisionQuery;
use crate::resources::scheduler::TaskScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn opposite(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Screen-space unit step; y grows downwards.
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Four independent direction flags. Any subset may be held at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Directions([bool; 4]);

impl Directions {
    pub fn get(&self, direction: Direction) -> bool {
        self.0[direction.slot()]
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        self.0[direction.slot()] = held;
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&held| held)
    }

    pub fn clear(&mut self) {
        self.0 = [false; 4];
    }

    /// Held directions in Up, Right, Down, Left order.
    pub fn active(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|&d| self.get(d))
    }
}

impl FromIterator<Direction> for Directions {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut directions = Directions::default();
        for direction in iter {
            directions.set(direction, true);
        }
        directions
    }
}

/// When a latched stop request may be honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopRule {
    /// As soon as the arbiter grants `idle`.
    #[default]
    Immediate,
    /// After an attack has been started, only on the tick its animation
    /// completes a full cycle.
    AwaitAttackCycle,
}

/// Everything behaviors read and write.
#[derive(Debug, Clone)]
pub struct ActorState {
    pub arbiter: ActionArbiter,
    pub position: Vec2,
    pub facing: Facing,
    pub directions: Directions,
    /// Displacement per tick and held direction.
    pub speed: f32,
    pub attack: Option<AttackState>,
    pub stop_rule: StopRule,
}

impl ActorState {
    pub fn new(arbiter: ActionArbiter, position: Vec2) -> Self {
        Self {
            arbiter,
            position,
            facing: Facing::default(),
            directions: Directions::default(),
            speed: 1.0,
            attack: None,
            stop_rule: StopRule::default(),
        }
    }

    pub fn action(&self) -> &str {
        self.arbiter.action()
    }

    pub fn set_action(&mut self, name: &str) -> bool {
        self.arbiter.set_action(name)
    }

    /// Hitbox of the current frame at the current position.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box_at(self.position)
    }

    pub fn bounding_box_at(&self, position: Vec2) -> BoundingBox {
        self.arbiter.current_frame().bounding_box(position)
    }

    /// Latch a return to idle; honored on a later tick.
    pub fn request_stop(&mut self) {
        self.arbiter.will_stop = true;
    }

    pub fn has_attacked(&self) -> bool {
        self.attack.as_ref().is_some_and(|attack| attack.has_attacked)
    }

    pub fn can_stop(&self) -> bool {
        match self.stop_rule {
            StopRule::Immediate => true,
            StopRule::AwaitAttackCycle => {
                !self.has_attacked() || self.arbiter.animation().is_all_frames_done()
            }
        }
    }

    /// Try to return to idle. Clears the stop latch and the attack latch only
    /// when idle was actually reached.
    pub fn stop(&mut self) -> bool {
        if !self.can_stop() {
            return false;
        }
        if !self.arbiter.is_idle() && !self.arbiter.set_action(IDLE) {
            return false;
        }
        self.arbiter.will_stop = false;
        if let Some(attack) = self.attack.as_mut() {
            attack.has_attacked = false;
        }
        true
    }

    /// Shift horizontally by `distance`, undoing the shift if it hits a wall.
    pub fn knock_back(&mut self, distance: f32, boundary: &dyn CollisionQuery) -> bool {
        let origin = self.position;
        self.position.x += distance;
        if boundary.collides_with_boundary(&self.bounding_box()) {
            self.position = origin;
            return false;
        }
        true
    }
}

/// Arbitrated, animated entity.
#[derive(Component)]
pub struct Actor {
    state: ActorState,
    behaviors: Vec<Box<dyn Behavior>>,
}

impl Actor {
    /// Actor with no behaviors.
    pub fn new(arbiter: ActionArbiter, position: Vec2) -> Self {
        Self {
            state: ActorState::new(arbiter, position),
            behaviors: Vec::new(),
        }
    }

    /// Actor with the default move behavior.
    pub fn mover(arbiter: ActionArbiter, position: Vec2, speed: f32) -> Result<Self, ActorError> {
        let mut actor = Self::new(arbiter, position);
        actor.state.speed = speed;
        actor.with_behavior(MoveBehavior)
    }

    /// Add an attack with `interval` ticks of cooldown.
    ///
    /// `attack` becomes prioritized, and stops wait for the swing to finish.
    pub fn with_attack(mut self, interval: u32, hook: AttackHook) -> Result<Self, ActorError> {
        self.state.arbiter.prioritize(ATTACK)?;
        self.state.attack = Some(AttackState::new(interval, hook));
        self.state.stop_rule = StopRule::AwaitAttackCycle;
        self.with_behavior(AttackBehavior)
    }

    /// Register a behavior after checking the actions it needs exist.
    pub fn with_behavior<B: Behavior + 'static>(mut self, behavior: B) -> Result<Self, ActorError> {
        for action in behavior.actions() {
            self.state.arbiter.require(action)?;
        }
        self.behaviors.push(Box::new(behavior));
        Ok(self)
    }

    /// Register a closure pair as a behavior.
    pub fn register_fn<P, A>(&mut self, label: impl Into<String>, predicate: P, action: A)
    where
        P: Fn(&ActorState) -> bool + Send + Sync + 'static,
        A: FnMut(&mut ActorState, &mut TickContext<'_>) + Send + Sync + 'static,
    {
        self.behaviors
            .push(Box::new(FnBehavior::new(label, predicate, action)));
    }

    pub fn state(&self) -> &ActorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ActorState {
        &mut self.state
    }

    pub fn behavior_labels(&self) -> impl Iterator<Item = &str> {
        self.behaviors.iter().map(|behavior| behavior.label())
    }

    /// One simulation tick.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.state.arbiter.advance();

        if self.state.arbiter.will_stop {
            self.state.stop();
            return;
        }

        for behavior in self.behaviors.iter_mut().rev() {
            if behavior.is_ready(&self.state) {
                behavior.perform(&mut self.state, ctx);
            }
        }
    }

    /// Release every scheduler task the actor owns and drop its behaviors.
    pub fn destroy(&mut self, scheduler: &mut TaskScheduler) {
        for behavior in self.behaviors.iter_mut() {
            behavior.release(scheduler);
        }
        if let Some(cooldown) = self.state.attack.as_mut().and_then(|a| a.cooldown.take()) {
            scheduler.cancel(cooldown);
        }
        self.behaviors.clear();
    }

    pub fn is_destroyed(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("action", &self.state.action())
            .field("position", &self.state.position)
            .field("facing", &self.state.facing)
            .field("will_stop", &self.state.arbiter.will_stop)
            .field("behaviors", &self.behavior_labels().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::{Frame, FrameAnimator};
    use rustc_hash::FxHashMap;

    fn arbiter(actions: &[(&str, u32, usize)], initial: &str) -> ActionArbiter {
        let mut animations = FxHashMap::default();
        for &(name, duration, count) in actions {
            let frames: Vec<Frame> = (0..count)
                .map(|_| Frame::blank(10.0, 10.0).with_duration(duration))
                .collect();
            animations.insert(name.to_string(), FrameAnimator::new(frames).expect("frames"));
        }
        ActionArbiter::new(animations, initial).expect("arbiter")
    }

    #[test]
    fn directions_are_independent() {
        let mut directions = Directions::default();
        directions.set(Direction::Up, true);
        directions.set(Direction::Left, true);
        assert!(directions.any());
        assert_eq!(
            directions.active().collect::<Vec<_>>(),
            vec![Direction::Up, Direction::Left]
        );
        directions.clear();
        assert!(!directions.any());
    }

    #[test]
    fn mover_requires_move_action() {
        let result = Actor::mover(arbiter(&[(IDLE, 1, 1)], IDLE), Vec2::ZERO, 1.0);
        assert!(matches!(result, Err(ActorError::UnknownAction(name)) if name == MOVE));
    }

    #[test]
    fn attack_requires_attack_action() {
        let actor = Actor::mover(arbiter(&[(IDLE, 1, 1), (MOVE, 1, 1)], IDLE), Vec2::ZERO, 1.0)
            .expect("mover");
        assert!(actor.with_attack(10, AttackHook::None).is_err());
    }

    #[test]
    fn stop_from_idle_clears_latch_immediately() {
        let mut state = ActorState::new(arbiter(&[(IDLE, 3, 2)], IDLE), Vec2::ZERO);
        state.request_stop();
        assert!(state.stop());
        assert!(!state.arbiter.will_stop);
    }

    #[test]
    fn stop_waits_for_frame_when_not_prioritized() {
        let mut state = ActorState::new(arbiter(&[(IDLE, 1, 1), (MOVE, 2, 2)], MOVE), Vec2::ZERO);
        state.request_stop();
        state.arbiter.advance();
        assert!(!state.stop());
        assert!(state.arbiter.will_stop);
        state.arbiter.advance();
        state.arbiter.advance();
        assert!(state.stop());
        assert_eq!(state.action(), IDLE);
    }

    #[test]
    fn knock_back_reverts_into_walls() {
        let mut state = ActorState::new(arbiter(&[(IDLE, 1, 1)], IDLE), Vec2::new(20.0, 0.0));
        let wall = |bbox: &BoundingBox| bbox.min().x < 0.0;
        assert!(!state.knock_back(-25.0, &wall));
        assert_eq!(state.position, Vec2::new(20.0, 0.0));
        assert!(state.knock_back(5.0, &wall));
        assert_eq!(state.position, Vec2::new(25.0, 0.0));
    }

    #[test]
    fn destroy_clears_registry() {
        let mut scheduler = TaskScheduler::new();
        let mut actor = Actor::mover(arbiter(&[(IDLE, 1, 1), (MOVE, 1, 1)], IDLE), Vec2::ZERO, 1.0)
            .expect("mover");
        actor.register_fn("noop", |_| true, |_, _| {});
        assert_eq!(actor.behavior_labels().count(), 2);
        actor.destroy(&mut scheduler);
        assert!(actor.is_destroyed());
    }
}
