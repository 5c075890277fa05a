//! Behaviors registered into an [`Actor`](crate::components::actor::Actor).
//!
//! A behavior is a predicate plus an action over [`ActorState`]. Every tick
//! the actor asks each behavior [`Behavior::is_ready`] and calls
//! [`Behavior::perform`] on all that answer yes. Behaviors that need the
//! outside world (scheduler, walls, the chase target, effect spawning) get it
//! through a [`TickContext`] built fresh for every actor update.
//!
//! Submodules overview:
//! - [`movement`] – displace along held directions, revert on wall contact
//! - [`attack`] – cooldown-gated attack with a press-and-hold latch
//! - [`chase`] – steer monsters towards a target box

pub mod attack;
pub mod chase;
pub mod movement;

use std::fmt;

use bevy_ecs::prelude::Entity;

use crate::components::actor::ActorState;
use crate::components::boundingbox::BoundingBox;
use crate::components::effect::EffectSpawn;
use crate::resources::arena::CollisionQuery;
use crate::resources::scheduler::TaskScheduler;

/// World access handed to behaviors for one actor update.
pub struct TickContext<'a> {
    pub scheduler: &'a mut TaskScheduler,
    pub boundary: &'a dyn CollisionQuery,
    pub rng: &'a mut fastrand::Rng,
    pub spawns: &'a mut Vec<EffectSpawn>,
    /// Box the actor is pursuing, if any.
    pub target: Option<BoundingBox>,
    /// Entity being updated.
    pub entity: Option<Entity>,
}

impl<'a> TickContext<'a> {
    pub fn new(
        scheduler: &'a mut TaskScheduler,
        boundary: &'a dyn CollisionQuery,
        rng: &'a mut fastrand::Rng,
        spawns: &'a mut Vec<EffectSpawn>,
    ) -> Self {
        Self {
            scheduler,
            boundary,
            rng,
            spawns,
            target: None,
            entity: None,
        }
    }

    pub fn with_target(mut self, target: Option<BoundingBox>) -> Self {
        self.target = target;
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }
}

/// A (predicate, action) pair evaluated every tick.
pub trait Behavior: Send + Sync {
    /// Short name for logs and debug output.
    fn label(&self) -> &str;

    /// Actions this behavior may request; checked when it is registered.
    fn actions(&self) -> &'static [&'static str] {
        &[]
    }

    fn is_ready(&self, actor: &ActorState) -> bool;

    fn perform(&mut self, actor: &mut ActorState, ctx: &mut TickContext<'_>);

    /// Give back scheduler tasks owned by the behavior.
    fn release(&mut self, _scheduler: &mut TaskScheduler) {}
}

type Predicate = Box<dyn Fn(&ActorState) -> bool + Send + Sync>;
type Action = Box<dyn FnMut(&mut ActorState, &mut TickContext<'_>) + Send + Sync>;

/// Behavior made of two closures.
pub struct FnBehavior {
    label: String,
    predicate: Predicate,
    action: Action,
}

impl FnBehavior {
    pub fn new<P, A>(label: impl Into<String>, predicate: P, action: A) -> Self
    where
        P: Fn(&ActorState) -> bool + Send + Sync + 'static,
        A: FnMut(&mut ActorState, &mut TickContext<'_>) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
            action: Box::new(action),
        }
    }
}

impl Behavior for FnBehavior {
    fn label(&self) -> &str {
        &self.label
    }

    fn is_ready(&self, actor: &ActorState) -> bool {
        (self.predicate)(actor)
    }

    fn perform(&mut self, actor: &mut ActorState, ctx: &mut TickContext<'_>) {
        (self.action)(actor, ctx)
    }
}

impl fmt::Debug for FnBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBehavior")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
