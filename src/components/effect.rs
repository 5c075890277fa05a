//! Transient hit boxes.
//!
//! Attackers describe what they leave behind with an [`EffectTemplate`]. When
//! an attack starts, the attack behavior queues an [`EffectSpawn`]; the
//! [`spawn_effects`](crate::systems::effects::spawn_effects) system turns
//! queued spawns into [`Effect`] entities later in the same tick.
//!
//! An effect lives until its expiry task completes in the
//! [`TaskScheduler`], until it slides into a wall, or (for `once` effects)
//! until it hits something. Removing an effect early cancels its expiry task.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::components::actor::Facing;
use crate::components::animation::FrameAnimator;
use crate::components::boundingbox::BoundingBox;
use crate::resources::arena::CollisionQuery;
use crate::resources::scheduler::{TaskId, TaskScheduler};

/// Side an effect fights for. Effects only hurt the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Player,
    Monster,
}

#[derive(Debug, Clone)]
pub struct EffectTemplate {
    pub animator: FrameAnimator,
    pub faction: Faction,
    /// Placement relative to the attacker when facing right.
    pub offset_right: Vec2,
    /// Placement relative to the attacker when facing left.
    pub offset_left: Vec2,
    pub damage: f32,
    /// Disappear after the first hit.
    pub once: bool,
    /// Horizontal pixels per tick along the attacker's facing.
    pub speed: f32,
    /// Lifetime in ticks, counting the tick it was spawned on.
    pub duration: u32,
}

impl EffectTemplate {
    pub fn new(animator: FrameAnimator, faction: Faction, duration: u32) -> Self {
        Self {
            animator,
            faction,
            offset_right: Vec2::ZERO,
            offset_left: Vec2::ZERO,
            damage: 0.0,
            once: true,
            speed: 0.0,
            duration,
        }
    }

    pub fn with_offsets(mut self, right: Vec2, left: Vec2) -> Self {
        self.offset_right = right;
        self.offset_left = left;
        self
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn spawn_at(&self, position: Vec2, facing: Facing, source: Option<Entity>) -> EffectSpawn {
        let offset = match facing {
            Facing::Right => self.offset_right,
            Facing::Left => self.offset_left,
        };
        EffectSpawn {
            template: self.clone(),
            position: position + offset,
            facing,
            source,
        }
    }
}

/// An effect waiting to be spawned.
#[derive(Debug, Clone)]
pub struct EffectSpawn {
    pub template: EffectTemplate,
    pub position: Vec2,
    pub facing: Facing,
    pub source: Option<Entity>,
}

#[derive(Component, Debug)]
pub struct Effect {
    pub animator: FrameAnimator,
    pub position: Vec2,
    pub facing: Facing,
    pub faction: Faction,
    pub source: Option<Entity>,
    pub damage: f32,
    pub once: bool,
    pub speed: f32,
    expiry: TaskId,
    expired: bool,
}

impl Effect {
    /// Build the effect and schedule its expiry.
    pub fn from_spawn(spawn: EffectSpawn, scheduler: &mut TaskScheduler) -> Self {
        let EffectSpawn {
            template,
            position,
            facing,
            source,
        } = spawn;
        // Spawned after this tick's scheduler step, so the spawn tick counts
        // towards the lifetime.
        let expiry = scheduler.set_timeout(template.duration);
        let mut animator = template.animator;
        animator.reset();
        Self {
            animator,
            position,
            facing,
            faction: template.faction,
            source,
            damage: template.damage,
            once: template.once,
            speed: template.speed,
            expiry,
            expired: false,
        }
    }

    pub fn expiry(&self) -> TaskId {
        self.expiry
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.animator.current_frame().bounding_box(self.position)
    }

    /// One tick. Returns `false` once the effect should be removed.
    pub fn update(&mut self, scheduler: &TaskScheduler, boundary: &dyn CollisionQuery) -> bool {
        if self.expired {
            return false;
        }
        if scheduler.is_task_done(self.expiry) {
            self.expired = true;
            return false;
        }

        self.animator.advance();

        if self.speed > 0.0 {
            self.position.x += self.facing.sign() * self.speed;
            if boundary.collides_with_boundary(&self.bounding_box()) {
                return false;
            }
        }
        true
    }

    /// Cancel the expiry task unless it already ran out.
    pub fn destroy(&mut self, scheduler: &mut TaskScheduler) {
        if !self.expired {
            scheduler.cancel(self.expiry);
            self.expired = true;
        }
    }
}
