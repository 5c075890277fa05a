//! Render snapshot.
//!
//! The simulation never draws. Once per frame
//! [`collect_render_snapshot`](crate::systems::render::collect_render_snapshot)
//! copies what a renderer needs (frame, position, facing) into
//! [`RenderQueue`], in back-to-front order: effects, monsters, then the
//! player.

use bevy_ecs::prelude::{Entity, Resource};
use glam::Vec2;

use crate::components::actor::Facing;
use crate::components::animation::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderLayer {
    Effect,
    Monster,
    Player,
}

#[derive(Debug, Clone)]
pub struct RenderItem {
    pub entity: Entity,
    pub layer: RenderLayer,
    pub frame: Frame,
    pub frame_index: usize,
    pub position: Vec2,
    pub facing: Facing,
    /// Current action name; empty for effects.
    pub action: String,
    /// Remaining health share, when the entity has health.
    pub health: Option<f32>,
}

#[derive(Resource, Debug, Default)]
pub struct RenderQueue {
    pub items: Vec<RenderItem>,
    /// Frames collected so far.
    pub frame: u64,
    /// Tick fraction left over when the snapshot was taken; renderers may
    /// extrapolate moving sprites by it.
    pub alpha: f32,
}

impl RenderQueue {
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn layer(&self, layer: RenderLayer) -> impl Iterator<Item = &RenderItem> {
        self.items.iter().filter(move |item| item.layer == layer)
    }
}
