//! Playfield bounds and the boundary collision query.
//!
//! Movement code never knows what a wall is; it only asks a
//! [`CollisionQuery`] whether a displaced box hits something. [`Arena`] is the
//! rectangular room used by the simulation, but any
//! `Fn(&BoundingBox) -> bool` closure works too, which keeps behaviors easy to
//! drive from tests.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::boundingbox::BoundingBox;
use crate::resources::simconfig::SimConfig;

/// "Did this box hit a wall?"
pub trait CollisionQuery {
    fn collides_with_boundary(&self, bbox: &BoundingBox) -> bool;
}

impl<F> CollisionQuery for F
where
    F: Fn(&BoundingBox) -> bool,
{
    fn collides_with_boundary(&self, bbox: &BoundingBox) -> bool {
        self(bbox)
    }
}

/// Unbounded space.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBoundary;

impl CollisionQuery for NoBoundary {
    fn collides_with_boundary(&self, _bbox: &BoundingBox) -> bool {
        false
    }
}

/// Rectangular room surrounded by one tile of wall, with an extra floor strip
/// at the bottom reserved for the HUD.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub tile_size: f32,
    pub floor_margin: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            tile_size: 16.0,
            floor_margin: 16.0,
        }
    }
}

impl Arena {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            width: config.arena_width as f32,
            height: config.arena_height as f32,
            tile_size: config.tile_size as f32,
            floor_margin: config.floor_margin as f32,
        }
    }

    /// Lowest y a box may reach before touching the floor strip.
    pub fn floor(&self) -> f32 {
        self.height - self.tile_size - self.floor_margin
    }

    /// Random spawn point kept `h_offset`/`v_offset` away from the walls.
    ///
    /// Degenerate ranges (offsets larger than the room) collapse to the
    /// lower bound instead of panicking.
    pub fn random_position(&self, rng: &mut fastrand::Rng, h_offset: f32, v_offset: f32) -> Vec2 {
        let x_min = (self.tile_size + h_offset) as i32;
        let x_max = (self.width - self.tile_size - h_offset) as i32;
        let y_min = (self.tile_size * 2.0 + v_offset) as i32;
        let y_max = (self.floor() - v_offset) as i32;

        let x = if x_max > x_min { rng.i32(x_min..x_max) } else { x_min };
        let y = if y_max > y_min { rng.i32(y_min..y_max) } else { y_min };
        Vec2::new(x as f32, y as f32)
    }
}

impl CollisionQuery for Arena {
    fn collides_with_boundary(&self, bbox: &BoundingBox) -> bool {
        let (min, max) = (bbox.min(), bbox.max());
        min.x <= self.tile_size
            || max.x >= self.width - self.tile_size
            || min.y <= self.tile_size
            || max.y >= self.floor()
    }
}
