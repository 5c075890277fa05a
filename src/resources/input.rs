//! Per-tick input flags.
//!
//! Whatever translates devices (or a script) into intent writes
//! [`InputState`] before each tick; the
//! [`apply_player_input`](crate::systems::input::apply_player_input) system
//! copies it onto the player. The core never sees raw key events.

use bevy_ecs::prelude::*;

use crate::components::actor::{Direction, Directions};

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    pub directions: Directions,
    pub attack: bool,
    /// Whether anything was held when the previous tick applied input.
    pub(crate) held_last_tick: bool,
}

impl InputState {
    pub fn set_direction(&mut self, direction: Direction, held: bool) {
        self.directions.set(direction, held);
    }

    pub fn set_attack(&mut self, held: bool) {
        self.attack = held;
    }

    /// Replace both flags at once.
    pub fn set(&mut self, directions: Directions, attack: bool) {
        self.directions = directions;
        self.attack = attack;
    }

    pub fn any_held(&self) -> bool {
        self.attack || self.directions.any()
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.directions.clear();
        self.attack = false;
    }

    /// True on the tick every input went up after something was held.
    pub fn all_released(&self) -> bool {
        self.held_last_tick && !self.any_held()
    }
}
