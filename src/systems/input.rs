//! Input system.
//!
//! [`apply_player_input`] copies the [`InputState`] flags onto the player
//! actor before anything else runs in the tick. Releasing every input latches
//! a stop request, so the player settles back to idle once the current action
//! allows it.
use bevy_ecs::prelude::*;

use crate::components::actor::Actor;
use crate::components::markers::{PendingRemoval, Player};
use crate::resources::input::InputState;

/// Write direction and attack flags onto every live player.
pub fn apply_player_input(
    mut input: ResMut<InputState>,
    mut players: Query<&mut Actor, (With<Player>, Without<PendingRemoval>)>,
) {
    let released = input.all_released();
    for mut actor in players.iter_mut() {
        let state = actor.state_mut();
        state.directions = input.directions;
        if let Some(attack) = state.attack.as_mut() {
            attack.will_attack = input.attack;
        }
        if released {
            state.request_stop();
        }
    }
    input.held_last_tick = input.any_held();
}
