//! Actor update system.
//!
//! Builds a [`TickContext`] per actor and calls
//! [`Actor::update`](crate::components::actor::Actor::update). Monsters
//! chase the player's hitbox as it was at the start of the tick.
use bevy_ecs::prelude::*;

use crate::behaviors::TickContext;
use crate::components::actor::Actor;
use crate::components::markers::{PendingRemoval, Player};
use crate::resources::arena::Arena;
use crate::resources::scheduler::TaskScheduler;
use crate::resources::simrng::SimRng;
use crate::resources::spawnqueue::PendingSpawns;

pub fn update_actors(
    mut scheduler: ResMut<TaskScheduler>,
    arena: Res<Arena>,
    mut rng: ResMut<SimRng>,
    mut spawns: ResMut<PendingSpawns>,
    mut actors: Query<(Entity, &mut Actor, Has<Player>), Without<PendingRemoval>>,
) {
    let target = actors
        .iter()
        .find(|(_, _, is_player)| *is_player)
        .map(|(_, actor, _)| actor.state().bounding_box());

    for (entity, mut actor, is_player) in actors.iter_mut() {
        let mut ctx = TickContext::new(&mut *scheduler, &*arena, &mut rng.0, &mut spawns.0)
            .with_entity(entity)
            .with_target(if is_player { None } else { target });
        actor.update(&mut ctx);
    }
}
