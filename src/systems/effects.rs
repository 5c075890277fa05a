//! Effect lifecycle systems.
//!
//! - [`update_effects`] – expire, animate and move live effects
//! - [`spawn_effects`] – turn queued [`EffectSpawn`](crate::components::effect::EffectSpawn)s
//!   into entities
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::effect::Effect;
use crate::components::markers::PendingRemoval;
use crate::resources::arena::Arena;
use crate::resources::scheduler::TaskScheduler;
use crate::resources::spawnqueue::PendingSpawns;

/// Step each effect; finished ones are marked for removal.
pub fn update_effects(
    mut commands: Commands,
    scheduler: Res<TaskScheduler>,
    arena: Res<Arena>,
    mut effects: Query<(Entity, &mut Effect), Without<PendingRemoval>>,
) {
    for (entity, mut effect) in effects.iter_mut() {
        if !effect.update(&scheduler, &*arena) {
            commands.entity(entity).insert(PendingRemoval);
        }
    }
}

/// Spawn every effect queued during the actor update.
///
/// Exclusive so the expiry tasks and the entities appear in the same tick as
/// the attack that produced them.
pub fn spawn_effects(world: &mut World) {
    let spawns: Vec<_> = world.resource_mut::<PendingSpawns>().drain().collect();
    if spawns.is_empty() {
        return;
    }

    let effects: Vec<Effect> = {
        let mut scheduler = world.resource_mut::<TaskScheduler>();
        spawns
            .into_iter()
            .map(|spawn| Effect::from_spawn(spawn, &mut scheduler))
            .collect()
    };
    debug!("spawning {} effect(s)", effects.len());
    world.spawn_batch(effects);
}
