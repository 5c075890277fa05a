//! End-of-tick sweep.
//!
//! Everything marked [`PendingRemoval`] during the tick is destroyed here,
//! at one fixed point, after all other systems are done iterating. Destroying
//! releases the scheduler tasks the entity still owns.
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::actor::Actor;
use crate::components::effect::Effect;
use crate::components::markers::PendingRemoval;
use crate::resources::scheduler::TaskScheduler;

pub fn sweep_pending_removal(
    mut commands: Commands,
    mut scheduler: ResMut<TaskScheduler>,
    mut doomed: Query<(Entity, Option<&mut Actor>, Option<&mut Effect>), With<PendingRemoval>>,
) {
    for (entity, actor, effect) in doomed.iter_mut() {
        if let Some(mut actor) = actor {
            actor.destroy(&mut scheduler);
        }
        if let Some(mut effect) = effect {
            effect.destroy(&mut scheduler);
        }
        trace!("despawning {:?}", entity);
        commands.entity(entity).try_despawn();
    }
}
