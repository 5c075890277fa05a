//! Effects queued by actors during the current tick.
//!
//! Actors cannot spawn entities while the actor query is borrowed, so attack
//! hooks push an [`EffectSpawn`] here and
//! [`spawn_effects`](crate::systems::effects::spawn_effects) drains it right
//! after the actor update.

use bevy_ecs::prelude::Resource;

use crate::components::effect::EffectSpawn;

#[derive(Resource, Debug, Default)]
pub struct PendingSpawns(pub Vec<EffectSpawn>);

impl PendingSpawns {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, EffectSpawn> {
        self.0.drain(..)
    }
}
