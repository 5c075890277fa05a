//! Render snapshot system.
//!
//! Pulls the frame, position and facing of every live actor and effect into
//! [`RenderQueue`] once per frame, after all ticks for that frame ran.
use bevy_ecs::prelude::*;

use crate::components::actor::Actor;
use crate::components::effect::Effect;
use crate::components::health::Health;
use crate::components::markers::{PendingRemoval, Player};
use crate::resources::renderqueue::{RenderItem, RenderLayer, RenderQueue};
use crate::resources::tickclock::TickClock;

pub fn collect_render_snapshot(
    mut queue: ResMut<RenderQueue>,
    clock: Res<TickClock>,
    effects: Query<(Entity, &Effect), Without<PendingRemoval>>,
    actors: Query<(Entity, &Actor, Option<&Health>, Has<Player>), Without<PendingRemoval>>,
) {
    queue.clear();
    queue.frame += 1;
    queue.alpha = clock.alpha();

    for (entity, effect) in effects.iter() {
        queue.items.push(RenderItem {
            entity,
            layer: RenderLayer::Effect,
            frame: effect.animator.current_frame().clone(),
            frame_index: effect.animator.current_frame_index(),
            position: effect.position,
            facing: effect.facing,
            action: String::new(),
            health: None,
        });
    }

    for (entity, actor, health, is_player) in actors.iter() {
        let state = actor.state();
        queue.items.push(RenderItem {
            entity,
            layer: if is_player {
                RenderLayer::Player
            } else {
                RenderLayer::Monster
            },
            frame: state.arbiter.current_frame().clone(),
            frame_index: state.arbiter.animation().current_frame_index(),
            position: state.position,
            facing: state.facing,
            action: state.action().to_string(),
            health: health.map(Health::fraction),
        });
    }

    // stable: keeps spawn order inside a layer
    queue.items.sort_by_key(|item| item.layer);
}
