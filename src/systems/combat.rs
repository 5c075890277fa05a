//! Hit resolution.
//!
//! Runs after effects were spawned for the tick:
//!
//! 1. each live effect damages overlapping actors of the other faction
//!    (`once` effects stop at their first victim and are removed)
//! 2. each monster touching the player deals its contact damage
//!
//! Taking damage latches a stop (hit stagger). The player is also knocked
//! back by its hitbox width, away from the source, unless that would put it
//! in a wall. Actors reaching zero health are marked [`PendingRemoval`].
use bevy_ecs::prelude::*;
use log::{debug, info};
use smallvec::SmallVec;

use crate::components::actor::{Actor, Facing};
use crate::components::boundingbox::BoundingBox;
use crate::components::effect::{Effect, Faction};
use crate::components::health::Health;
use crate::components::markers::{Monster, PendingRemoval, Player};
use crate::resources::arena::{Arena, CollisionQuery};
use crate::resources::scheduler::TaskScheduler;

/// Apply `damage` to one actor. `source_side` is where the hit came from,
/// used for knockback. Returns true when the hit was fatal.
pub fn apply_damage(
    actor: &mut Actor,
    health: &mut Health,
    damage: f32,
    source_side: Option<Facing>,
    boundary: &dyn CollisionQuery,
) -> bool {
    let state = actor.state_mut();
    if let Some(side) = source_side {
        let width = state.bounding_box().width();
        // pushed away from the side the hit came from
        let distance = match side {
            Facing::Left => width,
            Facing::Right => -width,
        };
        state.knock_back(distance, boundary);
    }
    state.request_stop();
    health.take_damage(damage)
}

pub fn resolve_hits(
    mut commands: Commands,
    mut scheduler: ResMut<TaskScheduler>,
    arena: Res<Arena>,
    mut effects: Query<(Entity, &mut Effect), Without<PendingRemoval>>,
    mut actors: Query<
        (Entity, &mut Actor, &mut Health, Has<Player>, Option<&Monster>),
        Without<PendingRemoval>,
    >,
) {
    let mut fallen: SmallVec<[Entity; 8]> = SmallVec::new();

    for (effect_entity, mut effect) in effects.iter_mut() {
        if effect.is_expired() {
            continue;
        }
        let hurt_box = effect.bounding_box();

        for (entity, mut actor, mut health, is_player, _) in actors.iter_mut() {
            if fallen.contains(&entity) {
                continue;
            }
            let victim = if is_player {
                Faction::Player
            } else {
                Faction::Monster
            };
            if victim == effect.faction {
                continue;
            }

            let hitbox = actor.state().bounding_box();
            if !hitbox.overlaps(&hurt_box) {
                continue;
            }

            let source_side = is_player.then(|| {
                if hitbox.min().x < hurt_box.min().x {
                    Facing::Right
                } else {
                    Facing::Left
                }
            });
            if effect.damage > 0.0
                && apply_damage(&mut actor, &mut health, effect.damage, source_side, &*arena)
            {
                fallen.push(entity);
            }
            debug!(
                "effect {:?} hit {:?} for {}, health {}",
                effect_entity, entity, effect.damage, health.current
            );

            if effect.once {
                effect.destroy(&mut scheduler);
                commands.entity(effect_entity).insert(PendingRemoval);
                break;
            }
        }
    }

    // Monster contact damage against the player.
    let contacts: SmallVec<[(f32, Facing, BoundingBox); 8]> = actors
        .iter()
        .filter(|(entity, ..)| !fallen.contains(entity))
        .filter_map(|(_, actor, _, _, monster)| {
            monster.map(|m| {
                let state = actor.state();
                (m.contact_damage, state.facing.opposite(), state.bounding_box())
            })
        })
        .collect();

    for (entity, mut actor, mut health, is_player, _) in actors.iter_mut() {
        if !is_player || fallen.contains(&entity) {
            continue;
        }
        for &(damage, side, monster_box) in &contacts {
            if fallen.contains(&entity) {
                break;
            }
            if actor.state().bounding_box().overlaps(&monster_box)
                && apply_damage(&mut actor, &mut health, damage, Some(side), &*arena)
            {
                fallen.push(entity);
            }
        }
    }

    for (entity, _, _, is_player, _) in actors.iter() {
        if fallen.contains(&entity) {
            if is_player {
                info!("player {:?} has fallen", entity);
            } else {
                debug!("monster {:?} defeated", entity);
            }
            commands.entity(entity).insert(PendingRemoval);
        }
    }
}
