//! Scene setup and the per-frame driver.
//!
//! - [`setup_world`] inserts every resource the simulation reads
//! - [`spawn_player`] / [`spawn_monsters`] populate the arena
//! - [`build_tick_schedule`] / [`build_render_schedule`] wire the systems
//! - [`run_frame`] runs the ticks due for one frame, then the render pass
//! - [`teardown_scene`] releases every task and despawns every actor

use std::time::Duration;

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;
use serde::Serialize;

use crate::behaviors::attack::AttackHook;
use crate::behaviors::chase::ChaseBehavior;
use crate::components::actor::Actor;
use crate::components::animation::{Frame, FrameAnimator};
use crate::components::arbiter::{IDLE, MOVE};
use crate::components::effect::{Effect, EffectTemplate, Faction};
use crate::components::health::Health;
use crate::components::markers::{Monster, PendingRemoval, Player};
use crate::error::ActorError;
use crate::resources::animationstore::AnimationStore;
use crate::resources::arena::Arena;
use crate::resources::input::InputState;
use crate::resources::renderqueue::RenderQueue;
use crate::resources::scheduler::TaskScheduler;
use crate::resources::simconfig::SimConfig;
use crate::resources::simrng::SimRng;
use crate::resources::spawnqueue::PendingSpawns;
use crate::resources::tickclock::TickClock;
use crate::systems::actors::update_actors;
use crate::systems::combat::resolve_hits;
use crate::systems::effects::{spawn_effects, update_effects};
use crate::systems::input::apply_player_input;
use crate::systems::removal::sweep_pending_removal;
use crate::systems::render::collect_render_snapshot;
use crate::systems::scheduler::tick_scheduler;
use crate::systems::time::advance_clock;

pub const PLAYER_SET: &str = "knight";
pub const MONSTER_SETS: [&str; 3] = ["tiny_zombie", "goblin", "imp"];

/// Knight sword swing: an invisible box in front of the knight for one tick.
const SWING_SIZE: Vec2 = Vec2::new(132.0, 112.0);
const SWING_REACH: f32 = 60.0;
const SWING_DAMAGE: f32 = 2.0;

/// Insert all simulation resources.
pub fn setup_world(world: &mut World, config: SimConfig, store: AnimationStore) {
    world.insert_resource(TaskScheduler::new());
    world.insert_resource(Arena::from_config(&config));
    world.insert_resource(SimRng::with_seed(config.seed));
    world.insert_resource(PendingSpawns::default());
    world.insert_resource(InputState::default());
    world.insert_resource(RenderQueue::default());
    world.insert_resource(TickClock::new(config.tick_duration()));
    world.insert_resource(store.with_timing(config.frame_timing));
    world.insert_resource(config);
}

fn sword_swing() -> Result<EffectTemplate, ActorError> {
    let animator = FrameAnimator::new(vec![Frame::blank(SWING_SIZE.x, SWING_SIZE.y)])
        .ok_or_else(|| ActorError::EmptyAnimation("sword_swing".to_string()))?;
    Ok(EffectTemplate::new(animator, Faction::Player, 1)
        .with_offsets(Vec2::new(SWING_REACH, 0.0), Vec2::ZERO)
        .with_damage(SWING_DAMAGE)
        .with_once(false))
}

/// Spawn the knight at a random spot away from the walls.
pub fn spawn_player(world: &mut World) -> Result<Entity, ActorError> {
    let config = world.resource::<SimConfig>().clone();
    let arena = *world.resource::<Arena>();
    let position = {
        let mut rng = world.resource_mut::<SimRng>();
        arena.random_position(&mut rng.0, 192.0, 112.0)
    };

    let arbiter = world.resource::<AnimationStore>().arbiter(PLAYER_SET, IDLE)?;
    let actor = Actor::mover(arbiter, position, config.player_speed)?
        .with_attack(config.attack_interval, AttackHook::SpawnEffect(sword_swing()?))?;

    let entity = world
        .spawn((actor, Health::new(config.player_health), Player))
        .id();
    info!("spawned player {:?} at {}", entity, position);
    Ok(entity)
}

/// Spawn `count` random minions that chase the player.
pub fn spawn_monsters(world: &mut World, count: u32) -> Result<Vec<Entity>, ActorError> {
    let config = world.resource::<SimConfig>().clone();
    let arena = *world.resource::<Arena>();
    let picks: Vec<(&str, Vec2)> = {
        let mut rng = world.resource_mut::<SimRng>();
        (0..count)
            .map(|_| {
                let set = MONSTER_SETS[rng.0.usize(..MONSTER_SETS.len())];
                (set, arena.random_position(&mut rng.0, 128.0, 128.0))
            })
            .collect()
    };

    let store = world.resource::<AnimationStore>();
    let bundles = picks
        .into_iter()
        .map(|(set, position)| {
            let mut arbiter = store.arbiter(set, MOVE)?;
            // a hit interrupts whatever the monster is doing
            arbiter.prioritize(IDLE)?;
            let actor = Actor::mover(arbiter, position, config.monster_speed)?.with_behavior(
                ChaseBehavior::new(config.decision_max, arena.tile_size),
            )?;
            Ok((
                actor,
                Health::new(config.monster_health),
                Monster {
                    contact_damage: config.contact_damage,
                },
            ))
        })
        .collect::<Result<Vec<_>, ActorError>>()?;

    let entities: Vec<Entity> = world.spawn_batch(bundles).collect();
    info!("spawned {} monsters", entities.len());
    Ok(entities)
}

/// Systems of one simulation tick, in order.
pub fn build_tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            apply_player_input,
            tick_scheduler,
            update_effects,
            update_actors,
            spawn_effects,
            resolve_hits,
            sweep_pending_removal,
        )
            .chain(),
    );
    schedule
}

pub fn build_render_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(collect_render_snapshot);
    schedule
}

/// Run every tick due after `elapsed`, then one render pass. Returns the
/// number of ticks run.
pub fn run_frame(
    world: &mut World,
    tick: &mut Schedule,
    render: &mut Schedule,
    elapsed: Duration,
) -> u32 {
    let due = advance_clock(world, elapsed);
    for _ in 0..due {
        tick.run(world);
    }
    render.run(world);
    due
}

/// Is there a player still standing?
pub fn player_alive(world: &mut World) -> bool {
    let mut players = world.query_filtered::<&Health, (With<Player>, Without<PendingRemoval>)>();
    players.iter(world).any(|health| !health.is_dead())
}

pub fn monsters_left(world: &mut World) -> usize {
    let mut monsters = world.query_filtered::<Entity, (With<Monster>, Without<PendingRemoval>)>();
    monsters.iter(world).count()
}

/// Release every scheduled task and despawn all actors and effects.
pub fn teardown_scene(world: &mut World) {
    world.resource_scope(|world, mut scheduler: Mut<TaskScheduler>| {
        let mut actors = world.query::<&mut Actor>();
        for mut actor in actors.iter_mut(world) {
            actor.destroy(&mut scheduler);
        }
        let mut effects = world.query::<&mut Effect>();
        for mut effect in effects.iter_mut(world) {
            effect.destroy(&mut scheduler);
        }
        scheduler.clear_all();
    });

    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Actor>, With<Effect>)>>()
        .iter(world)
        .collect();
    for entity in &doomed {
        world.despawn(*entity);
    }
    world.resource_mut::<PendingSpawns>().0.clear();
    info!("scene torn down, {} entities removed", doomed.len());
}

/// End-of-run report, printed as JSON by the binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: u64,
    pub player_health: Option<f32>,
    pub monsters_left: usize,
    pub live_tasks: usize,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Cleared,
    Fallen,
    TimeUp,
}

pub fn summarize(world: &mut World) -> RunSummary {
    let clock = *world.resource::<TickClock>();
    let player_health = world
        .query_filtered::<&Health, With<Player>>()
        .iter(world)
        .next()
        .map(|health| health.current.max(0.0));
    let monsters_left = monsters_left(world);
    let outcome = if !player_alive(world) {
        Outcome::Fallen
    } else if monsters_left == 0 {
        Outcome::Cleared
    } else {
        Outcome::TimeUp
    };
    RunSummary {
        ticks: clock.ticks,
        frames: clock.frames,
        player_health,
        monsters_left,
        live_tasks: world.resource::<TaskScheduler>().len(),
        outcome,
    }
}
