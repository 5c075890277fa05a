//! Engine tick integration tests: attacks, effects, contact damage, removal
//! and teardown, run through the full tick schedule.

use bevy_ecs::prelude::*;
use glam::Vec2;

use actorcore::components::actor::Actor;
use actorcore::components::arbiter::{ATTACK, IDLE, MOVE};
use actorcore::components::effect::Effect;
use actorcore::components::health::Health;
use actorcore::components::markers::{Monster, Player};
use actorcore::game::{
    Outcome, build_render_schedule, build_tick_schedule, monsters_left, player_alive, run_frame,
    setup_world, spawn_monsters, spawn_player, summarize, teardown_scene,
};
use actorcore::resources::animationstore::AnimationStore;
use actorcore::resources::input::InputState;
use actorcore::resources::renderqueue::{RenderLayer, RenderQueue};
use actorcore::resources::scheduler::TaskScheduler;
use actorcore::resources::simconfig::SimConfig;
use actorcore::resources::spawnqueue::PendingSpawns;

const EPSILON: f32 = 1e-6;

const PLAYER_AT: Vec2 = Vec2::new(300.0, 300.0);

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    let store = AnimationStore::builtin().expect("builtin animations");
    setup_world(&mut world, SimConfig::new(), store);
    world
}

/// The knight, moved to a fixed spot.
fn place_player(world: &mut World, at: Vec2) -> Entity {
    let player = spawn_player(world).expect("player spawns");
    world
        .get_mut::<Actor>(player)
        .expect("player actor")
        .state_mut()
        .position = at;
    player
}

/// A goblin without chase, so it stays where it is put.
fn place_dummy(world: &mut World, at: Vec2, contact_damage: f32) -> Entity {
    let arbiter = world
        .resource::<AnimationStore>()
        .arbiter("goblin", MOVE)
        .expect("goblin arbiter");
    let actor = Actor::mover(arbiter, at, 1.0).expect("goblin actor");
    world
        .spawn((actor, Health::new(5.0), Monster { contact_damage }))
        .id()
}

fn run_ticks(world: &mut World, schedule: &mut Schedule, n: usize) {
    for _ in 0..n {
        schedule.run(world);
    }
}

fn health_of(world: &World, entity: Entity) -> f32 {
    world.get::<Health>(entity).expect("health").current
}

fn effect_count(world: &mut World) -> usize {
    world.query::<&Effect>().iter(world).count()
}

#[test]
fn sword_swing_hits_the_monster_in_front() {
    let mut world = make_world();
    let mut tick = build_tick_schedule();
    let player = place_player(&mut world, PLAYER_AT);
    let monster = place_dummy(&mut world, PLAYER_AT + Vec2::new(120.0, 20.0), 0.0);

    world.resource_mut::<InputState>().set_attack(true);
    run_ticks(&mut world, &mut tick, 1);

    let actor = world.get::<Actor>(player).expect("player");
    assert_eq!(actor.state().action(), ATTACK);
    assert!(actor.state().has_attacked());
    assert!(approx_eq(health_of(&world, monster), 3.0));
    assert_eq!(effect_count(&mut world), 1);

    // the swing lasts a single tick and is swept at the end of the next one
    run_ticks(&mut world, &mut tick, 1);
    assert_eq!(effect_count(&mut world), 0);
    assert!(approx_eq(health_of(&world, monster), 3.0));
}

#[test]
fn held_attack_repeats_on_cooldown_until_the_monster_falls() {
    let mut world = make_world();
    let mut tick = build_tick_schedule();
    place_player(&mut world, PLAYER_AT);
    let monster = place_dummy(&mut world, PLAYER_AT + Vec2::new(120.0, 20.0), 0.0);

    world.resource_mut::<InputState>().set_attack(true);

    // default attack interval is 45: second swing on tick 46
    run_ticks(&mut world, &mut tick, 45);
    assert!(approx_eq(health_of(&world, monster), 3.0));
    run_ticks(&mut world, &mut tick, 1);
    assert!(approx_eq(health_of(&world, monster), 1.0));

    run_ticks(&mut world, &mut tick, 45);
    assert!(world.get_entity(monster).is_err(), "monster was despawned");
    assert_eq!(monsters_left(&mut world), 0);

    let summary = summarize(&mut world);
    assert_eq!(summary.outcome, Outcome::Cleared);
    assert_eq!(summary.player_health, Some(5.0));
}

#[test]
fn monster_contact_damages_and_knocks_back_the_player() {
    let mut world = make_world();
    let mut tick = build_tick_schedule();
    let player = place_player(&mut world, PLAYER_AT);
    // facing right, overlapping the player's left half
    place_dummy(&mut world, PLAYER_AT + Vec2::new(-20.0, 30.0), 0.5);

    run_ticks(&mut world, &mut tick, 1);

    assert!(approx_eq(health_of(&world, player), 4.5));
    let state = world.get::<Actor>(player).expect("player").state().clone();
    let width = state.bounding_box().width();
    assert!(approx_eq(state.position.x, PLAYER_AT.x + width));

    // pushed clear, no more contact
    run_ticks(&mut world, &mut tick, 3);
    assert!(approx_eq(health_of(&world, player), 4.5));
    assert_eq!(world.get::<Actor>(player).expect("player").state().action(), IDLE);
}

#[test]
fn fallen_player_ends_the_round() {
    let mut world = make_world();
    let mut tick = build_tick_schedule();
    let player = place_player(&mut world, PLAYER_AT);
    world.get_mut::<Health>(player).expect("health").current = 0.5;
    place_dummy(&mut world, PLAYER_AT + Vec2::new(-20.0, 30.0), 0.5);

    run_ticks(&mut world, &mut tick, 1);

    assert!(!player_alive(&mut world));
    assert!(world.get_entity(player).is_err());
    let summary = summarize(&mut world);
    assert_eq!(summary.outcome, Outcome::Fallen);
    assert_eq!(summary.player_health, None);
}

#[test]
fn chasing_monsters_leave_their_spawn_points() {
    let mut world = make_world();
    let mut tick = build_tick_schedule();
    place_player(&mut world, PLAYER_AT);
    let monsters = spawn_monsters(&mut world, 4).expect("monsters spawn");

    let start: Vec<Vec2> = monsters
        .iter()
        .map(|&m| world.get::<Actor>(m).expect("monster").state().position)
        .collect();

    run_ticks(&mut world, &mut tick, 30);

    let moved = monsters
        .iter()
        .zip(&start)
        .filter(|(m, from)| {
            world
                .get::<Actor>(**m)
                .is_some_and(|actor| actor.state().position != **from)
        })
        .count();
    assert!(moved > 0);
}

#[test]
fn frames_run_due_ticks_and_snapshot_layers() {
    let mut world = make_world();
    let mut tick = build_tick_schedule();
    let mut render = build_render_schedule();
    place_player(&mut world, PLAYER_AT);
    spawn_monsters(&mut world, 3).expect("monsters spawn");

    let frame = std::time::Duration::from_millis(16);
    // 10ms ticks: 16ms gives one tick, the carried 6ms makes the next frame two
    assert_eq!(run_frame(&mut world, &mut tick, &mut render, frame), 1);
    assert_eq!(run_frame(&mut world, &mut tick, &mut render, frame), 2);
    assert_eq!(world.resource::<TaskScheduler>().ticks(), 3);

    let queue = world.resource::<RenderQueue>();
    assert_eq!(queue.frame, 2);
    // 32ms in, 30ms ticked
    assert!((queue.alpha - 0.2).abs() < 1e-4);
    assert_eq!(queue.layer(RenderLayer::Player).count(), 1);
    assert_eq!(queue.layer(RenderLayer::Monster).count(), 3);
    assert_eq!(
        queue.items.last().map(|item| item.layer),
        Some(RenderLayer::Player)
    );
    assert!(queue.items.windows(2).all(|w| w[0].layer <= w[1].layer));
}

#[test]
fn teardown_releases_every_task() {
    let mut world = make_world();
    let mut tick = build_tick_schedule();
    place_player(&mut world, PLAYER_AT);
    spawn_monsters(&mut world, 5).expect("monsters spawn");

    world.resource_mut::<InputState>().set_attack(true);
    run_ticks(&mut world, &mut tick, 1);
    assert!(!world.resource::<TaskScheduler>().is_empty());

    teardown_scene(&mut world);

    assert!(world.resource::<TaskScheduler>().is_empty());
    assert!(world.resource::<PendingSpawns>().is_empty());
    assert_eq!(world.query::<&Actor>().iter(&world).count(), 0);
    assert_eq!(world.query::<&Player>().iter(&world).count(), 0);
    assert_eq!(effect_count(&mut world), 0);
}
