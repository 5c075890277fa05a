//! Bevy ECS Integration Tests
//!
//! These tests pin down the bevy_ecs behavior the actor core relies on, so
//! an upgrade that changes it fails here first instead of deep inside the
//! tick schedule.
//!
//! # Test Categories
//!
//! 1. **Resources** - resource_scope, mutation through `ResMut`
//! 2. **Query Filters** - `Has`, `Without`, optional components
//! 3. **Commands** - deferred inserts visible to the next chained system
//! 4. **Exclusive Systems** - spawning mid-schedule
//!
//! # Usage
//!
//! ```sh
//! cargo test --test bevy_ecs_integration
//! ```

use bevy_ecs::prelude::*;

// =============================================================================
// Test Components and Resources
// =============================================================================

#[derive(Component, Debug, Clone, PartialEq, Default)]
struct Health(i32);

/// Marker component used like the core's Player
#[derive(Component, Debug, Clone)]
struct Player;

/// Marker component used like the core's PendingRemoval
#[derive(Component, Debug, Clone)]
struct Doomed;

#[derive(Resource, Debug, Default)]
struct Counter(i32);

#[derive(Resource, Debug, Default)]
struct Queue(Vec<i32>);

// =============================================================================
// CATEGORY 1: Resources
// =============================================================================

#[test]
fn resource_scope_lends_world_and_resource() {
    let mut world = World::new();
    world.insert_resource(Counter(0));
    world.spawn(Health(3));
    world.spawn(Health(4));

    world.resource_scope(|world, mut counter: Mut<Counter>| {
        let mut query = world.query::<&Health>();
        for health in query.iter(world) {
            counter.0 += health.0;
        }
    });

    assert_eq!(world.resource::<Counter>().0, 7);
}

#[test]
fn resmut_changes_persist_between_runs() {
    let mut world = World::new();
    world.insert_resource(Counter(0));

    let mut schedule = Schedule::default();
    schedule.add_systems(|mut counter: ResMut<Counter>| counter.0 += 1);
    schedule.run(&mut world);
    schedule.run(&mut world);

    assert_eq!(world.resource::<Counter>().0, 2);
}

// =============================================================================
// CATEGORY 2: Query Filters
// =============================================================================

#[test]
fn has_filter_reports_marker_presence() {
    let mut world = World::new();
    world.insert_resource(Counter(0));
    world.spawn((Health(1), Player));
    world.spawn(Health(1));
    world.spawn(Health(1));

    let mut schedule = Schedule::default();
    schedule.add_systems(
        |query: Query<(&Health, Has<Player>)>, mut counter: ResMut<Counter>| {
            for (_, is_player) in query.iter() {
                counter.0 += if is_player { 100 } else { 1 };
            }
        },
    );
    schedule.run(&mut world);

    assert_eq!(world.resource::<Counter>().0, 102);
}

#[test]
fn without_filter_skips_marked_entities() {
    let mut world = World::new();
    world.spawn(Health(1));
    world.spawn((Health(2), Doomed));

    let mut query = world.query_filtered::<&Health, Without<Doomed>>();
    let live: Vec<i32> = query.iter(&world).map(|h| h.0).collect();
    assert_eq!(live, vec![1]);
}

#[test]
fn optional_component_mutation() {
    let mut world = World::new();
    let with = world.spawn((Health(5), Player)).id();
    let without = world.spawn(Player).id();

    let mut query = world.query::<(Entity, Option<&mut Health>)>();
    for (_, health) in query.iter_mut(&mut world) {
        if let Some(mut health) = health {
            health.0 -= 2;
        }
    }

    assert_eq!(world.get::<Health>(with), Some(&Health(3)));
    assert!(world.get::<Health>(without).is_none());
}

// =============================================================================
// CATEGORY 3: Commands
// =============================================================================

#[test]
fn chained_systems_see_deferred_inserts() {
    let mut world = World::new();
    world.insert_resource(Counter(0));
    world.spawn(Health(0));
    world.spawn(Health(1));

    let mark = |mut commands: Commands, query: Query<(Entity, &Health)>| {
        for (entity, health) in query.iter() {
            if health.0 <= 0 {
                commands.entity(entity).insert(Doomed);
            }
        }
    };
    let count = |query: Query<&Doomed>, mut counter: ResMut<Counter>| {
        counter.0 = query.iter().count() as i32;
    };

    let mut schedule = Schedule::default();
    schedule.add_systems((mark, count).chain());
    schedule.run(&mut world);

    assert_eq!(world.resource::<Counter>().0, 1);
}

#[test]
fn try_despawn_tolerates_missing_entities() {
    let mut world = World::new();
    let entity = world.spawn((Health(0), Doomed)).id();

    let sweep = |mut commands: Commands, query: Query<Entity, With<Doomed>>| {
        for entity in query.iter() {
            commands.entity(entity).try_despawn();
            commands.entity(entity).try_despawn();
        }
    };

    let mut schedule = Schedule::default();
    schedule.add_systems(sweep);
    schedule.run(&mut world);

    assert!(world.get_entity(entity).is_err());
}

// =============================================================================
// CATEGORY 4: Exclusive Systems
// =============================================================================

fn drain_queue(world: &mut World) {
    let values: Vec<i32> = world.resource_mut::<Queue>().0.drain(..).collect();
    world.spawn_batch(values.into_iter().map(Health));
}

#[test]
fn exclusive_system_spawns_between_chained_systems() {
    let mut world = World::new();
    world.insert_resource(Counter(0));
    world.init_resource::<Queue>();

    let produce = |mut queue: ResMut<Queue>| queue.0.extend([1, 2, 3]);
    let count = |query: Query<&Health>, mut counter: ResMut<Counter>| {
        counter.0 = query.iter().map(|h| h.0).sum();
    };

    let mut schedule = Schedule::default();
    schedule.add_systems((produce, drain_queue, count).chain());
    schedule.run(&mut world);

    assert_eq!(world.resource::<Counter>().0, 6);
    assert!(world.resource::<Queue>().0.is_empty());
}
