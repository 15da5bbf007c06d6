use bevy_ecs::{event::Events, system::RunSystemOnce, world::World};
use glam::Vec3;
use rand::{rngs::SmallRng, SeedableRng};
use speculoos::prelude::*;

use distortus::{
    constants::npc,
    events::RangedAttack,
    systems::{npc_behavior_system, roster, Arena, Behavior, Npc, NpcId, NpcKind, Position},
};

mod common;

use common::{create_test_world, spawn_civilian, spawn_guard, spawn_test_player, FRAME};

fn position_of(world: &mut World, entity: bevy_ecs::entity::Entity) -> Vec3 {
    world.get::<Position>(entity).expect("entity has a position").0
}

#[test]
fn test_civilian_within_flee_distance_runs_away() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    let civilian = spawn_civilian(&mut world, 0, Vec3::new(9.0, 0.0, 0.0));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    let position = position_of(&mut world, civilian);
    assert_that(&position.x).is_close_to(9.0 + npc::CIVILIAN_SPEED * FRAME, 1e-5);
    assert_that(&position.z).is_close_to(0.0, 1e-6);
}

#[test]
fn test_distant_civilian_wanders_slowly() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    let start = Vec3::new(15.0, 0.0, 15.0);
    let civilian = spawn_civilian(&mut world, 0, start);

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    let moved = position_of(&mut world, civilian).distance(start);
    assert_that(&moved).is_close_to(npc::CIVILIAN_SPEED * npc::WANDER_SPEED_FACTOR * FRAME, 1e-4);

    let wander = match world.get::<Npc>(civilian).expect("npc").behavior {
        Behavior::Civilian { wander, .. } => wander,
        Behavior::Guard { .. } => panic!("expected a civilian"),
    };
    assert_that(&wander.timer).is_greater_than_or_equal_to(npc::WANDER_MIN_SECONDS - FRAME);
    assert_that(&wander.timer).is_less_than(npc::WANDER_MAX_SECONDS);
}

#[test]
fn test_guard_in_range_fires_and_waits_for_interval() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    spawn_guard(&mut world, 15, Vec3::new(0.0, 0.0, 15.0));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");
    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    let attacks = world.resource::<Events<RangedAttack>>();
    let fired: Vec<RangedAttack> = attacks.iter_current_update_events().copied().collect();
    assert_that(&fired.len()).is_equal_to(1);
    assert_that(&fired[0].guard).is_equal_to(NpcId(15));
    assert_that(&fired[0].target).is_equal_to(Vec3::ZERO);
}

#[test]
fn test_guard_approaches_from_afar_at_half_speed() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    let guard = spawn_guard(&mut world, 15, Vec3::new(0.0, 0.0, 15.0));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    let expected = 15.0 - npc::GUARD_SPEED * npc::APPROACH_SPEED_FACTOR * FRAME;
    assert_that(&position_of(&mut world, guard).z).is_close_to(expected, 1e-5);
}

#[test]
fn test_guard_holds_position_when_close() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    let guard = spawn_guard(&mut world, 15, Vec3::new(0.0, 0.0, 8.0));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    assert_that(&position_of(&mut world, guard)).is_equal_to(Vec3::new(0.0, 0.0, 8.0));
}

#[test]
fn test_guard_out_of_range_does_not_fire() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    spawn_guard(&mut world, 15, Vec3::new(20.0, 0.0, 5.0));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<Events<RangedAttack>>().is_empty()).is_true();
}

#[test]
fn test_dead_npcs_are_frozen() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    let civilian = spawn_civilian(&mut world, 0, Vec3::new(3.0, 0.0, 0.0));
    world.get_mut::<Npc>(civilian).expect("npc").alive = false;

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    assert_that(&position_of(&mut world, civilian)).is_equal_to(Vec3::new(3.0, 0.0, 0.0));
}

#[test]
fn test_npc_pressed_against_fence_stays_inside() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::new(20.0, 0.0, 0.0));
    let civilian = spawn_civilian(&mut world, 0, Vec3::new(23.0, 0.0, 0.0));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    assert_that(&position_of(&mut world, civilian).x).is_equal_to(Arena::default().boundary());
}

#[test]
fn test_roster_spawns_civilians_then_guards_inside_spawn_square() {
    let arena = Arena::default();
    let mut rng = SmallRng::seed_from_u64(3);
    let bundles = roster(&mut rng, &arena);

    assert_that(&bundles.len()).is_equal_to(npc::CIVILIAN_COUNT + npc::GUARD_COUNT);
    for (index, bundle) in bundles.iter().enumerate() {
        let expected = if index < npc::CIVILIAN_COUNT {
            NpcKind::Civilian
        } else {
            NpcKind::Guard
        };
        assert_that(&bundle.npc.kind()).is_equal_to(expected);
        assert_that(&bundle.npc.id).is_equal_to(NpcId(index as u32));
        assert_that(&bundle.position.0.x.abs()).is_less_than_or_equal_to(arena.spawn_extent());
        assert_that(&bundle.position.0.z.abs()).is_less_than_or_equal_to(arena.spawn_extent());
        assert_that(&bundle.position.0.y).is_equal_to(0.0);
    }
}

#[test]
fn test_civilian_exactly_at_flee_distance_wanders() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    let start = Vec3::new(npc::FLEE_DISTANCE, 0.0, 0.0);
    let civilian = spawn_civilian(&mut world, 0, start);

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    let moved = position_of(&mut world, civilian).distance(start);
    assert_that(&moved).is_close_to(npc::CIVILIAN_SPEED * npc::WANDER_SPEED_FACTOR * FRAME, 1e-4);
}

#[test]
fn test_guard_exactly_at_shoot_range_does_not_fire() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    spawn_guard(&mut world, 15, Vec3::new(0.0, 0.0, npc::SHOOT_RANGE));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<Events<RangedAttack>>().is_empty()).is_true();
}

#[test]
fn test_guard_exactly_at_hold_distance_stays_put() {
    let mut world = create_test_world();
    spawn_test_player(&mut world, Vec3::ZERO);
    let start = Vec3::new(0.0, 0.0, npc::HOLD_DISTANCE);
    let guard = spawn_guard(&mut world, 15, start);

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    assert_that(&position_of(&mut world, guard)).is_equal_to(start);
}
