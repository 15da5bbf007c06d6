//! Round lifecycle: starting and restarting rebuild all simulation state.

use bevy_ecs::{
    entity::Entity,
    query::{Or, With},
    world::World,
};
use tracing::info;

use crate::formatter;
use crate::systems::{
    camera::CameraRig,
    effects::{BloodDecal, FloatingText},
    hud::Hud,
    npc::roster,
    player::PlayerBundle,
    projectile::Projectile,
    state::{EatenCount, PendingRestart, RoundState, TimeBudget},
    Arena, Npc, NpcRng, PlayerControlled,
};

/// Discards the roster and every transient, resets the player and the scalar
/// state, spawns a fresh roster and enters `Running`.
pub fn reset_round(world: &mut World) {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Npc>, With<Projectile>, With<FloatingText>, With<BloodDecal>)>>()
        .iter(world)
        .collect();
    for entity in doomed {
        world.despawn(entity);
    }

    let players: Vec<Entity> = world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .iter(world)
        .collect();
    match players.as_slice() {
        [] => {
            world.spawn(PlayerBundle::default());
        }
        [player, rest @ ..] => {
            world.entity_mut(*player).insert(PlayerBundle::default());
            for extra in rest {
                world.despawn(*extra);
            }
        }
    }

    let arena = *world.resource::<Arena>();
    let npcs = roster(&mut world.resource_mut::<NpcRng>().0, &arena);
    let npc_count = npcs.len();
    world.spawn_batch(npcs);

    world.resource_mut::<TimeBudget>().refill();
    world.resource_mut::<EatenCount>().reset();
    world.insert_resource(CameraRig::default());
    world.insert_resource(PendingRestart(false));
    world.insert_resource(RoundState::Running);

    let hud = Hud::capture(
        RoundState::Running,
        world.resource::<TimeBudget>(),
        world.resource::<EatenCount>(),
    );
    world.insert_resource(hud);

    formatter::begin_round();
    info!(npcs = npc_count, round = formatter::round_number(), "Round started");
}

/// Applies a restart requested through the input pipeline.
pub fn round_reset_system(world: &mut World) {
    if world.resource::<PendingRestart>().0 {
        reset_round(world);
    }
}
