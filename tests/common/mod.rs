#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, query::With, world::World};
use glam::Vec3;

use distortus::{
    audio::{Audio, CueLog, CueSink},
    error::GameError,
    events::{GameEvent, KeyEvent, RangedAttack},
    game::Game,
    systems::{
        Arena, AudioEvent, AudioResource, AudioState, Bindings, CameraRig, DeltaTime, EatenCount, Hud, InputState, Npc,
        NpcBundle, NpcId, NpcRng, PendingRestart, PlayerBundle, PlayerControlled, Position, RoundState, TimeBudget,
    },
};

pub const FRAME: f32 = 1.0 / 60.0;

/// Creates a world with every resource and event the gameplay systems expect,
/// already in a running round.
pub fn create_test_world() -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<KeyEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(Events::<AudioEvent>::default());
    world.insert_resource(Events::<RangedAttack>::default());

    world.insert_resource(Arena::default());
    world.insert_resource(Bindings::default());
    world.insert_resource(InputState::default());
    world.insert_resource(DeltaTime::from_seconds(FRAME));
    world.insert_resource(NpcRng::seeded(7));
    world.insert_resource(RoundState::Running);
    world.insert_resource(TimeBudget::default());
    world.insert_resource(EatenCount::default());
    world.insert_resource(PendingRestart::default());
    world.insert_resource(AudioState::default());
    world.insert_resource(CameraRig::default());
    world.insert_resource(Hud::default());
    world.insert_non_send_resource(AudioResource(Audio::disabled()));

    world
}

pub fn spawn_test_player(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn(PlayerBundle {
            position: Position(position),
            ..Default::default()
        })
        .id()
}

pub fn spawn_civilian(world: &mut World, id: u32, position: Vec3) -> Entity {
    world
        .spawn(NpcBundle {
            npc: Npc::civilian(NpcId(id)),
            position: Position(position),
            facing: Default::default(),
        })
        .id()
}

pub fn spawn_guard(world: &mut World, id: u32, position: Vec3) -> Entity {
    world
        .spawn(NpcBundle {
            npc: Npc::guard(NpcId(id)),
            position: Position(position),
            facing: Default::default(),
        })
        .id()
}

pub fn player_position(world: &mut World) -> Vec3 {
    world
        .query_filtered::<&Position, With<PlayerControlled>>()
        .single(world)
        .expect("exactly one player")
        .0
}

/// A started, seeded game whose audio lands in the returned log.
pub fn started_game() -> (Game, CueLog) {
    let log = CueLog::new();
    let sink: Box<dyn CueSink> = Box::new(log.clone());
    let mut game = Game::with_seed(42, Some(sink));
    game.start();
    log.take();
    (game, log)
}

/// Removes the generated roster so a test can place NPCs by hand.
pub fn clear_npcs(game: &mut Game) {
    let npcs: Vec<Entity> = game
        .world
        .query_filtered::<Entity, With<Npc>>()
        .iter(&game.world)
        .collect();
    for entity in npcs {
        game.world.despawn(entity);
    }
}

pub fn tick_frames(game: &mut Game, frames: usize) {
    for _ in 0..frames {
        game.tick(FRAME);
    }
}
