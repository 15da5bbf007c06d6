//! This module contains the game session: the ECS world and its per-frame schedule.

use std::str::FromStr;

use bevy_ecs::event::Events;
use bevy_ecs::query::With;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use glam::Vec3;
use tracing::{debug, error, info, trace, warn};

use crate::audio::{Audio, CueSink};
use crate::error::{GameError, InputError};
use crate::events::{GameEvent, KeyEvent, KeyState, RangedAttack};
use crate::systems::{
    self, audio_system, camera_follow_system, decal_fade_system, eating_system, hud_system, input_system,
    npc_behavior_system, player_control_system, player_movement_system, projectile_flight_system,
    projectile_launch_system, round_reset_system, round_running, time_decay_system, time_to_live_system, verdict_system,
    Arena, AudioEvent, AudioResource, AudioState, Bindings, CameraRig, DeltaTime, EatenCount, FloatingText, Hud,
    InputState, Key, Npc, NpcKind, NpcRng, PendingRestart, PlayerBundle, PlayerControlled, Position, RoundState,
    TimeBudget,
};

/// Per-frame phases, run in this order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Key edges, commands and restarts
    Input,
    /// Passive time decay and the early loss check
    Clock,
    /// Player, NPC and projectile movement
    Update,
    /// Eating, then the win/loss verdict
    Respond,
}

/// Presentation-facing work that runs even once the round is decided.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
struct PresentSet;

/// A civilian or guard as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpcView {
    pub kind: NpcKind,
    pub position: Vec3,
    pub facing: f32,
}

/// A game session.
///
/// Owns all simulation state inside a `World`; a `Schedule` defines the
/// per-frame system order. The host feeds key edges, calls [`Game::tick`]
/// once per display frame and reads the HUD, camera and cues afterwards.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Creates a session with an OS-seeded roster generator.
    ///
    /// Passing `None` as the sink (no audio device) disables audio instead of failing.
    pub fn new(sink: Option<Box<dyn CueSink>>) -> Game {
        Self::build(NpcRng::from_os(), sink)
    }

    /// Creates a session whose rosters and wandering are reproducible.
    pub fn with_seed(seed: u64, sink: Option<Box<dyn CueSink>>) -> Game {
        Self::build(NpcRng::seeded(seed), sink)
    }

    fn build(rng: NpcRng, sink: Option<Box<dyn CueSink>>) -> Game {
        info!("Starting game initialization");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        debug!("Inserting resources into ECS world");
        Self::insert_resources(&mut world, rng, Audio::new(sink));

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        debug!("Spawning player entity");
        world.spawn(PlayerBundle::default());

        info!("Game initialization completed successfully");
        Game { world, schedule }
    }

    fn insert_resources(world: &mut World, rng: NpcRng, audio: Audio) {
        world.init_resource::<Events<GameError>>();
        world.init_resource::<Events<GameEvent>>();
        world.init_resource::<Events<KeyEvent>>();
        world.init_resource::<Events<RangedAttack>>();
        world.init_resource::<Events<AudioEvent>>();

        world.insert_resource(rng);
        world.insert_resource(Arena::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(InputState::default());
        world.insert_resource(DeltaTime::default());
        world.insert_resource(RoundState::NotStarted);
        world.insert_resource(TimeBudget::default());
        world.insert_resource(EatenCount::default());
        world.insert_resource(PendingRestart::default());
        world.insert_resource(AudioState::default());
        world.insert_resource(CameraRig::default());
        world.insert_resource(Hud::default());
        world.insert_non_send_resource(AudioResource(audio));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        schedule
            .add_systems((
                (input_system, player_control_system, round_reset_system)
                    .chain()
                    .in_set(GameplaySet::Input),
                time_decay_system.in_set(GameplaySet::Clock),
                (
                    player_movement_system,
                    npc_behavior_system,
                    projectile_launch_system,
                    projectile_flight_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (eating_system, verdict_system).chain().in_set(GameplaySet::Respond),
                (
                    time_to_live_system,
                    decal_fade_system,
                    camera_follow_system.run_if(round_running),
                    hud_system,
                    audio_system,
                )
                    .chain()
                    .in_set(PresentSet),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Clock,
                    GameplaySet::Update.run_if(round_running),
                    GameplaySet::Respond.run_if(round_running),
                    PresentSet,
                )
                    .chain(),
            );
    }

    /// First entry into a round.
    pub fn start(&mut self) {
        let state = *self.world.resource::<RoundState>();
        if state != RoundState::NotStarted {
            warn!(%state, "Start ignored, game already started");
            return;
        }
        systems::reset_round(&mut self.world);
    }

    /// Throws the current round away and starts a fresh one, whatever its state.
    pub fn restart(&mut self) {
        info!(state = %self.state(), "Restarting round");
        systems::reset_round(&mut self.world);
    }

    /// Reports a key going down. Unknown identifiers are rejected.
    pub fn press(&mut self, key: &str) -> Result<(), InputError> {
        self.key_event(key, KeyState::Pressed)
    }

    /// Reports a key coming back up. Unknown identifiers are rejected.
    pub fn release(&mut self, key: &str) -> Result<(), InputError> {
        self.key_event(key, KeyState::Released)
    }

    fn key_event(&mut self, key: &str, state: KeyState) -> Result<(), InputError> {
        let key = Key::from_str(key).map_err(|_| {
            trace!(key, "Ignoring unknown key");
            InputError::UnknownKey(key.to_string())
        })?;
        self.send_key(key, state);
        Ok(())
    }

    /// Queues a key edge for the next frame.
    pub fn send_key(&mut self, key: Key, state: KeyState) {
        self.world.send_event(KeyEvent { key, state });
    }

    /// Executes one frame of game logic by running all scheduled ECS systems.
    ///
    /// # Arguments
    ///
    /// * `dt` - Frame delta time in seconds
    pub fn tick(&mut self, dt: f32) {
        self.world.insert_resource(DeltaTime::from_seconds(dt));

        self.schedule.run(&mut self.world);

        for error in self.world.resource_mut::<Events<GameError>>().drain() {
            error!("{}", error);
        }

        // Swap event buffers once per frame; every reader has run by now.
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<KeyEvent>>().update();
        self.world.resource_mut::<Events<RangedAttack>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();
    }

    pub fn state(&self) -> RoundState {
        *self.world.resource::<RoundState>()
    }

    pub fn hud(&self) -> &Hud {
        self.world.resource::<Hud>()
    }

    pub fn camera(&self) -> CameraRig {
        *self.world.resource::<CameraRig>()
    }

    pub fn time_budget(&self) -> TimeBudget {
        *self.world.resource::<TimeBudget>()
    }

    pub fn eaten(&self) -> EatenCount {
        *self.world.resource::<EatenCount>()
    }

    pub fn player_position(&mut self) -> Option<Vec3> {
        self.world
            .query_filtered::<&Position, With<PlayerControlled>>()
            .single(&self.world)
            .ok()
            .map(|p| p.0)
    }

    /// Every living NPC.
    pub fn npcs(&mut self) -> Vec<NpcView> {
        self.world
            .query::<(&Npc, &Position, &systems::Facing)>()
            .iter(&self.world)
            .filter(|(npc, _, _)| npc.alive)
            .map(|(npc, position, facing)| NpcView {
                kind: npc.kind(),
                position: position.0,
                facing: facing.0,
            })
            .collect()
    }

    /// Floating text cues currently alive, with their world positions.
    pub fn floating_texts(&mut self) -> Vec<(FloatingText, Vec3)> {
        self.world
            .query::<(&FloatingText, &Position)>()
            .iter(&self.world)
            .map(|(text, position)| (text.clone(), position.0))
            .collect()
    }
}
