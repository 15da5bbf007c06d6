use bevy_ecs::{
    bundle::Bundle,
    component::Component,
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res, ResMut},
};
use glam::Vec3;
use tracing::{debug, info, trace};

use crate::{
    audio::SoundCue,
    constants::player,
    error::GameError,
    events::{GameCommand, GameEvent},
    systems::{
        input::{Bindings, InputState, MoveFlags},
        state::{PendingRestart, RoundState},
        Arena, AudioEvent, AudioState, DeltaTime, Facing, PlayerControlled, Position,
    },
};

/// Current velocity in world units per second.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec3);

/// Dash state for the player.
///
/// `is_dashing` holds exactly while `timer > 0`; the timer only runs down
/// while a direction is held, so a dash can be "parked" by standing still.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Dash {
    pub is_dashing: bool,
    /// Seconds left in the current dash.
    pub timer: f32,
    /// Seconds until the next dash may be triggered.
    pub cooldown: f32,
}

impl Dash {
    /// Starts a dash unless one is running or the cooldown has not elapsed.
    /// Returns whether the dash fired.
    pub fn try_trigger(&mut self) -> bool {
        if self.is_dashing || self.cooldown > 0.0 {
            return false;
        }
        self.is_dashing = true;
        self.timer = player::DASH_DURATION;
        self.cooldown = player::DASH_COOLDOWN;
        true
    }

    /// Counts down an active dash by `seconds` of movement.
    fn spend(&mut self, seconds: f32) {
        self.timer -= seconds;
        if self.timer <= 0.0 {
            self.timer = 0.0;
            self.is_dashing = false;
        }
    }

    fn cool(&mut self, seconds: f32) {
        self.cooldown = (self.cooldown - seconds).max(0.0);
    }
}

/// Everything the player entity carries, in its start-of-round state.
#[derive(Bundle, Default)]
pub struct PlayerBundle {
    pub marker: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub facing: Facing,
    pub dash: Dash,
}

/// Turns held direction flags into a unit vector on the ground plane (`-Z` is forward).
/// Returns zero when nothing is held or opposing keys cancel out.
pub fn move_direction(flags: MoveFlags) -> Vec3 {
    let mut direction = Vec3::ZERO;
    if flags.contains(MoveFlags::FORWARD) {
        direction.z -= 1.0;
    }
    if flags.contains(MoveFlags::BACK) {
        direction.z += 1.0;
    }
    if flags.contains(MoveFlags::LEFT) {
        direction.x -= 1.0;
    }
    if flags.contains(MoveFlags::RIGHT) {
        direction.x += 1.0;
    }
    direction.normalize_or_zero()
}

/// Advances the player by one frame.
///
/// With a direction held, velocity is set outright at walking or dashing speed
/// and the player turns to face it. Without one, horizontal velocity is damped
/// by [`player::FRICTION`] once per frame (so damping depends on frame rate).
pub fn step_player(
    position: &mut Vec3,
    velocity: &mut Vec3,
    facing: &mut f32,
    dash: &mut Dash,
    flags: MoveFlags,
    seconds: f32,
    arena: &Arena,
) {
    let direction = move_direction(flags);

    if direction != Vec3::ZERO {
        let mut speed = player::BASE_SPEED;
        if dash.is_dashing && dash.timer > 0.0 {
            speed = player::DASH_SPEED;
            dash.spend(seconds);
        }

        velocity.x = direction.x * speed;
        velocity.z = direction.z * speed;
        *facing = Facing::toward(direction).0;
    } else {
        velocity.x *= player::FRICTION;
        velocity.z *= player::FRICTION;
    }

    dash.cool(seconds);

    position.x += velocity.x * seconds;
    position.z += velocity.z * seconds;
    *position = arena.clamp(*position);
}

/// Processes player commands: dash triggers, restart requests and mute toggles.
///
/// Dash only fires while the round is running; restart only registers once the
/// round has been decided.
#[allow(clippy::too_many_arguments)]
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    state: Res<RoundState>,
    mut pending_restart: ResMut<PendingRestart>,
    mut audio_state: ResMut<AudioState>,
    mut players: Query<&mut Dash, With<PlayerControlled>>,
    mut audio_events: EventWriter<AudioEvent>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event;
        match command {
            GameCommand::Dash => {
                if !state.is_running() {
                    continue;
                }
                let mut dash = match players.single_mut() {
                    Ok(dash) => dash,
                    Err(e) => {
                        errors.write(GameError::InvalidState(format!(
                            "No/multiple entities queried for player system: {}",
                            e
                        )));
                        continue;
                    }
                };
                if dash.try_trigger() {
                    debug!(cooldown = dash.cooldown, "Dash triggered");
                    audio_events.write(AudioEvent::PlaySound(SoundCue::Dash));
                } else {
                    trace!(is_dashing = dash.is_dashing, cooldown = dash.cooldown, "Dash refused");
                }
            }
            GameCommand::Restart => {
                if state.is_terminal() {
                    info!(state = %*state, "Restart requested");
                    pending_restart.0 = true;
                }
            }
            GameCommand::MuteAudio => {
                audio_state.muted = !audio_state.muted;
                info!("Audio {}", if audio_state.muted { "muted" } else { "unmuted" });
            }
        }
    }
}

/// Executes frame-by-frame movement for the player from the held input.
pub fn player_movement_system(
    arena: Res<Arena>,
    bindings: Res<Bindings>,
    input: Res<InputState>,
    delta_time: Res<DeltaTime>,
    mut players: Query<(&mut Position, &mut Velocity, &mut Facing, &mut Dash), With<PlayerControlled>>,
) {
    let flags = input.move_flags(&bindings);
    for (mut position, mut velocity, mut facing, mut dash) in players.iter_mut() {
        step_player(
            &mut position.0,
            &mut velocity.0,
            &mut facing.0,
            &mut dash,
            flags,
            delta_time.seconds,
            &arena,
        );
    }
}
