use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use strum_macros::{AsRefStr, Display};
use tracing::info;

use crate::{constants::budget, systems::DeltaTime};

/// High-level lifecycle of a round. Only `Running` accepts simulation updates.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy, Display, AsRefStr)]
pub enum RoundState {
    #[default]
    NotStarted,
    Running,
    Won,
    Lost,
}

impl RoundState {
    pub fn is_running(self) -> bool {
        matches!(self, RoundState::Running)
    }

    /// `Won` and `Lost` freeze the simulation until a restart.
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundState::Won | RoundState::Lost)
    }
}

/// Run condition for systems that only advance a live round.
pub fn round_running(state: Res<RoundState>) -> bool {
    state.is_running()
}

/// The single depleting resource. `current` stays within `[0, max]` after every mutation.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TimeBudget {
    current: f32,
    pub max: f32,
    pub decay_rate: f32,
    pub gain_per_eat: f32,
    pub hit_penalty: f32,
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self {
            current: budget::MAX_TIME,
            max: budget::MAX_TIME,
            decay_rate: budget::DECAY_RATE,
            gain_per_eat: budget::GAIN_PER_EAT,
            hit_penalty: budget::HIT_PENALTY,
        }
    }
}

impl TimeBudget {
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Overwrites the remaining time, clamped into `[0, max]`.
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }

    /// Passive drain for `seconds` of play.
    pub fn decay(&mut self, seconds: f32) {
        self.set(self.current - self.decay_rate * seconds);
    }

    /// Grants the per-eat bonus.
    pub fn reward(&mut self) {
        self.set(self.current + self.gain_per_eat);
    }

    /// Applies a guard hit.
    pub fn penalize(&mut self) {
        self.set(self.current - self.hit_penalty);
    }

    pub fn is_exhausted(&self) -> bool {
        self.current <= 0.0
    }

    /// Remaining share of the budget, for bar displays.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    /// Whole seconds left, rounded up, for text displays.
    pub fn remaining_seconds(&self) -> u32 {
        self.current.ceil() as u32
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

/// Civilians devoured this round. Never decreases within a round.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EatenCount {
    eaten: u32,
    pub target: u32,
}

impl Default for EatenCount {
    fn default() -> Self {
        Self {
            eaten: 0,
            target: budget::TARGET_EATEN,
        }
    }
}

impl EatenCount {
    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn record(&mut self) {
        self.eaten = self.eaten.saturating_add(1);
    }

    pub fn reached_target(&self) -> bool {
        self.eaten >= self.target
    }

    pub fn reset(&mut self) {
        self.eaten = 0;
    }
}

/// Set by the restart command while a round is decided; consumed by the round reset.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingRestart(pub bool);

/// Drains the time budget and ends the round as lost once it runs dry.
///
/// Runs before any movement or eating in the frame, so a frame that would both
/// win and lose resolves as a loss.
pub fn time_decay_system(delta_time: Res<DeltaTime>, mut time: ResMut<TimeBudget>, mut state: ResMut<RoundState>) {
    if !state.is_running() {
        return;
    }

    time.decay(delta_time.seconds);
    if time.is_exhausted() {
        info!("Time budget exhausted, round lost");
        *state = RoundState::Lost;
    }
}

/// Settles the frame: loss first, then win.
pub fn verdict_system(time: Res<TimeBudget>, eaten: Res<EatenCount>, mut state: ResMut<RoundState>) {
    if !state.is_running() {
        return;
    }

    if time.is_exhausted() {
        info!(eaten = eaten.eaten(), "Time budget exhausted after hits, round lost");
        *state = RoundState::Lost;
    } else if eaten.reached_target() {
        info!(eaten = eaten.eaten(), remaining = time.current(), "Target reached, round won");
        *state = RoundState::Won;
    }
}
