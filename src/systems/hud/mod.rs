//! Values the presentation layer draws each frame: the time bar, counters and
//! the end screen.

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};

use crate::{
    constants::effects,
    systems::state::{EatenCount, RoundState, TimeBudget},
};

/// The end-of-round banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndScreen {
    pub title: &'static str,
    pub color: &'static str,
    pub stats: String,
}

impl EndScreen {
    pub fn for_round(state: RoundState, eaten: &EatenCount) -> Option<Self> {
        let (title, color) = match state {
            RoundState::Won => ("DISTORTUS REX DEVOURS THE WORLD!", effects::GAIN_COLOR),
            RoundState::Lost => ("SECURITY NEUTRALIZED THE CREATURE", effects::PENALTY_COLOR),
            RoundState::NotStarted | RoundState::Running => return None,
        };
        Some(Self {
            title,
            color,
            stats: format!("Humans Eaten: {} / {}", eaten.eaten(), eaten.target),
        })
    }
}

/// Snapshot of everything the HUD shows.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Hud {
    /// Remaining time as a share of the maximum, in `[0, 1]`.
    pub time_fraction: f32,
    pub remaining_seconds: u32,
    pub eaten: u32,
    pub target: u32,
    pub end_screen: Option<EndScreen>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::capture(RoundState::NotStarted, &TimeBudget::default(), &EatenCount::default())
    }
}

impl Hud {
    pub fn capture(state: RoundState, time: &TimeBudget, eaten: &EatenCount) -> Self {
        Self {
            time_fraction: time.fraction(),
            remaining_seconds: time.remaining_seconds(),
            eaten: eaten.eaten(),
            target: eaten.target,
            end_screen: EndScreen::for_round(state, eaten),
        }
    }

    pub fn time_text(&self) -> String {
        format!("TIME: {}", self.remaining_seconds)
    }

    pub fn counter_text(&self) -> String {
        format!("HUMANS EATEN: {} / {}", self.eaten, self.target)
    }
}

pub fn hud_system(mut hud: ResMut<Hud>, state: Res<RoundState>, time: Res<TimeBudget>, eaten: Res<EatenCount>) {
    let snapshot = Hud::capture(*state, &time, &eaten);
    if *hud != snapshot {
        *hud = snapshot;
    }
}
