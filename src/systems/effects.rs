//! Short-lived presentation effects owned by the simulation: floating text
//! cues and the blood decal left where a civilian was eaten.
//!
//! Effects are advanced from the main frame. Fixed-rate effects keep their own
//! accumulator so they may step zero or more times per frame.

use bevy_ecs::{
    bundle::Bundle,
    component::Component,
    entity::Entity,
    system::{Commands, Query, Res},
};
use glam::Vec3;
use tracing::trace;

use crate::{
    constants::effects,
    systems::{lifetime::TimeToLive, DeltaTime, Position},
};

/// A world-anchored text cue. The presentation layer projects it to the screen.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct FloatingText {
    pub text: String,
    /// CSS-style hex color.
    pub color: &'static str,
}

#[derive(Bundle)]
pub struct FloatingTextBundle {
    pub text: FloatingText,
    pub position: Position,
    pub ttl: TimeToLive,
}

impl FloatingTextBundle {
    pub fn new(text: impl Into<String>, position: Vec3, color: &'static str) -> Self {
        Self {
            text: FloatingText {
                text: text.into(),
                color,
            },
            position: Position(position),
            ttl: TimeToLive::new(effects::FLOATING_TEXT_SECONDS),
        }
    }

    pub fn gain(amount: f32, position: Vec3) -> Self {
        Self::new(format!("+{} TIME", amount.round() as i32), position, effects::GAIN_COLOR)
    }

    pub fn penalty(amount: f32, position: Vec3) -> Self {
        Self::new(format!("-{} TIME", amount.round() as i32), position, effects::PENALTY_COLOR)
    }
}

/// Ground decal that holds still for a moment and then fades out in fixed steps.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BloodDecal {
    pub opacity: f32,
    /// Seconds until fading begins.
    pub delay: f32,
    accumulator: f32,
}

impl Default for BloodDecal {
    fn default() -> Self {
        Self {
            opacity: effects::DECAL_INITIAL_OPACITY,
            delay: effects::DECAL_FADE_DELAY,
            accumulator: 0.0,
        }
    }
}

impl BloodDecal {
    /// Advances the decal by `seconds`. Returns `true` once it has fully faded.
    pub fn advance(&mut self, seconds: f32) -> bool {
        let mut seconds = seconds;
        if self.delay > 0.0 {
            if seconds < self.delay {
                self.delay -= seconds;
                return false;
            }
            seconds -= self.delay;
            self.delay = 0.0;
        }

        self.accumulator += seconds;
        while self.accumulator >= effects::DECAL_FADE_TICK_SECONDS {
            self.accumulator -= effects::DECAL_FADE_TICK_SECONDS;
            self.opacity -= effects::DECAL_FADE_STEP;
            if self.opacity <= 0.0 {
                self.opacity = 0.0;
                return true;
            }
        }
        false
    }
}

/// Fades decals and removes the ones that have vanished.
pub fn decal_fade_system(mut commands: Commands, dt: Res<DeltaTime>, mut decals: Query<(Entity, &mut BloodDecal)>) {
    for (entity, mut decal) in decals.iter_mut() {
        if decal.advance(dt.seconds) {
            trace!(?entity, "Decal faded out");
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decal_holds_during_delay() {
        let mut decal = BloodDecal::default();
        assert!(!decal.advance(0.4));
        assert_eq!(decal.opacity, effects::DECAL_INITIAL_OPACITY);
    }

    #[test]
    fn test_decal_fades_out_eventually() {
        let mut decal = BloodDecal::default();
        let mut frames = 0;
        while !decal.advance(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 600, "decal never faded");
        }
        assert_eq!(decal.opacity, 0.0);
    }

    #[test]
    fn test_text_cues_format_amounts() {
        assert_eq!(FloatingTextBundle::gain(15.0, Vec3::ZERO).text.text, "+15 TIME");
        let penalty = FloatingTextBundle::penalty(10.0, Vec3::ZERO);
        assert_eq!(penalty.text.text, "-10 TIME");
        assert_eq!(penalty.text.color, effects::PENALTY_COLOR);
    }
}
