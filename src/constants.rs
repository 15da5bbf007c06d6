//! This module contains all the tuning constants used in the game.

use std::time::Duration;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Arena geometry.
pub mod arena {
    /// Full edge length of the square playfield, in world units.
    pub const SIZE: f32 = 50.0;
    /// Distance kept between any entity and the fence.
    pub const WALL_MARGIN: f32 = 2.0;
    /// Spawns are kept this far (in total, across both sides) away from the fence.
    pub const SPAWN_MARGIN: f32 = 10.0;
}

/// Player movement and dash tuning.
pub mod player {
    pub const BASE_SPEED: f32 = 8.0;
    pub const DASH_SPEED: f32 = 20.0;
    /// Seconds a dash lasts (only counted down while moving).
    pub const DASH_DURATION: f32 = 0.3;
    /// Seconds between dash triggers.
    pub const DASH_COOLDOWN: f32 = 1.0;
    /// Per-frame multiplier applied to horizontal velocity when no direction is held.
    pub const FRICTION: f32 = 0.9;
    /// Distance under which a dashing player eats a civilian.
    pub const EAT_RADIUS: f32 = 2.0;
}

/// NPC roster and behavior tuning.
pub mod npc {
    pub const CIVILIAN_COUNT: usize = 15;
    pub const GUARD_COUNT: usize = 5;

    pub const CIVILIAN_SPEED: f32 = 5.0;
    pub const GUARD_SPEED: f32 = 3.0;

    pub const FLEE_DISTANCE: f32 = 10.0;
    /// Fraction of a civilian's speed used while wandering.
    pub const WANDER_SPEED_FACTOR: f32 = 0.3;
    /// Wander legs last a uniform duration in `[MIN, MAX)` seconds.
    pub const WANDER_MIN_SECONDS: f32 = 1.0;
    pub const WANDER_MAX_SECONDS: f32 = 3.0;

    pub const SHOOT_RANGE: f32 = 20.0;
    pub const SHOOT_INTERVAL: f32 = 2.0;
    /// Guards stop closing in once within this distance.
    pub const HOLD_DISTANCE: f32 = 10.0;
    /// Fraction of a guard's speed used while approaching.
    pub const APPROACH_SPEED_FACTOR: f32 = 0.5;
}

/// Time budget tuning.
pub mod budget {
    pub const MAX_TIME: f32 = 100.0;
    /// Seconds of budget lost per real second.
    pub const DECAY_RATE: f32 = 0.1;
    pub const GAIN_PER_EAT: f32 = 15.0;
    pub const HIT_PENALTY: f32 = 10.0;
    pub const TARGET_EATEN: u32 = 30;
}

/// Guard projectile tuning.
pub mod projectile {
    pub const SPEED: f32 = 30.0;
    /// Fixed flight step, in seconds.
    pub const TICK_SECONDS: f32 = 0.016;
    pub const HIT_RADIUS: f32 = 2.0;
}

/// Transient presentation effects.
pub mod effects {
    pub const FLOATING_TEXT_SECONDS: f32 = 1.0;

    pub const DECAL_INITIAL_OPACITY: f32 = 0.8;
    /// Seconds before a decal starts fading.
    pub const DECAL_FADE_DELAY: f32 = 0.5;
    pub const DECAL_FADE_TICK_SECONDS: f32 = 0.05;
    pub const DECAL_FADE_STEP: f32 = 0.05;

    pub const GAIN_COLOR: &str = "#00ff00";
    pub const PENALTY_COLOR: &str = "#ff0000";
}

/// Chase camera tuning.
pub mod camera {
    use glam::Vec3;

    pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 10.0, 15.0);
    pub const LOOK_HEIGHT: f32 = 2.0;
    pub const LERP_FACTOR: f32 = 0.1;
}
