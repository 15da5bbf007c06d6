use bevy_ecs::{component::Component, resource::Resource};
use glam::Vec3;
use rand::{rngs::SmallRng, SeedableRng};

use crate::constants::arena;

/// World-space position. Every simulated entity lives on the `y = 0` plane.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec3);

/// Yaw in radians, measured with `atan2(x, z)` so that `0` faces `+Z`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Facing(pub f32);

impl Facing {
    /// Yaw that looks along `direction`.
    pub fn toward(direction: Vec3) -> Self {
        Self(direction.x.atan2(direction.z))
    }
}

/// Drops the vertical component, leaving motion on the ground plane.
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between two points measured on the ground plane.
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal(a - b).length()
}

/// Tag component for the player-controlled creature.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerControlled;

/// Wall time covered by the current frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime {
    pub seconds: f32,
}

impl DeltaTime {
    pub fn from_seconds(seconds: f32) -> Self {
        Self { seconds }
    }
}

/// The square playfield. Immutable for the lifetime of a game.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    /// Full edge length.
    pub size: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self { size: arena::SIZE }
    }
}

impl Arena {
    /// Largest absolute horizontal coordinate any entity may occupy.
    pub fn boundary(&self) -> f32 {
        self.size / 2.0 - arena::WALL_MARGIN
    }

    /// Clamps both horizontal axes into `[-boundary, boundary]`; `y` is untouched.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        let boundary = self.boundary();
        Vec3::new(
            position.x.clamp(-boundary, boundary),
            position.y,
            position.z.clamp(-boundary, boundary),
        )
    }

    /// Half extent of the square that roster spawns are drawn from.
    pub fn spawn_extent(&self) -> f32 {
        (self.size - arena::SPAWN_MARGIN) / 2.0
    }
}

/// Randomness used by NPC spawning and wandering, seedable for reproducible rounds.
#[derive(Resource, Debug, Clone)]
pub struct NpcRng(pub SmallRng);

impl NpcRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        Self(SmallRng::from_os_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_boundary_keeps_margin() {
        let arena = Arena::default();
        assert_eq!(arena.boundary(), 23.0);
        assert_eq!(arena.spawn_extent(), 20.0);
    }

    #[test]
    fn test_arena_clamp_only_touches_horizontal_axes() {
        let arena = Arena::default();
        let clamped = arena.clamp(Vec3::new(40.0, 3.0, -99.0));
        assert_eq!(clamped, Vec3::new(23.0, 3.0, -23.0));
    }

    #[test]
    fn test_facing_uses_z_forward_convention() {
        assert_eq!(Facing::toward(Vec3::Z).0, 0.0);
        assert!((Facing::toward(Vec3::X).0 - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
