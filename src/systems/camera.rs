use bevy_ecs::{
    query::With,
    resource::Resource,
    system::{Query, ResMut},
};
use glam::{Quat, Vec3};

use crate::{
    constants::camera,
    systems::{Facing, PlayerControlled, Position},
};

/// Chase camera placement, read by the presentation layer after each frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: camera::FOLLOW_OFFSET,
            look_at: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Eases toward the spot behind and above the player, turned with their facing.
    pub fn follow(&mut self, player: Vec3, facing: f32) {
        let target = player + Quat::from_rotation_y(facing) * camera::FOLLOW_OFFSET;
        self.position = self.position.lerp(target, camera::LERP_FACTOR);
        self.look_at = player + Vec3::Y * camera::LOOK_HEIGHT;
    }
}

pub fn camera_follow_system(mut rig: ResMut<CameraRig>, players: Query<(&Position, &Facing), With<PlayerControlled>>) {
    if let Ok((position, facing)) = players.single() {
        rig.follow(position.0, facing.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_eases_toward_target() {
        let mut rig = CameraRig::default();
        rig.follow(Vec3::new(10.0, 0.0, 0.0), 0.0);
        // One tenth of the way from (0,10,15) to (10,10,15)
        assert!((rig.position - Vec3::new(1.0, 10.0, 15.0)).length() < 1e-5);
        assert_eq!(rig.look_at, Vec3::new(10.0, 2.0, 0.0));
    }

    #[test]
    fn test_offset_turns_with_facing() {
        let mut rig = CameraRig {
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
        };
        for _ in 0..200 {
            rig.follow(Vec3::ZERO, std::f32::consts::PI);
        }
        // Facing -Z puts the camera on the -Z side
        assert!(rig.position.z < -14.9);
    }
}
