//! Guard shots: straight-line projectiles with a direction frozen at fire time.

use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::{EventReader, EventWriter},
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec3;
use tracing::{debug, trace};

use crate::{
    audio::SoundCue,
    constants::projectile,
    events::RangedAttack,
    systems::{
        effects::FloatingTextBundle, ground_distance, horizontal, state::TimeBudget, AudioEvent, DeltaTime, NpcId,
        PlayerControlled, Position,
    },
};

/// A shot in flight.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub guard: NpcId,
    pub direction: Vec3,
    /// Distance covered so far.
    pub traveled: f32,
    /// Guard-to-player distance at the moment of firing.
    pub range: f32,
    accumulator: f32,
}

impl Projectile {
    pub fn fire(attack: &RangedAttack) -> Self {
        Self {
            guard: attack.guard,
            direction: horizontal(attack.target - attack.origin).normalize_or_zero(),
            traveled: 0.0,
            range: ground_distance(attack.origin, attack.target),
            accumulator: 0.0,
        }
    }

    /// Moves the shot forward in fixed flight steps covering `seconds`.
    /// Returns `true` once it has covered its range; `position` is then where it landed.
    pub fn advance(&mut self, position: &mut Vec3, seconds: f32) -> bool {
        self.accumulator += seconds;
        while self.accumulator >= projectile::TICK_SECONDS {
            self.accumulator -= projectile::TICK_SECONDS;
            let step = projectile::SPEED * projectile::TICK_SECONDS;
            self.traveled += step;
            *position += self.direction * step;
            if self.traveled >= self.range {
                return true;
            }
        }
        false
    }

    /// Whether a shot that landed at `landing` strikes a player standing at `player`.
    pub fn hits(landing: Vec3, player: Vec3) -> bool {
        ground_distance(landing, player) < projectile::HIT_RADIUS
    }
}

/// Turns fired shots into projectiles in flight.
pub fn projectile_launch_system(
    mut commands: Commands,
    mut attacks: EventReader<RangedAttack>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    for attack in attacks.read() {
        let projectile = Projectile::fire(attack);
        trace!(guard = attack.guard.0, range = projectile.range, "Projectile launched");
        commands.spawn((projectile, Position(attack.origin)));
        audio_events.write(AudioEvent::PlaySound(SoundCue::Shoot));
    }
}

/// Flies projectiles and, on arrival, compares the landing point against the
/// player's current position. A hit costs time and raises a text cue.
pub fn projectile_flight_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    mut time: ResMut<TimeBudget>,
    players: Query<&Position, With<PlayerControlled>>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Position), Without<PlayerControlled>>,
) {
    let Ok(player) = players.single().map(|p| p.0) else {
        return;
    };

    for (entity, mut projectile, mut position) in projectiles.iter_mut() {
        if !projectile.advance(&mut position.0, dt.seconds) {
            continue;
        }

        commands.entity(entity).despawn();
        if Projectile::hits(position.0, player) {
            time.penalize();
            debug!(
                guard = projectile.guard.0,
                remaining = time.current(),
                "Projectile hit the player"
            );
            commands.spawn(FloatingTextBundle::penalty(time.hit_penalty, player));
        } else {
            trace!(guard = projectile.guard.0, "Projectile missed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack(origin: Vec3, target: Vec3) -> RangedAttack {
        RangedAttack {
            guard: NpcId(0),
            origin,
            target,
        }
    }

    #[test]
    fn test_direction_is_frozen_at_fire_time() {
        let projectile = Projectile::fire(&attack(Vec3::ZERO, Vec3::new(0.0, 0.0, 6.0)));
        assert_eq!(projectile.direction, Vec3::Z);
        assert_eq!(projectile.range, 6.0);
    }

    #[test]
    fn test_advance_steps_in_fixed_ticks() {
        let mut projectile = Projectile::fire(&attack(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)));
        let mut position = Vec3::ZERO;
        // Shorter than one flight tick, nothing moves
        assert!(!projectile.advance(&mut position, 0.01));
        assert_eq!(position, Vec3::ZERO);
        assert!(!projectile.advance(&mut position, 0.01));
        assert!((position.x - projectile::SPEED * projectile::TICK_SECONDS).abs() < 1e-5);
    }

    #[test]
    fn test_arrives_after_covering_range() {
        let mut projectile = Projectile::fire(&attack(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)));
        let mut position = Vec3::ZERO;
        let mut arrived = false;
        for _ in 0..20 {
            if projectile.advance(&mut position, 1.0 / 60.0) {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert!(projectile.traveled >= 3.0);
        assert!(Projectile::hits(position, Vec3::new(3.0, 0.0, 0.0)));
    }
}
