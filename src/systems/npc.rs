//! Non-player characters: fleeing, wandering civilians and pursuing, shooting guards.

use std::f32::consts::TAU;

use bevy_ecs::{
    bundle::Bundle,
    component::Component,
    event::EventWriter,
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use glam::Vec3;
use rand::Rng;
use strum_macros::{AsRefStr, Display};
use tracing::{trace, warn};

use crate::{
    constants::npc,
    events::RangedAttack,
    systems::{ground_distance, horizontal, Arena, DeltaTime, Facing, NpcRng, PlayerControlled, Position},
};

/// Stable identifier of an NPC within a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NpcId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum NpcKind {
    Civilian,
    Guard,
}

/// The leg of a civilian's aimless stroll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wander {
    pub direction: Vec3,
    /// Seconds left on this leg; a new leg is rolled once it runs out.
    pub timer: f32,
}

impl Wander {
    fn reroll(&mut self, rng: &mut impl Rng) {
        let angle = rng.random_range(0.0..TAU);
        self.direction = Vec3::new(angle.sin(), 0.0, angle.cos());
        self.timer = rng.random_range(npc::WANDER_MIN_SECONDS..npc::WANDER_MAX_SECONDS);
    }
}

/// Per-kind behavior state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Civilian { flee_distance: f32, wander: Wander },
    Guard { shoot_cooldown: f32, shoot_interval: f32 },
}

/// An NPC in the roster. Eaten civilians are marked dead and despawned in the same frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Npc {
    pub id: NpcId,
    /// Base movement speed in units per second.
    pub speed: f32,
    pub alive: bool,
    pub behavior: Behavior,
}

impl Npc {
    pub fn civilian(id: NpcId) -> Self {
        Self {
            id,
            speed: npc::CIVILIAN_SPEED,
            alive: true,
            behavior: Behavior::Civilian {
                flee_distance: npc::FLEE_DISTANCE,
                wander: Wander::default(),
            },
        }
    }

    pub fn guard(id: NpcId) -> Self {
        Self {
            id,
            speed: npc::GUARD_SPEED,
            alive: true,
            behavior: Behavior::Guard {
                shoot_cooldown: 0.0,
                shoot_interval: npc::SHOOT_INTERVAL,
            },
        }
    }

    pub fn kind(&self) -> NpcKind {
        match self.behavior {
            Behavior::Civilian { .. } => NpcKind::Civilian,
            Behavior::Guard { .. } => NpcKind::Guard,
        }
    }

    pub fn is_civilian(&self) -> bool {
        self.kind() == NpcKind::Civilian
    }

    /// Advances this NPC by one frame relative to the player's position.
    ///
    /// Distance thresholds are strict: an NPC exactly at a threshold takes the
    /// fallback branch (guards hold position, civilians wander). Returns the
    /// shot a guard fired this frame, if any.
    pub fn step(
        &mut self,
        position: &mut Vec3,
        facing: &mut f32,
        player: Vec3,
        seconds: f32,
        arena: &Arena,
        rng: &mut impl Rng,
    ) -> Option<RangedAttack> {
        let Npc { id, speed, behavior, .. } = self;
        let distance = ground_distance(*position, player);
        let mut attack = None;

        match behavior {
            Behavior::Guard {
                shoot_cooldown,
                shoot_interval,
            } => {
                *shoot_cooldown = (*shoot_cooldown - seconds).max(0.0);
                if distance < npc::SHOOT_RANGE && *shoot_cooldown <= 0.0 {
                    attack = Some(RangedAttack {
                        guard: *id,
                        origin: *position,
                        target: player,
                    });
                    *shoot_cooldown = *shoot_interval;
                }

                if distance > npc::HOLD_DISTANCE {
                    let direction = horizontal(player - *position).normalize_or_zero();
                    *position += direction * *speed * seconds * npc::APPROACH_SPEED_FACTOR;
                    *facing = Facing::toward(direction).0;
                }
            }
            Behavior::Civilian { flee_distance, wander } => {
                if distance < *flee_distance {
                    let direction = horizontal(*position - player).normalize_or_zero();
                    *position += direction * *speed * seconds;
                    *facing = Facing::toward(direction).0;
                } else {
                    if wander.timer <= 0.0 {
                        wander.reroll(rng);
                    }
                    wander.timer -= seconds;
                    *position += wander.direction * *speed * seconds * npc::WANDER_SPEED_FACTOR;
                }
            }
        }

        *position = arena.clamp(*position);
        attack
    }
}

#[derive(Bundle)]
pub struct NpcBundle {
    pub npc: Npc,
    pub position: Position,
    pub facing: Facing,
}

/// Builds a fresh roster: civilians first, then guards, each dropped uniformly
/// inside the arena's spawn square.
pub fn roster(rng: &mut impl Rng, arena: &Arena) -> Vec<NpcBundle> {
    let extent = arena.spawn_extent();
    let spawn = |npc: Npc| NpcBundle {
        npc,
        position: Position(Vec3::new(
            rng.random_range(-extent..extent),
            0.0,
            rng.random_range(-extent..extent),
        )),
        facing: Facing::default(),
    };

    let civilians = (0..npc::CIVILIAN_COUNT).map(|i| NpcId(i as u32));
    let guards = (npc::CIVILIAN_COUNT..npc::CIVILIAN_COUNT + npc::GUARD_COUNT).map(|i| NpcId(i as u32));

    civilians
        .map(Npc::civilian)
        .chain(guards.map(Npc::guard))
        .map(spawn)
        .collect()
}

/// Runs every living NPC's behavior against the player's current position and
/// publishes any shots fired.
pub fn npc_behavior_system(
    arena: Res<Arena>,
    delta_time: Res<DeltaTime>,
    mut rng: ResMut<NpcRng>,
    players: Query<&Position, With<PlayerControlled>>,
    mut npcs: Query<(&mut Npc, &mut Position, &mut Facing), Without<PlayerControlled>>,
    mut attacks: EventWriter<RangedAttack>,
) {
    let player = match players.single() {
        Ok(position) => position.0,
        Err(e) => {
            warn!(error = %e, "NPC behavior skipped, player not found");
            return;
        }
    };

    for (mut npc, mut position, mut facing) in npcs.iter_mut() {
        if !npc.alive {
            continue;
        }

        if let Some(attack) = npc.step(
            &mut position.0,
            &mut facing.0,
            player,
            delta_time.seconds,
            &arena,
            &mut rng.0,
        ) {
            trace!(guard = attack.guard.0, origin = ?attack.origin, target = ?attack.target, "Guard fired");
            attacks.write(attack);
        }
    }
}
