use std::collections::HashSet;
use std::time::{Duration, Instant};

use glam::Vec3;
use tracing::{debug, info};

use crate::audio::{CueSink, TracingSink};
use crate::constants::{player, LOOP_TIME};
use crate::events::KeyState;
use crate::formatter;
use crate::game::Game;
use crate::platform;
use crate::systems::{Key, NpcKind};

/// Distance at which the autopilot commits to a dash.
const LUNGE_DISTANCE: f32 = player::EAT_RADIUS * 2.0;
/// Dead zone per axis before a direction key is held.
const STEER_DEAD_ZONE: f32 = 0.5;

/// Stand-in for a keyboard: chases the nearest civilian and dashes when close.
#[derive(Debug, Default)]
pub struct Autopilot {
    held: HashSet<Key>,
}

impl Autopilot {
    /// Feeds this frame's key edges into the game.
    pub fn drive(&mut self, game: &mut Game) {
        let Some(player) = game.player_position() else {
            return;
        };
        let prey = game
            .npcs()
            .into_iter()
            .filter(|npc| npc.kind == NpcKind::Civilian)
            .map(|npc| npc.position)
            .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)));

        let wanted = match prey {
            Some(target) => Self::steer(target - player),
            None => HashSet::new(),
        };

        for key in self.held.difference(&wanted) {
            game.send_key(*key, KeyState::Released);
        }
        for key in wanted.difference(&self.held) {
            game.send_key(*key, KeyState::Pressed);
        }
        self.held = wanted;

        if prey.is_some_and(|target| target.distance(player) < LUNGE_DISTANCE) {
            game.send_key(Key::Space, KeyState::Pressed);
            game.send_key(Key::Space, KeyState::Released);
        }
    }

    fn steer(delta: Vec3) -> HashSet<Key> {
        let mut keys = HashSet::new();
        if delta.x > STEER_DEAD_ZONE {
            keys.insert(Key::D);
        } else if delta.x < -STEER_DEAD_ZONE {
            keys.insert(Key::A);
        }
        if delta.z > STEER_DEAD_ZONE {
            keys.insert(Key::S);
        } else if delta.z < -STEER_DEAD_ZONE {
            keys.insert(Key::W);
        }
        keys
    }
}

/// Headless host: owns the game, paces frames at `LOOP_TIME` and drives input.
pub struct App {
    pub game: Game,
    autopilot: Autopilot,
    last_tick: Instant,
}

impl App {
    pub fn new(seed: Option<u64>) -> Self {
        let sink: Option<Box<dyn CueSink>> = Some(Box::new(TracingSink));
        let mut game = match seed {
            Some(seed) => Game::with_seed(seed, sink),
            None => Game::new(sink),
        };
        game.start();

        info!(?seed, "Application initialization completed successfully");
        App {
            game,
            autopilot: Autopilot::default(),
            last_tick: Instant::now(),
        }
    }

    /// Executes a single frame with consistent timing.
    ///
    /// # Returns
    ///
    /// `true` while the round is still undecided.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        formatter::increment_frame();

        self.autopilot.drive(&mut self.game);
        self.game.tick(dt);

        if self.game.state().is_terminal() {
            debug!(state = %self.game.state(), "Round decided");
            return false;
        }

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time);
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    #[test]
    fn test_steer_holds_the_keys_pointing_at_the_target() {
        let keys = Autopilot::steer(Vec3::new(3.0, 0.0, -4.0));
        assert_that(&keys.contains(&Key::D)).is_true();
        assert_that(&keys.contains(&Key::W)).is_true();
        assert_that(&keys.len()).is_equal_to(2);
    }

    #[test]
    fn test_steer_ignores_small_offsets() {
        let keys = Autopilot::steer(Vec3::new(0.2, 0.0, -6.0));
        assert_that(&keys.len()).is_equal_to(1);
        assert_that(&keys.contains(&Key::W)).is_true();
    }
}
