use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::systems::{input::Key, npc::NpcId};

/// High-level commands produced from key press edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Dash,
    Restart,
    MuteAudio,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

/// Whether a key went down or came back up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A raw key edge as reported by the host.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
}

/// A guard pulled the trigger. The shot travels toward where the player stood
/// at this moment; it does not home.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct RangedAttack {
    pub guard: NpcId,
    pub origin: Vec3,
    pub target: Vec3,
}
