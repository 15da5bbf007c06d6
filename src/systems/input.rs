use std::collections::{HashMap, HashSet};

use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use bitflags::bitflags;
use strum_macros::{AsRefStr, EnumString};
use tracing::trace;

use crate::events::{GameCommand, GameEvent, KeyEvent, KeyState};

/// Logical key identifiers understood by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
pub enum Key {
    #[strum(serialize = "w", serialize = "W")]
    W,
    #[strum(serialize = "a", serialize = "A")]
    A,
    #[strum(serialize = "s", serialize = "S")]
    S,
    #[strum(serialize = "d", serialize = "D")]
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    #[strum(serialize = "Space", serialize = " ")]
    Space,
    Escape,
    #[strum(serialize = "m", serialize = "M")]
    M,
}

bitflags! {
    /// Movement directions currently held, in the arena's frame.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        const FORWARD = 1 << 0;
        const BACK = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// What a key does when held or pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(MoveFlags),
    Command(GameCommand),
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Key, Action>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert(Key::W, Action::Move(MoveFlags::FORWARD));
        key_bindings.insert(Key::ArrowUp, Action::Move(MoveFlags::FORWARD));
        key_bindings.insert(Key::S, Action::Move(MoveFlags::BACK));
        key_bindings.insert(Key::ArrowDown, Action::Move(MoveFlags::BACK));
        key_bindings.insert(Key::A, Action::Move(MoveFlags::LEFT));
        key_bindings.insert(Key::ArrowLeft, Action::Move(MoveFlags::LEFT));
        key_bindings.insert(Key::D, Action::Move(MoveFlags::RIGHT));
        key_bindings.insert(Key::ArrowRight, Action::Move(MoveFlags::RIGHT));

        // Game actions
        key_bindings.insert(Key::Space, Action::Command(GameCommand::Dash));
        key_bindings.insert(Key::Escape, Action::Command(GameCommand::Restart));
        key_bindings.insert(Key::M, Action::Command(GameCommand::MuteAudio));

        Self { key_bindings }
    }
}

impl Bindings {
    pub fn action(&self, key: Key) -> Option<Action> {
        self.key_bindings.get(&key).copied()
    }
}

/// The flat set of keys currently held down.
#[derive(Debug, Clone, Default, Resource)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    /// Marks `key` as held. Returns `true` only on the released-to-pressed edge.
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Folds every held movement key into a single direction set.
    pub fn move_flags(&self, bindings: &Bindings) -> MoveFlags {
        self.held
            .iter()
            .filter_map(|key| match bindings.action(*key) {
                Some(Action::Move(flags)) => Some(flags),
                _ => None,
            })
            .fold(MoveFlags::empty(), |acc, flags| acc | flags)
    }
}

/// Applies raw key edges to [`InputState`] and turns fresh presses of command keys into [`GameCommand`]s.
pub fn input_system(
    bindings: Res<Bindings>,
    mut input: ResMut<InputState>,
    mut keys: EventReader<KeyEvent>,
    mut writer: EventWriter<GameEvent>,
) {
    for event in keys.read() {
        match event.state {
            KeyState::Pressed => {
                if !input.press(event.key) {
                    // Held key repeating; not an edge
                    continue;
                }
                if let Some(Action::Command(command)) = bindings.action(event.key) {
                    trace!(key = event.key.as_ref(), ?command, "Key command");
                    writer.write(GameEvent::Command(command));
                }
            }
            KeyState::Released => input.release(event.key),
        }
    }
}
