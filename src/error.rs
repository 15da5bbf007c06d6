//! Centralized error types for the game.
//!
//! The simulation core clamps out-of-range values instead of failing, so these
//! errors only cover invariant violations inside the ECS world, console setup
//! and malformed key identifiers coming from the host.

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// Systems report problems by writing this as an event; `Game::tick` drains
/// and logs them so a broken frame never takes the round down with it.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Platform-specific errors.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Console initialization failed: {0}")]
    ConsoleInit(String),
}

/// Errors raised while translating presentation-layer key identifiers.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown key identifier: {0:?}")]
    UnknownKey(String),
}
