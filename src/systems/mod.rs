//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod audio;
pub mod camera;
pub mod components;
pub mod effects;
pub mod encounter;
pub mod hud;
pub mod input;
pub mod lifetime;
pub mod npc;
pub mod player;
pub mod projectile;
pub mod round;
pub mod state;

pub use self::audio::*;
pub use self::camera::*;
pub use self::components::*;
pub use self::effects::*;
pub use self::encounter::*;
pub use self::hud::*;
pub use self::input::*;
pub use self::lifetime::*;
pub use self::npc::*;
pub use self::player::*;
pub use self::projectile::*;
pub use self::round::*;
pub use self::state::*;
