use bevy_ecs::{
    component::Component,
    entity::Entity,
    system::{Commands, Query, Res},
};

use crate::systems::DeltaTime;

/// Component for entities that should be automatically deleted after a number of seconds
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TimeToLive {
    pub remaining: f32,
}

impl TimeToLive {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }
}

/// System that manages entities with TimeToLive components, decrementing their remaining time
/// and despawning them when they expire
pub fn time_to_live_system(mut commands: Commands, dt: Res<DeltaTime>, mut query: Query<(Entity, &mut TimeToLive)>) {
    for (entity, mut ttl) in query.iter_mut() {
        if ttl.remaining <= dt.seconds {
            // Entity has expired, despawn it
            commands.entity(entity).despawn();
        } else {
            ttl.remaining -= dt.seconds;
        }
    }
}
