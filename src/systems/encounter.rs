use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{With, Without},
    system::{Commands, Query, ResMut},
};
use glam::Vec3;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    audio::SoundCue,
    constants::player,
    systems::{
        effects::{BloodDecal, FloatingTextBundle},
        ground_distance,
        player::Dash,
        state::{EatenCount, TimeBudget},
        AudioEvent, Npc, PlayerControlled, Position,
    },
};

/// Whether a player in the given dash state can eat `npc` standing `distance` away.
///
/// Only civilians are edible, and only while dashing; walking into one does nothing.
pub fn can_eat(npc: &Npc, is_dashing: bool, distance: f32) -> bool {
    npc.alive && npc.is_civilian() && is_dashing && distance < player::EAT_RADIUS
}

/// Resolves player-NPC contact: a dashing player devours every civilian within
/// reach, gaining time for each.
#[allow(clippy::type_complexity)]
pub fn eating_system(
    mut commands: Commands,
    mut time: ResMut<TimeBudget>,
    mut eaten: ResMut<EatenCount>,
    players: Query<(&Position, &Dash), With<PlayerControlled>>,
    mut npcs: Query<(Entity, &mut Npc, &Position), Without<PlayerControlled>>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    let Ok((player, dash)) = players.single() else {
        return;
    };

    let mut devoured: SmallVec<[(Entity, Vec3); 4]> = SmallVec::new();
    for (entity, mut npc, position) in npcs.iter_mut() {
        if !can_eat(&npc, dash.is_dashing, ground_distance(position.0, player.0)) {
            continue;
        }
        npc.alive = false;
        debug!(npc = npc.id.0, position = ?position.0, "Civilian eaten");
        devoured.push((entity, position.0));
    }

    for (entity, position) in devoured {
        commands.entity(entity).despawn();
        eaten.record();
        time.reward();

        audio_events.write(AudioEvent::PlaySound(SoundCue::Chomp));
        audio_events.write(AudioEvent::PlaySound(SoundCue::Scream));
        commands.spawn((BloodDecal::default(), Position(position)));
        commands.spawn(FloatingTextBundle::gain(time.gain_per_eat, position));
    }
}
