//! Audio system for dispatching sound cues raised by the simulation.
//!
//! Cues are collected as events during the frame and handed to the [`Audio`]
//! front in the presentation phase. The front is stored as a `NonSend`
//! resource since host sinks are not required to be thread-safe.

use bevy_ecs::{
    event::{Event, EventReader},
    resource::Resource,
    system::{NonSendMut, Res},
};
use tracing::{debug, trace};

use crate::audio::{Audio, SoundCue};

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    /// Whether audio is currently muted
    pub muted: bool,
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Play a specific sound cue
    PlaySound(SoundCue),
}

/// Non-send resource wrapper for the audio front.
pub struct AudioResource(pub Audio);

/// System that processes audio events and plays cues
pub fn audio_system(mut audio: NonSendMut<AudioResource>, state: Res<AudioState>, mut events: EventReader<AudioEvent>) {
    // Set mute state if it has changed
    if audio.0.is_muted() != state.muted && !audio.0.is_disabled() {
        debug!(muted = state.muted, "Audio mute state changed");
        audio.0.set_mute(state.muted);
    }

    for event in events.read() {
        match event {
            AudioEvent::PlaySound(cue) => {
                if !audio.0.is_disabled() && !state.muted {
                    trace!(%cue, "Playing sound");
                    audio.0.play(*cue);
                } else {
                    debug!(
                        disabled = audio.0.is_disabled(),
                        muted = state.muted,
                        %cue,
                        "Skipping sound due to audio state"
                    );
                }
            }
        }
    }
}
