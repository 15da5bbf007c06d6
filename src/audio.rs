//! This module handles sound cue delivery for the game.
//!
//! Synthesis lives outside the simulation: the game only describes each cue
//! (see [`Tone`]) and hands it to whatever [`CueSink`] the host provides.
use std::sync::Arc;

use parking_lot::Mutex;
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString};
use tracing::{debug, trace};

/// Identifiers of every sound the simulation can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumCount, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SoundCue {
    Dash,
    Chomp,
    Scream,
    Shoot,
}

/// Oscillator shape for a synthesized cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A short enveloped tone: starts at `gain` and ramps down over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub waveform: Waveform,
    pub gain: f32,
    pub duration: f32,
}

impl SoundCue {
    pub fn tone(self) -> Tone {
        match self {
            SoundCue::Dash => Tone {
                frequency: 150.0,
                waveform: Waveform::Triangle,
                gain: 0.15,
                duration: 0.2,
            },
            SoundCue::Chomp => Tone {
                frequency: 100.0,
                waveform: Waveform::Sawtooth,
                gain: 0.3,
                duration: 0.2,
            },
            SoundCue::Scream => Tone {
                frequency: 800.0,
                waveform: Waveform::Sine,
                gain: 0.2,
                duration: 0.3,
            },
            SoundCue::Shoot => Tone {
                frequency: 200.0,
                waveform: Waveform::Square,
                gain: 0.2,
                duration: 0.1,
            },
        }
    }
}

/// Anything able to voice a cue: a synthesizer, a logger, a test recorder.
pub trait CueSink {
    fn play(&mut self, cue: SoundCue, tone: Tone);
}

/// Records played cues; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    played: Arc<Mutex<Vec<SoundCue>>>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every cue recorded so far.
    pub fn take(&self) -> Vec<SoundCue> {
        std::mem::take(&mut *self.played.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.played.lock().is_empty()
    }
}

impl CueSink for CueLog {
    fn play(&mut self, cue: SoundCue, _tone: Tone) {
        self.played.lock().push(cue);
    }
}

/// Sink that reports cues through `tracing`, used by headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl CueSink for TracingSink {
    fn play(&mut self, cue: SoundCue, tone: Tone) {
        debug!(%cue, frequency = tone.frequency, waveform = tone.waveform.as_ref(), "Sound cue");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioState {
    Enabled,
    Muted,
    Disabled,
}

/// The audio front of the game.
///
/// Created without a sink (no output device), it is disabled and every call
/// silently does nothing.
pub struct Audio {
    sink: Option<Box<dyn CueSink>>,
    state: AudioState,
}

impl Default for Audio {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Audio {
    pub fn new(sink: Option<Box<dyn CueSink>>) -> Self {
        match sink {
            Some(sink) => Self {
                sink: Some(sink),
                state: AudioState::Enabled,
            },
            None => {
                tracing::warn!("No audio output available. Audio will be disabled.");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self {
            sink: None,
            state: AudioState::Disabled,
        }
    }

    pub fn play(&mut self, cue: SoundCue) {
        if self.state != AudioState::Enabled {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            trace!(%cue, "Playing cue");
            sink.play(cue, cue.tone());
        }
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.state = match (self.state, mute) {
            (AudioState::Disabled, _) => AudioState::Disabled,
            (_, true) => AudioState::Muted,
            (_, false) => AudioState::Enabled,
        };
    }

    pub fn is_muted(&self) -> bool {
        self.state == AudioState::Muted
    }

    pub fn is_disabled(&self) -> bool {
        self.state == AudioState::Disabled
    }
}
