use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::harmony::Note;
use crate::rhythm::Percussion;
use crate::voices::Patch;

/// Identifies a held voice so later commands can steer or release it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VoiceKey {
    /// The melody screen's tone.
    Melody,
    /// The dynamics screen's filtered sawtooth.
    Drone,
    /// One sounding note of the harmony keyboard.
    Chord(Note),
}

impl VoiceKey {
    /// How many distinct keys exist: melody, drone and one per note.
    pub const COUNT: usize = 2 + Note::ALL.len();

    /// Dense index in `0..COUNT`, for fixed voice tables.
    pub fn slot(self) -> usize {
        match self {
            VoiceKey::Melody => 0,
            VoiceKey::Drone => 1,
            VoiceKey::Chord(note) => 2 + note.index(),
        }
    }
}

/// Control messages sent from the UI thread to the audio thread.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Fire a drum hit.
    Trigger(Percussion),
    /// Fire a metronome click.
    Click,
    /// Start a held voice, replacing any voice already under `key`.
    Hold { key: VoiceKey, patch: Patch },
    SetFrequency { key: VoiceKey, hz: f32 },
    SetGain { key: VoiceKey, gain: f32 },
    SetCutoff { key: VoiceKey, hz: f32 },
    /// Fade out and free a held voice.
    Release(VoiceKey),
    /// Release every held voice and stop the loop.
    ReleaseAll,
    /// Loop a recorded clip at `rate` times its natural speed.
    StartLoop {
        samples: Vec<f32>,
        sample_rate: f32,
        rate: f32,
    },
    SetLoopRate(f32),
    StopLoop,
    /// Overall output level, 0.0 ..= 1.0.
    SetMaster(f32),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<AudioCommand>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<AudioCommand> {
    fn pop(&mut self) -> Option<AudioCommand> {
        Consumer::pop(self).ok()
    }
}

/// Offline driving (tests, benches, rendering to a buffer).
impl MessageReceiver for VecDeque<AudioCommand> {
    fn pop(&mut self) -> Option<AudioCommand> {
        self.pop_front()
    }
}
