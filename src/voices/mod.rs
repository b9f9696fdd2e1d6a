//! Pre-built voices for every sound the kiosk makes.
//!
//! The drums and the metronome click are one-shot graphs that stop on their
//! own. The held voices (melody tone, dynamics drone, chord notes) sound
//! until released and accept live control changes.
//!
//! # Example
//!
//! ```ignore
//! use what_is_music::{rhythm::Percussion, voices};
//!
//! let kick = voices::percussion(Percussion::Kick);
//! let click = voices::click();
//! let drone = voices::HeldVoice::drone(1_600.0, 0.21);
//! ```

mod click;
mod held;
mod hihat;
mod kick;
mod snare;
mod tom;

pub use click::click;
pub use held::{HeldVoice, Patch, CHORD_NOTE_GAIN, CONTROL_TIME_CONSTANT, RELEASE_TIME};
pub use hihat::hihat;
pub use kick::kick;
pub use snare::snare;
pub use tom::tom;

use crate::graph::{GainNode, OscNode, Through};
use crate::rhythm::Percussion;

/// Every drum hit and click is one oscillator into a self-stopping gain, so
/// the mixer can keep them in a fixed pool without boxing.
pub type OneShotVoice = Through<OscNode, GainNode>;

/// Build the one-shot voice for a sequencer row.
pub fn percussion(voice: Percussion) -> OneShotVoice {
    match voice {
        Percussion::Kick => kick(),
        Percussion::Snare => snare(),
        Percussion::Tom => tom(),
        Percussion::HiHat => hihat(),
    }
}

/// How long a one-shot voice rings, in seconds.
pub fn percussion_length(voice: Percussion) -> f32 {
    match voice {
        Percussion::Kick => kick::LENGTH,
        Percussion::Snare => snare::LENGTH,
        Percussion::Tom => tom::LENGTH,
        Percussion::HiHat => hihat::LENGTH,
    }
}
