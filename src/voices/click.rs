//! Metronome click.
//!
//! A quiet sine chirp, 800 Hz falling to 100 Hz. Short enough to mark the
//! beat without masking the visitor's recorded voice.

use crate::dsp::automation::Sweep;
use crate::graph::{extensions::NodeExt, gain::GainNode, oscillator::OscNode};
use crate::voices::OneShotVoice;

pub const LENGTH: f32 = 0.1;

/// Create a metronome click.
pub fn click() -> OneShotVoice {
    OscNode::sine()
        .with_sweep(Sweep::exponential(800.0, 100.0, LENGTH))
        .through(
            GainNode::new(0.0)
                .with_sweep(Sweep::exponential(0.05, 0.01, LENGTH))
                .stop_after(LENGTH),
        )
}
