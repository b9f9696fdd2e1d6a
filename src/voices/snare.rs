//! Snare drum voice.
//!
//! A tenth of a second of white noise, the way the wires under a real snare
//! buzz when the head is struck. No pitch at all.

use crate::dsp::automation::Sweep;
use crate::graph::{extensions::NodeExt, gain::GainNode, oscillator::OscNode};
use crate::voices::OneShotVoice;

pub const LENGTH: f32 = 0.1;

/// Create a snare drum voice.
pub fn snare() -> OneShotVoice {
    OscNode::noise().through(
        GainNode::new(0.0)
            .with_sweep(Sweep::exponential(0.3, 0.01, LENGTH))
            .stop_after(LENGTH),
    )
}
