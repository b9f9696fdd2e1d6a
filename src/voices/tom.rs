//! Tom voice.
//!
//! A triangle wave falling from 200 Hz to 50 Hz. Softer than the kick's sine
//! dive and higher, so it sits between kick and snare.

use crate::dsp::automation::Sweep;
use crate::graph::{extensions::NodeExt, gain::GainNode, oscillator::OscNode};
use crate::voices::OneShotVoice;

pub const LENGTH: f32 = 0.2;

/// Create a tom voice.
pub fn tom() -> OneShotVoice {
    OscNode::triangle()
        .with_sweep(Sweep::exponential(200.0, 50.0, LENGTH))
        .through(
            GainNode::new(0.0)
                .with_sweep(Sweep::exponential(0.5, 0.01, LENGTH))
                .stop_after(LENGTH),
        )
}
