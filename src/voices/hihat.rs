//! Hi-hat voice (closed).
//!
//! A very short, quiet burst of a 10 kHz square wave. At that pitch the
//! square's harmonics fold into a bright metallic "tss".

use crate::dsp::automation::Sweep;
use crate::graph::{extensions::NodeExt, gain::GainNode, oscillator::OscNode};
use crate::voices::OneShotVoice;

pub const LENGTH: f32 = 0.05;

/// Create a closed hi-hat voice.
pub fn hihat() -> OneShotVoice {
    OscNode::square().with_frequency(10_000.0).through(
        GainNode::new(0.0)
            .with_sweep(Sweep::exponential(0.05, 0.01, LENGTH))
            .stop_after(LENGTH),
    )
}
