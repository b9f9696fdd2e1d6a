//! Kick drum voice.
//!
//! A sine wave whose pitch dives from 150 Hz to almost nothing in half a
//! second. The fast early drop is heard as the "thump", the long tail as
//! the body.
//!
//! # How It Works
//!
//! 1. Sine oscillator, exponential pitch sweep 150 Hz → 0.01 Hz over 0.5 s
//! 2. Gain sweeps exponentially 1.0 → 0.01 over the same half second
//! 3. The voice stops at 0.5 s

use crate::dsp::automation::Sweep;
use crate::graph::{extensions::NodeExt, gain::GainNode, oscillator::OscNode};
use crate::voices::OneShotVoice;

pub const LENGTH: f32 = 0.5;

/// Create a kick drum voice.
pub fn kick() -> OneShotVoice {
    OscNode::sine()
        .with_sweep(Sweep::exponential(150.0, 0.01, LENGTH))
        .through(
            GainNode::new(0.0)
                .with_sweep(Sweep::exponential(1.0, 0.01, LENGTH))
                .stop_after(LENGTH),
        )
}
