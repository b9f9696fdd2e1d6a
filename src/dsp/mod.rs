//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the signal math;
//! scheduling and voice lifetime live in `graph` and `synth`.

/// Web-Audio style parameter automation (ramps and target approach).
pub mod automation;
/// State-variable low-pass filter with cutoff and Q.
pub mod filter;
/// Oscillator waveforms and noise sources.
pub mod oscillator;

pub use automation::{Curve, Param, Sweep};
pub use oscillator::Waveform;
