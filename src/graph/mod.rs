//! Composable building blocks for the kiosk's sound graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what a voice needs:
//! block rendering, retriggering and a way to tell the mixer it is finished.
//! The `extensions` module adds `.through()` so voices read as signal chains.

/// Fluent `.through()` chaining.
pub mod extensions;
/// Resonant low-pass with an automated cutoff.
pub mod filter;
/// Automated gain stage with an optional stop time.
pub mod gain;
/// Looping clip player with variable speed.
pub mod looper;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators and noise sources.
pub mod oscillator;
/// Serial chaining of two nodes (source → processor).
pub mod through;

pub use extensions::NodeExt;
pub use filter::FilterNode;
pub use gain::GainNode;
pub use looper::LoopNode;
pub use node::{GraphNode, RenderCtx};
pub use oscillator::OscNode;
pub use through::Through;
