//! What Is Music? The core of an interactive exhibition kiosk.
//!
//! Five screens explain melody, rhythm, tempo, dynamics and harmony. The
//! modules here hold everything that can be reasoned about without a screen:
//! the draw-to-pitch melody mapper, the four-step sequencer clock, the tempo,
//! dynamics and harmony models, the bilingual content tables, and the small
//! block-based synthesis layer that renders every sound the kiosk makes.

pub mod config;
pub mod content; // Bilingual text, module metadata and screen order
pub mod dsp;
pub mod dynamics;
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod harmony;
pub mod melody; // Drawn stroke → pitch curve
pub mod rhythm; // Step grid and sequencer clock
pub mod synth; // Command-driven mixer for one-shot and held voices
pub mod tempo;
pub mod voices;

pub use config::KioskConfig;
pub use error::{Error, Result};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
