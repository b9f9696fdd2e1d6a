//! The audio-thread side of the kiosk.
//!
//! The UI thread never touches a voice directly. It sends `AudioCommand`s
//! over a ring buffer and the `Mixer` applies them at the start of the next
//! block.

pub mod message;
pub mod mixer;

pub use message::{AudioCommand, MessageReceiver, VoiceKey};
pub use mixer::{Mixer, MAX_ONE_SHOTS};
pub use crate::voices::Patch;
