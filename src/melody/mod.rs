//! Melody: a drawn line becomes a tune.
//!
//! The visitor drags across the canvas; the stroke is read left to right by
//! a playhead and its height becomes pitch. [`sample_pitch`] is the whole
//! mapping, [`Sketch`] is the screen's state machine around it.

pub mod cursor;
pub mod sketch;
pub mod stroke;

pub use cursor::PlaybackCursor;
pub use sketch::{to_canvas, MelodyFrame, Sketch, Viewport, PLAYING_GAIN};
pub use stroke::{sample_pitch, sample_point, y_to_frequency, Point, Stroke};
