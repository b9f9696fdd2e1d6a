//! Sustained voices.
//!
//! Unlike the drums, these keep sounding until told to stop, and the screens
//! steer them while they play: the melody tone follows the drawn curve, the
//! drone follows the loudness fader, chord notes come and go with the
//! keyboard.
//!
//! Every control change glides with a 50 ms time constant so sliders never
//! click. Releasing fades the gain out with the same time constant and frees
//! the voice 100 ms later.

use crate::dsp::automation::Sweep;
use crate::graph::{
    filter::FilterNode,
    gain::GainNode,
    node::{GraphNode, RenderCtx},
    oscillator::OscNode,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time constant for every live control change, in seconds.
pub const CONTROL_TIME_CONSTANT: f32 = 0.05;
/// Time constant of the fade-out on release.
pub const RELEASE_TIME_CONSTANT: f32 = 0.05;
/// Delay between release and the voice being freed.
pub const RELEASE_TIME: f32 = 0.1;

pub const DRONE_FREQUENCY: f32 = 110.0;
pub const DRONE_Q: f32 = 5.0;
pub const CHORD_NOTE_GAIN: f32 = 0.12;
pub const CHORD_NOTE_ATTACK: f32 = 0.1;

/// What a held voice is built from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Patch {
    /// Sine at `hz`, silent until its gain is raised.
    Tone { hz: f32 },
    /// 110 Hz sawtooth through a resonant low-pass, fading in to `gain`.
    Drone { cutoff: f32, gain: f32 },
    /// Sine at `hz` fading in to 0.12 over 100 ms.
    ChordNote { hz: f32 },
}

pub struct HeldVoice {
    osc: OscNode,
    filter: Option<FilterNode>,
    gain: GainNode,
}

impl HeldVoice {
    pub fn new(patch: Patch) -> Self {
        match patch {
            Patch::Tone { hz } => Self::tone(hz),
            Patch::Drone { cutoff, gain } => Self::drone(cutoff, gain),
            Patch::ChordNote { hz } => Self::chord_note(hz),
        }
    }

    pub fn tone(hz: f32) -> Self {
        Self {
            osc: OscNode::sine().with_frequency(hz),
            filter: None,
            gain: GainNode::new(0.0),
        }
    }

    pub fn drone(cutoff: f32, gain: f32) -> Self {
        let mut amp = GainNode::new(0.0);
        amp.fade_to(gain, CONTROL_TIME_CONSTANT);
        Self {
            osc: OscNode::sawtooth().with_frequency(DRONE_FREQUENCY),
            filter: Some(FilterNode::lowpass(cutoff).with_q(DRONE_Q)),
            gain: amp,
        }
    }

    pub fn chord_note(hz: f32) -> Self {
        Self {
            osc: OscNode::sine().with_frequency(hz),
            filter: None,
            gain: GainNode::new(0.0).with_sweep(Sweep::linear(0.0, CHORD_NOTE_GAIN, CHORD_NOTE_ATTACK)),
        }
    }

    pub fn set_frequency(&mut self, hz: f32) {
        self.osc.glide_to(hz, CONTROL_TIME_CONSTANT);
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain.fade_to(gain, CONTROL_TIME_CONSTANT);
    }

    /// Move the low-pass cutoff. Voices without a filter ignore this.
    pub fn set_cutoff(&mut self, hz: f32) {
        if let Some(filter) = self.filter.as_mut() {
            filter.set_cutoff_target(hz, CONTROL_TIME_CONSTANT);
        }
    }

    /// Fade out and schedule the voice to be freed.
    pub fn release(&mut self) {
        self.gain.release(RELEASE_TIME_CONSTANT, RELEASE_TIME);
    }

    pub fn is_releasing(&self) -> bool {
        self.gain.is_stopping()
    }

    pub fn frequency(&self) -> f32 {
        self.osc.frequency()
    }

    pub fn gain(&self) -> f32 {
        self.gain.gain()
    }

    pub fn cutoff(&self) -> Option<f32> {
        self.filter.as_ref().map(FilterNode::cutoff)
    }
}

impl GraphNode for HeldVoice {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render_block(out, ctx);
        if let Some(filter) = self.filter.as_mut() {
            filter.render_block(out, ctx);
        }
        self.gain.render_block(out, ctx);
    }

    fn note_off(&mut self, _ctx: &RenderCtx) {
        self.release();
    }

    fn is_active(&self) -> bool {
        self.gain.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn render_seconds(voice: &mut HeldVoice, seconds: f32) -> Vec<f32> {
        let ctx = RenderCtx::new(SAMPLE_RATE);
        let mut out = Vec::new();
        let mut block = vec![0.0f32; 480];
        for _ in 0..(seconds * 100.0) as usize {
            voice.render_block(&mut block, &ctx);
            out.extend_from_slice(&block);
        }
        out
    }

    #[test]
    fn tone_is_silent_until_raised() {
        let mut voice = HeldVoice::new(Patch::Tone { hz: 440.0 });
        let out = render_seconds(&mut voice, 0.1);
        assert!(out.iter().all(|&s| s == 0.0));

        voice.set_gain(0.2);
        let out = render_seconds(&mut voice, 0.5);
        let tail = &out[out.len() - 480..];
        assert!(tail.iter().any(|&s| s.abs() > 0.15));
    }

    #[test]
    fn chord_note_reaches_its_level() {
        let mut voice = HeldVoice::new(Patch::ChordNote { hz: 261.63 });
        render_seconds(&mut voice, 0.2);
        assert!((voice.gain() - CHORD_NOTE_GAIN).abs() < 1e-6);
    }

    #[test]
    fn release_frees_the_voice() {
        let mut voice = HeldVoice::new(Patch::ChordNote { hz: 329.63 });
        render_seconds(&mut voice, 0.2);
        assert!(voice.is_active());

        voice.release();
        assert!(voice.is_releasing());
        let out = render_seconds(&mut voice, 0.2);
        assert!(!voice.is_active());
        assert!(out[out.len() - 1] == 0.0);
    }

    #[test]
    fn drone_follows_the_fader() {
        let mut voice = HeldVoice::new(Patch::Drone { cutoff: 1_600.0, gain: 0.21 });
        render_seconds(&mut voice, 0.5);
        assert!((voice.gain() - 0.21).abs() < 0.01);

        voice.set_cutoff(400.0);
        voice.set_gain(0.06);
        render_seconds(&mut voice, 0.5);
        assert!((voice.cutoff().unwrap_or_default() - 400.0).abs() < 5.0);
        assert!((voice.gain() - 0.06).abs() < 0.01);
    }

    #[test]
    fn frequency_glides_rather_than_jumps() {
        let mut voice = HeldVoice::tone(220.0);
        voice.set_frequency(440.0);
        render_seconds(&mut voice, 0.01);
        assert!(voice.frequency() > 220.0 && voice.frequency() < 440.0);
        assert_eq!(voice.cutoff(), None);
    }
}
