//! Start-up settings for a kiosk session.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::{Language, Theme};
use crate::dynamics::Volume;
use crate::rhythm;
use crate::tempo::Tempo;

/// How the kiosk looks and sounds when it starts (and after every reset
/// back to the menu, since nothing is persisted).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct KioskConfig {
    pub language: Language,
    pub theme: Theme,
    /// Melody playback speed multiplier, 0.5–3.0.
    pub melody_speed: f32,
    /// Step sequencer tempo, 60–200 BPM.
    pub rhythm_bpm: u32,
    /// Tempo screen BPM.
    pub tempo: Tempo,
    /// Whether the tempo screen starts with the click on.
    pub metronome: bool,
    /// Dynamics fader position.
    pub volume: Volume,
    /// Overall output level, 0.0–1.0.
    pub master_gain: f32,
}

impl KioskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn melody_speed(mut self, speed: f32) -> Self {
        self.melody_speed = speed.clamp(
            crate::melody::cursor::MIN_SPEED,
            crate::melody::cursor::MAX_SPEED,
        );
        self
    }

    /// Sets both the step sequencer and the tempo screen, each clamped to
    /// its own range.
    pub fn bpm(mut self, bpm: u32) -> Self {
        self.rhythm_bpm = bpm.clamp(rhythm::MIN_BPM, rhythm::MAX_BPM);
        self.tempo = Tempo::from_bpm(bpm);
        self
    }

    pub fn metronome(mut self, enabled: bool) -> Self {
        self.metronome = enabled;
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = Volume::new(volume);
        self
    }

    pub fn master_gain(mut self, gain: f32) -> Self {
        self.master_gain = gain.clamp(0.0, 1.0);
        self
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            language: Language::En,
            theme: Theme::Dark,
            melody_speed: 1.0,
            rhythm_bpm: rhythm::DEFAULT_BPM,
            tempo: Tempo::default(),
            metronome: true,
            volume: Volume::default(),
            master_gain: 0.8,
        }
    }
}
