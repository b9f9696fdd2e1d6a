//! Tempo: how fast the beat goes.
//!
//! A metronome clicks at the chosen BPM, the screen names the speed with its
//! Italian marking, and a recorded voice loop is sped up or slowed down so
//! that 120 BPM is its natural speed.

pub mod recorder;

use std::time::Duration;

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::Language;
use crate::error::{Error, Result};

pub use recorder::{resample_linear, RecorderState, VoiceRecorder, MAX_RECORDING_SECONDS};

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 220;
pub const DEFAULT_BPM: u32 = 120;
/// The tempo at which a recorded voice plays at its natural speed.
pub const NATURAL_BPM: f32 = 120.0;

/// Beats per minute, always within 40–220.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tempo(u32);

impl Tempo {
    /// Clamp `bpm` into the allowed range.
    pub fn from_bpm(bpm: u32) -> Self {
        Self(bpm.clamp(MIN_BPM, MAX_BPM))
    }

    /// Accept any positive, finite BPM, rounding and clamping it into range.
    ///
    /// Zero, negative, NaN and infinite values are rejected.
    pub fn try_from_bpm(bpm: f64) -> Result<Self> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(Error::InvalidTempo(bpm));
        }
        let rounded = bpm.round().min(MAX_BPM as f64) as u32;
        Ok(Self::from_bpm(rounded))
    }

    pub fn bpm(self) -> u32 {
        self.0
    }

    /// Move by `delta` BPM, staying in range.
    pub fn nudge(self, delta: i32) -> Self {
        Self::from_bpm(self.0.saturating_add_signed(delta))
    }

    /// Length of one beat.
    pub fn beat_period(self) -> Duration {
        Duration::from_secs_f64(60.0 / self.0 as f64)
    }

    pub fn marking(self) -> TempoMarking {
        TempoMarking::for_bpm(self.0)
    }

    /// Speed factor for the recorded voice loop.
    pub fn voice_playback_rate(self) -> f32 {
        self.0 as f32 / NATURAL_BPM
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self(DEFAULT_BPM)
    }
}

/// Italian tempo names as shown on the screen.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempoMarking {
    Largo,
    Andante,
    Allegro,
}

impl TempoMarking {
    pub const ALL: [TempoMarking; 3] = [
        TempoMarking::Largo,
        TempoMarking::Andante,
        TempoMarking::Allegro,
    ];

    pub fn for_bpm(bpm: u32) -> Self {
        if bpm < 60 {
            TempoMarking::Largo
        } else if bpm < 108 {
            TempoMarking::Andante
        } else {
            TempoMarking::Allegro
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TempoMarking::Largo => "Largo",
            TempoMarking::Andante => "Andante",
            TempoMarking::Allegro => "Allegro",
        }
    }

    pub fn description(self, language: Language) -> &'static str {
        match (self, language) {
            (TempoMarking::Largo, Language::En) => "Slow and broad.",
            (TempoMarking::Largo, Language::Th) => "ช้าและกว้าง",
            (TempoMarking::Andante, Language::En) => "A walking pace.",
            (TempoMarking::Andante, Language::Th) => "จังหวะการเดิน",
            (TempoMarking::Allegro, Language::En) => "Fast, quickly and bright.",
            (TempoMarking::Allegro, Language::Th) => "เร็ว รวดเร็ว และสดใส",
        }
    }

    /// Textbook range printed under the preset button.
    pub fn range_label(self) -> &'static str {
        match self {
            TempoMarking::Largo => "40-60",
            TempoMarking::Andante => "76-108",
            TempoMarking::Allegro => "120-168",
        }
    }

    /// BPM chosen when the preset is pressed.
    pub fn preset(self) -> Tempo {
        match self {
            TempoMarking::Largo => Tempo(50),
            TempoMarking::Andante => Tempo(92),
            TempoMarking::Allegro => Tempo(144),
        }
    }
}

/// Free-running beat timer with an on/off click.
///
/// Beats keep counting while the click is muted so the pulse animation never
/// stops; only the clicks are suppressed.
#[derive(Debug, Clone)]
pub struct Metronome {
    tempo: Tempo,
    enabled: bool,
    banked: Duration,
    beats: u64,
}

impl Metronome {
    pub fn new(tempo: Tempo) -> Self {
        Self {
            tempo,
            enabled: true,
            banked: Duration::ZERO,
            beats: 0,
        }
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Change tempo. The beat restarts from this moment.
    pub fn set_tempo(&mut self, tempo: Tempo) {
        if tempo != self.tempo {
            debug!("metronome tempo {} -> {} bpm", self.tempo.bpm(), tempo.bpm());
            self.tempo = tempo;
            self.banked = Duration::ZERO;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            self.enabled = enabled;
            self.banked = Duration::ZERO;
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Bank `elapsed`; returns how many clicks came due (0 while muted).
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.banked += elapsed;
        let period = self.tempo.beat_period();
        let mut due = 0;
        while self.banked >= period {
            self.banked -= period;
            self.beats += 1;
            due += 1;
        }
        if self.enabled {
            due
        } else {
            0
        }
    }

    /// Beats counted since creation.
    pub fn beats(&self) -> u64 {
        self.beats
    }

    /// Position within the current beat, 0.0 .. 1.0.
    pub fn beat_phase(&self) -> f32 {
        (self.banked.as_secs_f64() / self.tempo.beat_period().as_secs_f64()) as f32
    }
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new(Tempo::default())
    }
}
