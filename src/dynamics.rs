//! Dynamics: loud and soft.
//!
//! One fader drives a sawtooth drone. Pushing it up raises the gain and
//! opens a low-pass filter at the same time, because real instruments get
//! brighter as they get louder. The screen names the level with the
//! musician's terms, piano to fortissimo.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::Language;

pub const DEFAULT_VOLUME: f32 = 70.0;

/// Drone gain at full volume.
pub const MAX_GAIN: f32 = 0.3;
/// Filter cutoff at zero volume, in Hz.
pub const BASE_CUTOFF: f32 = 200.0;
/// Cutoff added at full volume, in Hz.
pub const CUTOFF_SPAN: f32 = 2_000.0;

/// Fader position, 0–100.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f32);

impl Volume {
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 100.0))
        } else {
            Self(0.0)
        }
    }

    /// Volume from a pointer position on a vertical fader.
    ///
    /// `top` is the fader's top edge and `height` its length, in the same
    /// units as `y`. The top of the fader is 100, the bottom 0.
    pub fn from_slider(y: f32, top: f32, height: f32) -> Self {
        if height <= 0.0 {
            return Self(0.0);
        }
        Self::new((1.0 - (y - top) / height) * 100.0)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn nudge(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }

    fn fraction(self) -> f32 {
        self.0 / 100.0
    }

    pub fn gain(self) -> f32 {
        self.fraction() * MAX_GAIN
    }

    pub fn cutoff(self) -> f32 {
        BASE_CUTOFF + self.fraction() * CUTOFF_SPAN
    }

    pub fn intensity(self) -> Intensity {
        Intensity::for_volume(self.0)
    }

    /// Size of the on-screen star, 0.4 at silence to 1.2 at full.
    pub fn star_scale(self) -> f32 {
        0.4 + self.fraction() * 0.8
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intensity {
    Piano,
    Mezzo,
    Forte,
    Fortissimo,
}

impl Intensity {
    pub fn for_volume(volume: f32) -> Self {
        if volume < 20.0 {
            Intensity::Piano
        } else if volume < 50.0 {
            Intensity::Mezzo
        } else if volume < 85.0 {
            Intensity::Forte
        } else {
            Intensity::Fortissimo
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Intensity::Piano => "Piano",
            Intensity::Mezzo => "Mezzo",
            Intensity::Forte => "Forte",
            Intensity::Fortissimo => "Fortissimo",
        }
    }

    /// Score marking.
    pub fn symbol(self) -> &'static str {
        match self {
            Intensity::Piano => "p",
            Intensity::Mezzo => "mf",
            Intensity::Forte => "f",
            Intensity::Fortissimo => "ff",
        }
    }

    pub fn meaning(self, language: Language) -> &'static str {
        match (self, language) {
            (Intensity::Piano, Language::En) => "soft",
            (Intensity::Mezzo, Language::En) => "moderately loud",
            (Intensity::Forte, Language::En) => "loud",
            (Intensity::Fortissimo, Language::En) => "very loud",
            (Intensity::Piano, Language::Th) => "เบา",
            (Intensity::Mezzo, Language::Th) => "ค่อนข้างดัง",
            (Intensity::Forte, Language::Th) => "ดัง",
            (Intensity::Fortissimo, Language::Th) => "ดังมาก",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_seventy() {
        let volume = Volume::default();
        assert_eq!(volume.value(), 70.0);
        assert!((volume.gain() - 0.21).abs() < 1e-6);
        assert!((volume.cutoff() - 1_600.0).abs() < 1e-3);
        assert_eq!(volume.intensity(), Intensity::Forte);
    }

    #[test]
    fn extremes_map_to_range_ends() {
        let silent = Volume::new(0.0);
        assert_eq!(silent.gain(), 0.0);
        assert_eq!(silent.cutoff(), BASE_CUTOFF);
        assert!((silent.star_scale() - 0.4).abs() < 1e-6);

        let full = Volume::new(100.0);
        assert!((full.gain() - MAX_GAIN).abs() < 1e-6);
        assert_eq!(full.cutoff(), BASE_CUTOFF + CUTOFF_SPAN);
        assert!((full.star_scale() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn intensity_thresholds() {
        assert_eq!(Intensity::for_volume(19.9), Intensity::Piano);
        assert_eq!(Intensity::for_volume(20.0), Intensity::Mezzo);
        assert_eq!(Intensity::for_volume(49.9), Intensity::Mezzo);
        assert_eq!(Intensity::for_volume(50.0), Intensity::Forte);
        assert_eq!(Intensity::for_volume(85.0), Intensity::Fortissimo);
    }

    #[test]
    fn slider_maps_top_to_full() {
        assert_eq!(Volume::from_slider(10.0, 10.0, 200.0).value(), 100.0);
        assert_eq!(Volume::from_slider(210.0, 10.0, 200.0).value(), 0.0);
        assert_eq!(Volume::from_slider(110.0, 10.0, 200.0).value(), 50.0);
        // Dragging past the ends clamps
        assert_eq!(Volume::from_slider(-50.0, 10.0, 200.0).value(), 100.0);
        assert_eq!(Volume::from_slider(500.0, 10.0, 200.0).value(), 0.0);
        assert_eq!(Volume::from_slider(5.0, 0.0, 0.0).value(), 0.0);
    }

    #[test]
    fn nan_volume_is_silent() {
        assert_eq!(Volume::new(f32::NAN).value(), 0.0);
    }
}
