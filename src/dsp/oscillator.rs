use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Oscillator Block
================

A phase accumulator that turns a frequency into a waveform, one sample at a
time. The frequency is passed on every call because every sound in the kiosk
glides: the kick falls from 150 Hz, the melody follows the drawn curve.

  phase      Position within one cycle, 0.0 .. 1.0.
  increment  frequency / sample_rate, added to phase every sample.

Waveforms (all start at zero crossing or cycle start, like the browser's):

  Sine      sin(2π·phase)                     kick, melody, chord notes
  Triangle  rises 0 → 1 → -1 → 0 per cycle    tom
  Square    +1 for the first half, -1 after   hi-hat
  Sawtooth  ramps -1 → +1                     dynamics drone
  Noise     xorshift32, uniform in [-1, 1]    snare

Noise ignores the frequency entirely.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
    Noise,
}

#[derive(Debug, Clone)]
pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
    rng_state: u32,
}

const NOISE_SEED: u32 = 0x9E37_79B9;

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            rng_state: NOISE_SEED,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Sawtooth)
    }

    pub fn noise() -> Self {
        Self::new(Waveform::Noise)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Produce one sample at `frequency` and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let phase = self.phase;
        let sample = match self.waveform {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Noise => self.next_noise(),
        };

        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 || self.phase < 0.0 {
            self.phase = self.phase.rem_euclid(1.0);
        }

        sample
    }

    /// Render a block at a constant frequency.
    pub fn render(&mut self, buffer: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.rng_state = NOISE_SEED;
    }

    #[inline]
    fn next_noise(&mut self) -> f32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn sine_matches_reference() {
        let mut osc = OscillatorBlock::sine();
        let mut buffer = vec![0.0f32; 64];
        osc.render(&mut buffer, 440.0, SAMPLE_RATE);

        let n = 12;
        let expected = (TAU * 440.0 * n as f32 / SAMPLE_RATE).sin();
        assert!((buffer[n] - expected).abs() < 1e-4, "expected {expected}, got {}", buffer[n]);
    }

    #[test]
    fn waveforms_stay_in_range() {
        for waveform in [
            Waveform::Sine,
            Waveform::Triangle,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::Noise,
        ] {
            let mut osc = OscillatorBlock::new(waveform);
            let mut buffer = vec![0.0f32; 4096];
            osc.render(&mut buffer, 1_234.0, SAMPLE_RATE);
            assert!(
                buffer.iter().all(|s| (-1.0..=1.0).contains(s)),
                "{waveform:?} left [-1, 1]"
            );
        }
    }

    #[test]
    fn square_alternates_each_half_cycle() {
        let mut osc = OscillatorBlock::square();
        // 4 samples per cycle
        let samples: Vec<f32> = (0..4).map(|_| osc.next_sample(12_000.0, SAMPLE_RATE)).collect();
        assert_eq!(samples, vec![1.0, 1.0, -1.0, -1.0]);
    }

    #[test]
    fn noise_is_not_constant() {
        let mut osc = OscillatorBlock::noise();
        let mut buffer = vec![0.0f32; 256];
        osc.render(&mut buffer, 0.0, SAMPLE_RATE);
        let first = buffer[0];
        assert!(buffer.iter().any(|&s| (s - first).abs() > 0.1));
    }
}
