use std::f32::consts::PI;

/*
State-Variable Low-Pass
=======================

The dynamics screen runs a sawtooth drone through a resonant low-pass: the
louder the visitor pushes the fader, the higher the cutoff climbs, so loud
sounds are also brighter, the way real instruments behave.

Topology-preserving (TPT) state-variable filter:

  g = tan(π · cutoff / sample_rate)     prewarped integrator gain
  k = 1 / Q                             damping

  per sample:
    h  = 1 / (1 + g·(g + k))
    v3 = x - ic2
    v1 = h · (ic1 + g·v3)               band-pass
    v2 = ic2 + g·v1                     low-pass
    ic1 = 2·v1 - ic1
    ic2 = 2·v2 - ic2

Q = 0.707 is flat (Butterworth); Q = 5 gives the pronounced "wah" peak the
drone uses. Cutoff is kept below Nyquist so tan() never blows up.
*/

pub const DEFAULT_Q: f32 = std::f32::consts::FRAC_1_SQRT_2;

#[derive(Debug, Clone)]
pub struct SVFilter {
    ic1eq: f32, // first integrator's memory
    ic2eq: f32, // second integrator's memory

    pub cutoff_hz: f32,
    pub q: f32,
}

impl SVFilter {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q: DEFAULT_Q,
        }
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.set_q(q);
        self
    }

    #[inline]
    fn coefficients(&self, sample_rate: f32) -> (f32, f32) {
        let cutoff = self.cutoff_hz.clamp(10.0, sample_rate * 0.49);
        let g = (PI * cutoff / sample_rate).tan();
        let k = 1.0 / self.q;
        (g, k)
    }

    /// Filter one sample.
    #[inline]
    pub fn next_sample(&mut self, sample: f32, sample_rate: f32) -> f32 {
        let (g, k) = self.coefficients(sample_rate);
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        v2
    }

    /// Filter a block in place at a fixed cutoff.
    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }

    pub fn set_q(&mut self, q: f32) {
        self.q = q.clamp(0.1, 30.0);
    }
}
