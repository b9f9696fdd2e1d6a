use crate::dsp::{
    automation::{Param, Sweep},
    oscillator::{OscillatorBlock, Waveform},
};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Oscillator Node
===============

Wraps an `OscillatorBlock` with an automated frequency. Three ways to drive
the pitch:

  Fixed     OscNode::square().with_frequency(10_000.0)       hi-hat
  Sweep     OscNode::sine().with_sweep(150 → 0.01 over 0.5s)  kick, tom
  Steered   osc.glide_to(hz, 0.05)                           melody tone

A sweep is replayed from the start on every `note_on`.

Example usage:
  // Tom: triangle falling 200 Hz → 50 Hz
  let tom = OscNode::triangle()
      .with_sweep(Sweep::exponential(200.0, 50.0, 0.2))
      .through(GainNode::new(0.0).with_sweep(Sweep::exponential(0.5, 0.01, 0.2)));
*/

pub struct OscNode {
    osc: OscillatorBlock,
    frequency: Param,
    sweep: Option<Sweep>,
}

impl OscNode {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            frequency: Param::new(440.0),
            sweep: None,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Sawtooth)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn noise() -> Self {
        Self::new(Waveform::Noise)
    }

    /// Set a fixed starting frequency.
    pub fn with_frequency(mut self, hz: f32) -> Self {
        self.frequency.set_value(hz);
        self
    }

    /// Play `sweep` from the moment the node is built (and again on every
    /// `note_on`).
    pub fn with_sweep(mut self, sweep: Sweep) -> Self {
        self.frequency.start_sweep(sweep);
        self.sweep = Some(sweep);
        self
    }

    /// Smoothly steer the frequency towards `hz`.
    pub fn glide_to(&mut self, hz: f32, time_constant: f32) {
        self.frequency.set_target(hz, time_constant);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency.value()
    }

    pub fn waveform(&self) -> Waveform {
        self.osc.waveform()
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            let hz = self.frequency.next_value(ctx.sample_rate);
            *sample = self.osc.next_sample(hz, ctx.sample_rate);
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
        if let Some(sweep) = self.sweep {
            self.frequency.start_sweep(sweep);
        }
    }
}
