use crate::graph::node::{GraphNode, RenderCtx};

/*
Loop Player
===========

Plays a recorded clip over and over at a variable speed. The tempo screen
records the visitor's voice and loops it at `bpm / 120`, so dragging the
tempo up makes the voice faster and higher, like a tape sped up.

  position   Fractional read index into the clip.
  step       rate · clip_rate / output_rate, added every sample.

Between two samples the output is linearly interpolated:

  clip:   ... a ─────── b ...
                  ↑
              position (frac = 0.3)  →  a + (b - a) · 0.3

The clip wraps around at the end, including the interpolation partner of
its final sample.
*/

pub struct LoopNode {
    clip: Vec<f32>,
    clip_rate: f32,
    rate: f32,
    position: f64,
}

impl LoopNode {
    pub fn new(clip: Vec<f32>, clip_rate: f32) -> Self {
        Self {
            clip,
            clip_rate,
            rate: 1.0,
            position: 0.0,
        }
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.set_rate(rate);
        self
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.max(0.0);
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn len(&self) -> usize {
        self.clip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clip.is_empty()
    }

    /// Give the clip back, e.g. to free it off the audio thread.
    pub fn into_clip(self) -> Vec<f32> {
        self.clip
    }
}

impl GraphNode for LoopNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let len = self.clip.len();
        if len == 0 {
            out.fill(0.0);
            return;
        }

        let step = self.rate as f64 * self.clip_rate as f64 / ctx.sample_rate as f64;
        for sample in out.iter_mut() {
            let index = self.position as usize;
            let frac = (self.position - index as f64) as f32;
            let a = self.clip[index % len];
            let b = self.clip[(index + 1) % len];
            *sample = a + (b - a) * frac;

            self.position = (self.position + step) % len as f64;
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.position = 0.0;
    }
}
