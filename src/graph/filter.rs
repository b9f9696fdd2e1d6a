use crate::{
    dsp::{automation::Param, filter::SVFilter},
    graph::node::{GraphNode, RenderCtx},
};

/*
Low-Pass Filter Node
====================

Wraps `SVFilter` with a smoothly automated cutoff so the dynamics fader can
sweep brightness without zipper noise.

Cutoff (Hz): where the filter takes effect.
  - 200 Hz:    muffled, like through a wall    (fader at 0)
  - 1200 Hz:   warm                            (fader at 50)
  - 2200 Hz:   present, a bit nasal            (fader at 100)

Resonance (Q): emphasis at the cutoff. The drone uses Q = 5, a clear peak
that makes the sweep audible even on small kiosk speakers.

Example usage:
  let drone = OscNode::sawtooth()
      .with_frequency(110.0)
      .through(FilterNode::lowpass(1_600.0).with_q(5.0))
      .through(GainNode::new(0.2));

  // later, from the fader
  filter.set_cutoff_target(2_000.0, 0.05);
*/

pub struct FilterNode {
    filter: SVFilter,
    cutoff: Param,
}

impl FilterNode {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        FilterNode {
            filter: SVFilter::lowpass(cutoff_hz),
            cutoff: Param::new(cutoff_hz),
        }
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.filter.set_q(q);
        self
    }

    /// Smoothly move the cutoff towards `hz`.
    pub fn set_cutoff_target(&mut self, hz: f32, time_constant: f32) {
        self.cutoff.set_target(hz, time_constant);
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff.value()
    }

    pub fn q(&self) -> f32 {
        self.filter.q
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            self.filter
                .set_cutoff(self.cutoff.next_value(ctx.sample_rate));
            *sample = self.filter.next_sample(*sample, ctx.sample_rate);
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.filter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{extensions::NodeExt, oscillator::OscNode};

    fn ctx() -> RenderCtx {
        RenderCtx::new(48_000.0)
    }

    fn peak(buffer: &[f32]) -> f32 {
        buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn brighter_cutoff_lets_more_through() {
        let render = |cutoff: f32| {
            let mut chain = OscNode::sawtooth()
                .with_frequency(110.0)
                .through(FilterNode::lowpass(cutoff).with_q(5.0));
            let mut buffer = vec![0.0f32; 4096];
            chain.render_block(&mut buffer, &ctx());
            buffer
        };

        let dark = render(200.0);
        let bright = render(2_200.0);

        // Sample-to-sample movement tracks high-frequency content
        let roughness = |b: &[f32]| b.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f32>();
        assert!(roughness(&bright) > roughness(&dark));
    }

    #[test]
    fn cutoff_glides_to_target() {
        let mut filter = FilterNode::lowpass(200.0).with_q(5.0);
        filter.set_cutoff_target(2_200.0, 0.05);

        let mut buffer = vec![0.0f32; 2048];
        for _ in 0..12 {
            filter.render_block(&mut buffer, &ctx());
        }
        assert!((filter.cutoff() - 2_200.0).abs() < 20.0, "got {}", filter.cutoff());
        assert_eq!(filter.q(), 5.0);
    }

    #[test]
    fn output_stays_finite_with_resonance() {
        let mut chain = OscNode::sawtooth()
            .with_frequency(110.0)
            .through(FilterNode::lowpass(1_000.0).with_q(5.0));
        let mut buffer = vec![0.0f32; 4096];
        chain.render_block(&mut buffer, &ctx());
        assert!(buffer.iter().all(|s| s.is_finite()));
        assert!(peak(&buffer) < 10.0);
    }
}
