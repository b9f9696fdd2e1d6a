use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series, passing the output of the first (source)
into the second (processor). Every voice in the kiosk is a short chain:

  kick:   [Sine 150→0.01 Hz] ──→ [Gain 1→0.01] ──→ output
  drone:  [Saw 110 Hz] ──→ [Low-pass Q5] ──→ [Gain] ──→ output

How It Works:
-------------
1. Render the source into the output buffer
2. Pass that buffer through the processor (in-place)

A chain is only as alive as its weakest link: once the gain stage has
stopped, the oscillator in front of it is irrelevant, so the chain reports
inactive as soon as either side does.
*/

pub struct Through<S, F> {
    pub source: S,
    pub processor: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, processor: F) -> Self {
        Self { source, processor }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.processor.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.processor.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.processor.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active() && self.processor.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{extensions::NodeExt, gain::GainNode, oscillator::OscNode};

    fn ctx() -> RenderCtx {
        RenderCtx::new(48_000.0)
    }

    #[test]
    fn renders_source_then_processor() {
        let mut node = OscNode::sine().with_frequency(440.0).through(GainNode::new(0.5));
        let mut buffer = vec![0.0; 128];
        node.render_block(&mut buffer, &ctx());

        assert!(buffer.iter().all(|&s| s.abs() <= 0.5 + 1e-6));
        assert!(buffer.iter().any(|&s| s.abs() > 0.1));
    }

    #[test]
    fn goes_quiet_when_the_gain_stage_stops() {
        let mut node = OscNode::sine().through(GainNode::new(1.0).stop_after(0.001));
        let mut buffer = vec![0.0; 256];
        node.render_block(&mut buffer, &ctx());

        assert!(!node.is_active());
        assert_eq!(buffer[255], 0.0);
    }

    #[test]
    fn forwards_note_off() {
        let mut node = OscNode::sine().through(GainNode::new(0.2));
        node.note_off(&ctx());
        assert!(node.processor.is_stopping());
    }
}
