use crate::dsp::automation::{Param, Sweep};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Gain Node
=========

Multiplies the signal passing through it by an automated gain, the
amplitude half of every voice:

  [Source] ──→ (× gain(t)) ──→ output

A gain node may also carry a stop time. Once the stop time passes the node
writes silence and reports inactive, which is how a drum hit tells the
mixer it can be dropped (the browser equivalent is `osc.stop(now + 0.5)`).

  let hit = GainNode::new(0.0)
      .with_sweep(Sweep::exponential(1.0, 0.01, 0.5))
      .stop_after(0.5);
*/

pub struct GainNode {
    gain: Param,
    sweep: Option<Sweep>,
    stop_at: Option<f32>,
    stop_after: Option<f32>,
    elapsed: f32,
}

impl GainNode {
    pub fn new(gain: f32) -> Self {
        Self {
            gain: Param::new(gain),
            sweep: None,
            stop_at: None,
            stop_after: None,
            elapsed: 0.0,
        }
    }

    pub fn with_sweep(mut self, sweep: Sweep) -> Self {
        self.gain.start_sweep(sweep);
        self.sweep = Some(sweep);
        self
    }

    /// Fall silent and inactive `seconds` after the node starts.
    pub fn stop_after(mut self, seconds: f32) -> Self {
        self.stop_after = Some(seconds);
        self.stop_at = Some(self.elapsed + seconds);
        self
    }

    /// Smoothly steer the gain towards `target`.
    pub fn fade_to(&mut self, target: f32, time_constant: f32) {
        self.gain.set_target(target, time_constant);
    }

    /// Ramp the gain linearly to `target` over `seconds`.
    pub fn ramp_to(&mut self, target: f32, seconds: f32) {
        self.gain.linear_ramp(target, seconds);
    }

    /// Fade to silence and stop `stop_in` seconds from now.
    pub fn release(&mut self, time_constant: f32, stop_in: f32) {
        self.gain.set_target(0.0, time_constant);
        self.stop_at = Some(self.elapsed + stop_in);
    }

    pub fn gain(&self) -> f32 {
        self.gain.value()
    }

    pub fn is_stopping(&self) -> bool {
        self.stop_at.is_some()
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let dt = 1.0 / ctx.sample_rate;
        for sample in out.iter_mut() {
            let stopped = self.stop_at.is_some_and(|stop| self.elapsed >= stop);
            if stopped {
                *sample = 0.0;
                continue;
            }
            *sample *= self.gain.next_value(ctx.sample_rate);
            self.elapsed += dt;
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.elapsed = 0.0;
        self.stop_at = self.stop_after;
        if let Some(sweep) = self.sweep {
            self.gain.start_sweep(sweep);
        }
    }

    fn note_off(&mut self, _ctx: &RenderCtx) {
        self.release(0.05, 0.1);
    }

    fn is_active(&self) -> bool {
        self.stop_at.map_or(true, |stop| self.elapsed < stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RenderCtx {
        RenderCtx::new(1_000.0)
    }

    #[test]
    fn scales_input() {
        let mut gain = GainNode::new(0.3);
        let mut buffer = vec![1.0; 16];
        gain.render_block(&mut buffer, &ctx());
        assert!(buffer.iter().all(|&s| (s - 0.3).abs() < 1e-6));
    }

    #[test]
    fn stops_after_its_lifetime() {
        let mut gain = GainNode::new(1.0).stop_after(0.05);
        let mut buffer = vec![1.0; 100];
        gain.render_block(&mut buffer, &ctx());

        assert!(!gain.is_active());
        assert_eq!(buffer[10], 1.0);
        assert_eq!(buffer[99], 0.0);
    }

    #[test]
    fn release_fades_then_stops() {
        let mut gain = GainNode::new(0.12);
        let mut buffer = vec![1.0; 50];
        gain.render_block(&mut buffer, &ctx());
        assert!(gain.is_active());

        gain.release(0.05, 0.1);
        let mut buffer = vec![1.0; 200];
        gain.render_block(&mut buffer, &ctx());

        assert!(buffer[60] < 0.12 * 0.5);
        assert_eq!(buffer[150], 0.0);
        assert!(!gain.is_active());
    }

    #[test]
    fn note_on_rearms_the_hit() {
        let mut gain = GainNode::new(0.0)
            .with_sweep(Sweep::exponential(1.0, 0.01, 0.05))
            .stop_after(0.05);
        let mut buffer = vec![1.0; 100];
        gain.render_block(&mut buffer, &ctx());
        assert!(!gain.is_active());

        gain.note_on(&ctx());
        assert!(gain.is_active());
        assert_eq!(gain.gain(), 1.0);
    }
}
