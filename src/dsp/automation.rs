use crate::MIN_TIME;

/*
Parameter Automation
====================

Every sound in the kiosk is shaped by moving a number over time: a kick's
pitch falls from 150 Hz, a chord note fades in over 100 ms, the melody's
frequency chases the playhead. `Param` is that number.

Vocabulary
----------

  value          The current output, read once per sample.

  motion         What the value is doing right now: holding still, ramping
                 towards a target over a fixed time, or approaching a target
                 with a time constant.

  time constant  For target approach: the time to cover ~63% of the remaining
                 distance. Nothing ever "arrives"; it just gets very close.


The Motions
-----------

  Hold         value stays put

  Linear       value(t) = start + (target - start) · t / T

  Exponential  value(t) = start · (target / start) ^ (t / T)

               Equal ratios in equal time. This is how pitch and loudness
               are perceived, which is why every drum here falls this way.
               Both ends must be non-zero and of the same sign, so they are
               clamped to MIN_EXP_MAGNITUDE.

  Target       value += (target - value) · (1 - e^(-1 / (τ · sample_rate)))

               A one-pole smoother. Used for every live control (slider,
               playhead pitch) so moving a control never clicks.

After a Linear or Exponential motion completes, the param holds its target.


Sweeps
------

A `Sweep` is a reusable "start here, go there" description. Voices store
their sweep so a retrigger (`note_on`) replays exactly the same shape.
*/

/// Smallest magnitude an exponential ramp may touch.
pub const MIN_EXP_MAGNITUDE: f32 = 1.0e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Hold,
    Linear {
        start: f32,
        target: f32,
        duration: f32,
        elapsed: f32,
    },
    Exponential {
        start: f32,
        target: f32,
        duration: f32,
        elapsed: f32,
    },
    Target {
        target: f32,
        time_constant: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    value: f32,
    motion: Motion,
}

impl Param {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            motion: Motion::Hold,
        }
    }

    /// Jump to `value` immediately and cancel any motion.
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
        self.motion = Motion::Hold;
    }

    /// Approach `target` with the given time constant (seconds).
    pub fn set_target(&mut self, target: f32, time_constant: f32) {
        self.motion = Motion::Target {
            target,
            time_constant: time_constant.max(MIN_TIME),
        };
    }

    /// Ramp linearly from the current value to `target` over `seconds`.
    pub fn linear_ramp(&mut self, target: f32, seconds: f32) {
        self.motion = Motion::Linear {
            start: self.value,
            target,
            duration: seconds.max(MIN_TIME),
            elapsed: 0.0,
        };
    }

    /// Ramp exponentially from the current value to `target` over `seconds`.
    pub fn exponential_ramp(&mut self, target: f32, seconds: f32) {
        let start = clamp_magnitude(self.value);
        self.value = start;
        self.motion = Motion::Exponential {
            start,
            target: clamp_magnitude(target).copysign(start),
            duration: seconds.max(MIN_TIME),
            elapsed: 0.0,
        };
    }

    /// Restart the param from the beginning of `sweep`.
    pub fn start_sweep(&mut self, sweep: Sweep) {
        self.set_value(sweep.from);
        match sweep.curve {
            Curve::Linear => self.linear_ramp(sweep.to, sweep.seconds),
            Curve::Exponential => self.exponential_ramp(sweep.to, sweep.seconds),
        }
    }

    /// Current value without advancing time.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Where the param is heading (its own value when holding).
    pub fn destination(&self) -> f32 {
        match self.motion {
            Motion::Hold => self.value,
            Motion::Linear { target, .. }
            | Motion::Exponential { target, .. }
            | Motion::Target { target, .. } => target,
        }
    }

    /// True once a ramp has finished and the value holds still.
    pub fn is_settled(&self) -> bool {
        matches!(self.motion, Motion::Hold)
    }

    /// Return the value for this sample, then advance one sample.
    #[inline]
    pub fn next_value(&mut self, sample_rate: f32) -> f32 {
        let current = self.value;
        let dt = 1.0 / sample_rate;

        match &mut self.motion {
            Motion::Hold => {}
            Motion::Linear {
                start,
                target,
                duration,
                elapsed,
            } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    self.value = *target;
                    self.motion = Motion::Hold;
                } else {
                    self.value = *start + (*target - *start) * (*elapsed / *duration);
                }
            }
            Motion::Exponential {
                start,
                target,
                duration,
                elapsed,
            } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    self.value = *target;
                    self.motion = Motion::Hold;
                } else {
                    self.value = *start * (*target / *start).powf(*elapsed / *duration);
                }
            }
            Motion::Target {
                target,
                time_constant,
            } => {
                let coefficient = 1.0 - (-dt / *time_constant).exp();
                self.value += (*target - self.value) * coefficient;
            }
        }

        current
    }

    /// Fill `buffer` with consecutive values.
    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_value(sample_rate);
        }
    }
}

impl Default for Param {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[inline]
fn clamp_magnitude(value: f32) -> f32 {
    if value.abs() < MIN_EXP_MAGNITUDE {
        MIN_EXP_MAGNITUDE.copysign(if value == 0.0 { 1.0 } else { value })
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    Exponential,
}

/// A one-shot movement from `from` to `to` over `seconds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub from: f32,
    pub to: f32,
    pub seconds: f32,
    pub curve: Curve,
}

impl Sweep {
    pub fn linear(from: f32, to: f32, seconds: f32) -> Self {
        Self {
            from,
            to,
            seconds,
            curve: Curve::Linear,
        }
    }

    pub fn exponential(from: f32, to: f32, seconds: f32) -> Self {
        Self {
            from,
            to,
            seconds,
            curve: Curve::Exponential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn advance(param: &mut Param, samples: usize) {
        for _ in 0..samples {
            param.next_value(SAMPLE_RATE);
        }
    }

    #[test]
    fn linear_ramp_reaches_target_and_holds() {
        let mut param = Param::new(0.0);
        param.linear_ramp(0.12, 0.1);

        advance(&mut param, 50);
        assert!((param.value() - 0.06).abs() < 0.002, "halfway should be ~0.06");

        advance(&mut param, 60);
        assert_eq!(param.value(), 0.12);
        assert!(param.is_settled());
    }

    #[test]
    fn exponential_ramp_halves_ratio_at_midpoint() {
        let mut param = Param::new(150.0);
        param.exponential_ramp(0.01, 0.5);

        advance(&mut param, 250);
        let expected = 150.0 * (0.01f32 / 150.0).powf(0.5);
        assert!(
            (param.value() - expected).abs() / expected < 0.01,
            "expected ~{expected}, got {}",
            param.value()
        );

        advance(&mut param, 300);
        assert!((param.value() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn exponential_ramp_from_zero_does_not_produce_nan() {
        let mut param = Param::new(0.0);
        param.exponential_ramp(1.0, 0.01);
        let mut buffer = vec![0.0; 32];
        param.render(&mut buffer, SAMPLE_RATE);
        assert!(buffer.iter().all(|v| v.is_finite()));
        assert_eq!(param.value(), 1.0);
    }

    #[test]
    fn target_approach_covers_most_distance_in_one_time_constant() {
        let mut param = Param::new(0.0);
        param.set_target(1.0, 0.05);

        advance(&mut param, 50);
        assert!((param.value() - 0.632).abs() < 0.01, "got {}", param.value());
        assert_eq!(param.destination(), 1.0);
        assert!(!param.is_settled());
    }

    #[test]
    fn next_value_returns_value_before_advancing() {
        let mut param = Param::new(1.0);
        param.linear_ramp(0.0, 0.01);
        assert_eq!(param.next_value(SAMPLE_RATE), 1.0);
        assert!(param.value() < 1.0);
    }

    #[test]
    fn sweep_restarts_from_its_origin() {
        let sweep = Sweep::exponential(200.0, 50.0, 0.2);
        let mut param = Param::new(0.0);

        param.start_sweep(sweep);
        advance(&mut param, 300);
        assert!((param.value() - 50.0).abs() < 1e-3);

        param.start_sweep(sweep);
        assert_eq!(param.value(), 200.0);
    }
}
