use std::time::Duration;

/// Phase advanced per second at speed 1.0 (0.005 every 16 ms frame).
pub const PHASE_PER_SECOND: f32 = 0.005 / 0.016;

pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 3.0;
/// Speed slider granularity.
pub const SPEED_STEP: f32 = 0.1;

/// Playhead position along a stroke.
///
/// The phase climbs from 0 to 1 and sits at 1 for exactly one frame, so the
/// last note of the curve is heard, before the next advance wraps it to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackCursor {
    phase: f32,
    speed: f32,
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            speed: 1.0,
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            1.0
        };
    }

    /// Nudge the speed by whole slider steps.
    pub fn step_speed(&mut self, steps: i32) {
        let next = self.speed + steps as f32 * SPEED_STEP;
        // Snap to the slider grid so repeated steps don't drift
        self.set_speed((next / SPEED_STEP).round() * SPEED_STEP);
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Move the playhead forward by `elapsed` wall-clock time.
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        if self.phase >= 1.0 {
            self.phase = 0.0;
        } else {
            let step = PHASE_PER_SECOND * self.speed * elapsed.as_secs_f32();
            self.phase = (self.phase + step).min(1.0);
        }
        self.phase
    }
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::new()
    }
}
