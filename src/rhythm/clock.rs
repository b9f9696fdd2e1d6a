use std::time::Duration;

use log::{debug, info};

use crate::rhythm::{tick, tick_period, Grid, VoiceSet};

/*
Step Clock
==========

Drives the sequencer cursor from measured wall-clock time. The UI loop calls
`advance` every frame with how long the frame took; the clock banks that time
and emits a tick once a whole period has been banked.

  elapsed ─▶ [ bank ] ── ≥ period? ──▶ tick(grid, cursor) ──▶ Tick
                 ▲            │
                 └── mod period ─┘

A long frame (a suspended terminal, a slow redraw) never produces a burst:
at most one tick comes out per frame and the missed periods are dropped,
keeping only the fraction of a period left over.

  Stopped ──start──▶ Running ──stop──▶ Stopped
     ▲                  │
     └──── toggle ──────┘

Starting resumes from wherever the cursor was left, the first tick arriving
one full period later. Stopping drops the banked time. Changing the tempo
restarts the period measurement, as if the clock were re-armed.
*/

pub const MIN_BPM: u32 = 60;
pub const MAX_BPM: u32 = 200;
pub const DEFAULT_BPM: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
}

/// One step of the loop: where the cursor landed and what to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub step: usize,
    pub voices: VoiceSet,
}

#[derive(Debug, Clone)]
pub struct StepClock {
    state: ClockState,
    cursor: usize,
    bpm: u32,
    banked: Duration,
}

impl StepClock {
    pub fn new(bpm: u32) -> Self {
        Self {
            state: ClockState::Stopped,
            cursor: 0,
            bpm: bpm.clamp(MIN_BPM, MAX_BPM),
            banked: Duration::ZERO,
        }
    }

    pub fn start(&mut self) {
        if self.state == ClockState::Stopped {
            info!("step clock started at {} bpm from step {}", self.bpm, self.cursor);
            self.state = ClockState::Running;
            self.banked = Duration::ZERO;
        }
    }

    pub fn stop(&mut self) {
        if self.state == ClockState::Running {
            info!("step clock stopped at step {}", self.cursor);
            self.state = ClockState::Stopped;
            self.banked = Duration::ZERO;
        }
    }

    /// Start or stop. Returns true when now running.
    pub fn toggle(&mut self) -> bool {
        match self.state {
            ClockState::Stopped => self.start(),
            ClockState::Running => self.stop(),
        }
        self.is_running()
    }

    /// Change the tempo, clamped to the rhythm screen's range.
    pub fn set_tempo(&mut self, bpm: u32) {
        let bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        if bpm != self.bpm {
            debug!("step clock tempo {} -> {} bpm", self.bpm, bpm);
            self.bpm = bpm;
            self.banked = Duration::ZERO;
        }
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn period(&self) -> Duration {
        tick_period(self.bpm)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Bank `elapsed` and return the tick that came due, if any.
    ///
    /// The tick reads `grid` as it is right now; the returned set is a copy
    /// and does not follow later edits.
    pub fn advance(&mut self, elapsed: Duration, grid: &Grid) -> Option<Tick> {
        if !self.is_running() {
            return None;
        }

        self.banked += elapsed;
        let period = self.period();
        if self.banked < period {
            return None;
        }

        let missed = self.banked.as_nanos() / period.as_nanos();
        if missed > 1 {
            debug!("step clock skipped {} periods", missed - 1);
        }
        self.banked = Duration::from_nanos((self.banked.as_nanos() % period.as_nanos()) as u64);

        let (step, voices) = tick(grid, self.cursor);
        self.cursor = step;
        Some(Tick { step, voices })
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(DEFAULT_BPM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rhythm::Percussion;

    #[test]
    fn stopped_clock_never_ticks() {
        let mut clock = StepClock::default();
        assert!(clock.advance(Duration::from_secs(10), &Grid::new()).is_none());
        assert_eq!(clock.cursor(), 0);
    }

    #[test]
    fn one_tick_per_period() {
        let mut clock = StepClock::new(120);
        clock.start();

        assert!(clock.advance(Duration::from_millis(499), &Grid::new()).is_none());
        let tick = clock.advance(Duration::from_millis(1), &Grid::new());
        assert_eq!(tick.map(|t| t.step), Some(1));

        let steps: Vec<usize> = (0..3)
            .filter_map(|_| clock.advance(Duration::from_millis(500), &Grid::new()))
            .map(|t| t.step)
            .collect();
        assert_eq!(steps, vec![2, 3, 0]);
    }

    #[test]
    fn long_frame_yields_a_single_tick() {
        let grid = Grid::from_rows([[true; 4], [false; 4], [false; 4], [false; 4]]);
        let mut clock = StepClock::new(120);
        clock.start();

        let tick = clock.advance(Duration::from_secs(10), &grid);
        assert_eq!(tick.map(|t| t.step), Some(1));
        assert_eq!(clock.cursor(), 1);

        // Nothing left over from the backlog.
        assert!(clock.advance(Duration::from_millis(16), &grid).is_none());
    }

    #[test]
    fn long_frame_keeps_the_fraction_of_a_period() {
        let mut clock = StepClock::new(120);
        clock.start();
        assert!(clock.advance(Duration::from_millis(1_300), &Grid::new()).is_some());
        assert!(clock.advance(Duration::from_millis(199), &Grid::new()).is_none());
        assert!(clock.advance(Duration::from_millis(1), &Grid::new()).is_some());
    }

    #[test]
    fn stop_keeps_the_cursor_and_start_resumes() {
        let mut clock = StepClock::new(120);
        clock.start();
        clock.advance(Duration::from_millis(500), &Grid::new());
        clock.advance(Duration::from_millis(500), &Grid::new());
        assert_eq!(clock.cursor(), 2);

        assert!(!clock.toggle());
        assert_eq!(clock.cursor(), 2);
        assert!(clock.advance(Duration::from_secs(5), &Grid::new()).is_none());

        assert!(clock.toggle());
        let tick = clock.advance(Duration::from_millis(500), &Grid::new());
        assert_eq!(tick.map(|t| t.step), Some(3));
    }

    #[test]
    fn stop_drops_banked_time() {
        let mut clock = StepClock::new(120);
        clock.start();
        clock.advance(Duration::from_millis(400), &Grid::new());
        clock.stop();
        clock.start();
        assert!(clock.advance(Duration::from_millis(400), &Grid::new()).is_none());
    }

    #[test]
    fn tempo_change_restarts_the_period() {
        let mut clock = StepClock::new(120);
        clock.start();
        clock.advance(Duration::from_millis(400), &Grid::new());
        clock.set_tempo(60);
        assert!(clock.advance(Duration::from_millis(900), &Grid::new()).is_none());
        assert!(clock.advance(Duration::from_millis(100), &Grid::new()).is_some());
    }

    #[test]
    fn tempo_is_clamped_to_screen_range() {
        let mut clock = StepClock::new(10);
        assert_eq!(clock.bpm(), MIN_BPM);
        clock.set_tempo(500);
        assert_eq!(clock.bpm(), MAX_BPM);
    }

    #[test]
    fn ticks_carry_the_voices_at_the_new_step() {
        let mut grid = Grid::new();
        grid.toggle(Percussion::Snare, 1);
        let mut clock = StepClock::new(120);
        clock.start();

        let tick = clock.advance(Duration::from_millis(500), &grid);
        grid.toggle(Percussion::Snare, 1);

        assert!(tick.is_some_and(|t| t.voices.contains(Percussion::Snare)));
    }
}
