//! Rhythm: a four-step drum loop.
//!
//! A 4 × 4 grid of switches. Each row is a drum, each column a beat. A clock
//! walks a cursor across the columns and every switched-on cell in the new
//! column is played.
//!
//! ```text
//!            step  0   1   2   3
//!   kick          [x] [ ] [x] [ ]
//!   snare         [ ] [x] [ ] [x]
//!   tom           [ ] [ ] [ ] [ ]
//!   hi-hat        [x] [x] [x] [x]
//!                      ^ cursor
//! ```

pub mod clock;

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::Language;

pub use clock::{ClockState, StepClock, Tick, DEFAULT_BPM, MAX_BPM, MIN_BPM};

pub const STEPS: usize = 4;
pub const ROWS: usize = 4;

/// The four drum sounds, one per grid row.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Percussion {
    Kick,
    Snare,
    Tom,
    HiHat,
}

impl Percussion {
    /// Every voice in row order.
    pub const ALL: [Percussion; ROWS] = [
        Percussion::Kick,
        Percussion::Snare,
        Percussion::Tom,
        Percussion::HiHat,
    ];

    pub fn row(self) -> usize {
        self as usize
    }

    pub fn from_row(row: usize) -> Option<Self> {
        Self::ALL.get(row).copied()
    }

    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Percussion::Kick, Language::En) => "Kick",
            (Percussion::Snare, Language::En) => "Snare",
            (Percussion::Tom, Language::En) => "Tom",
            (Percussion::HiHat, Language::En) => "Hi-hat",
            (Percussion::Kick, Language::Th) => "กลองใหญ่",
            (Percussion::Snare, Language::Th) => "กลองสแนร์",
            (Percussion::Tom, Language::Th) => "กลองทอม",
            (Percussion::HiHat, Language::Th) => "ไฮแฮท",
        }
    }
}

/// The on/off pattern. Always 4 × 4; only `toggle` and `clear` change it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[bool; STEPS]; ROWS],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(cells: [[bool; STEPS]; ROWS]) -> Self {
        Self { cells }
    }

    /// Flip one cell. Returns the new state of that cell.
    ///
    /// Out-of-range steps are ignored and report `false`.
    pub fn toggle(&mut self, voice: Percussion, step: usize) -> bool {
        match self.cells[voice.row()].get_mut(step) {
            Some(cell) => {
                *cell = !*cell;
                *cell
            }
            None => false,
        }
    }

    pub fn is_active(&self, voice: Percussion, step: usize) -> bool {
        self.cells[voice.row()].get(step).copied().unwrap_or(false)
    }

    pub fn row(&self, voice: Percussion) -> [bool; STEPS] {
        self.cells[voice.row()]
    }

    /// Every voice switched on at `step`.
    pub fn column(&self, step: usize) -> VoiceSet {
        Percussion::ALL
            .into_iter()
            .filter(|&voice| self.is_active(voice, step))
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells = [[false; STEPS]; ROWS];
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell)
    }
}

/// A small set of percussion voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct VoiceSet(u8);

impl VoiceSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, voice: Percussion) {
        self.0 |= 1 << voice.row();
    }

    pub fn contains(&self, voice: Percussion) -> bool {
        self.0 & (1 << voice.row()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Voices in row order.
    pub fn iter(&self) -> impl Iterator<Item = Percussion> + '_ {
        Percussion::ALL
            .into_iter()
            .filter(move |&voice| self.contains(voice))
    }
}

impl FromIterator<Percussion> for VoiceSet {
    fn from_iter<I: IntoIterator<Item = Percussion>>(iter: I) -> Self {
        let mut set = VoiceSet::empty();
        for voice in iter {
            set.insert(voice);
        }
        set
    }
}

/// Advance the cursor one step and report which voices sound there.
///
/// Pure: the same grid and cursor always give the same answer. The returned
/// set is a copy, so editing the grid afterwards cannot change it.
pub fn tick(grid: &Grid, cursor: usize) -> (usize, VoiceSet) {
    let next = (cursor % STEPS + 1) % STEPS;
    (next, grid.column(next))
}

/// Time between steps: one beat at `bpm`.
///
/// Zero is treated as 1 bpm so the period stays finite.
pub fn tick_period(bpm: u32) -> Duration {
    Duration::from_secs_f64(60.0 / bpm.max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_reports() {
        let mut grid = Grid::new();
        assert!(grid.toggle(Percussion::Tom, 2));
        assert!(grid.is_active(Percussion::Tom, 2));
        assert!(!grid.toggle(Percussion::Tom, 2));
        assert!(grid.is_empty());
    }

    #[test]
    fn out_of_range_step_is_ignored() {
        let mut grid = Grid::new();
        assert!(!grid.toggle(Percussion::Kick, 9));
        assert!(!grid.is_active(Percussion::Kick, 9));
        assert!(grid.is_empty());
    }

    #[test]
    fn clear_empties_every_row() {
        let mut grid = Grid::from_rows([[true; STEPS]; ROWS]);
        grid.clear();
        assert!(grid.is_empty());
    }

    #[test]
    fn voice_set_iterates_in_row_order() {
        let set: VoiceSet = [Percussion::HiHat, Percussion::Kick].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Percussion::Kick, Percussion::HiHat]
        );
        assert!(!set.contains(Percussion::Snare));
    }

    #[test]
    fn tick_reads_the_next_column() {
        let mut grid = Grid::new();
        grid.toggle(Percussion::Kick, 1);
        grid.toggle(Percussion::HiHat, 1);
        grid.toggle(Percussion::Snare, 0);

        let (next, voices) = tick(&grid, 0);
        assert_eq!(next, 1);
        assert_eq!(voices.len(), 2);
        assert!(voices.contains(Percussion::Kick));
        assert!(voices.contains(Percussion::HiHat));
    }

    #[test]
    fn tick_wraps_any_cursor() {
        let mut grid = Grid::new();
        grid.toggle(Percussion::Snare, 0);

        let (next, voices) = tick(&grid, usize::MAX);
        assert_eq!(next, 0);
        assert!(voices.contains(Percussion::Snare));
        assert_eq!(tick(&grid, 3), tick(&grid, usize::MAX));
    }

    #[test]
    fn period_is_one_beat() {
        assert_eq!(tick_period(120), Duration::from_millis(500));
        assert_eq!(tick_period(60), Duration::from_secs(1));
        assert_eq!(tick_period(0), Duration::from_secs(60));
    }

    #[test]
    fn rows_round_trip() {
        for voice in Percussion::ALL {
            assert_eq!(Percussion::from_row(voice.row()), Some(voice));
        }
        assert_eq!(Percussion::from_row(4), None);
    }
}
