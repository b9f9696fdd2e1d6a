//! Harmony: notes sounding together.
//!
//! An eight-key keyboard, C4 to C5. Every selected key holds a sine tone;
//! the screen names the chord when it recognises one.

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::Language;

/// One key of the keyboard.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Note {
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
}

impl Note {
    /// Keys left to right.
    pub const ALL: [Note; 8] = [
        Note::C4,
        Note::D4,
        Note::E4,
        Note::F4,
        Note::G4,
        Note::A4,
        Note::B4,
        Note::C5,
    ];

    pub fn frequency(self) -> f32 {
        match self {
            Note::C4 => 261.63,
            Note::D4 => 293.66,
            Note::E4 => 329.63,
            Note::F4 => 349.23,
            Note::G4 => 392.00,
            Note::A4 => 440.00,
            Note::B4 => 493.88,
            Note::C5 => 523.25,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Note::C4 => "C4",
            Note::D4 => "D4",
            Note::E4 => "E4",
            Note::F4 => "F4",
            Note::G4 => "G4",
            Note::A4 => "A4",
            Note::B4 => "B4",
            Note::C5 => "C5",
        }
    }

    /// Scale degree above C4.
    pub fn degree(self) -> &'static str {
        match self {
            Note::C4 => "Root",
            Note::D4 => "Second",
            Note::E4 => "Third",
            Note::F4 => "Fourth",
            Note::G4 => "Fifth",
            Note::A4 => "Sixth",
            Note::B4 => "Seventh",
            Note::C5 => "Octave",
        }
    }

    /// Key colour as RGB.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Note::C4 => (59, 130, 246),
            Note::D4 => (34, 197, 94),
            Note::E4 => (234, 179, 8),
            Note::F4 => (249, 115, 22),
            Note::G4 => (239, 68, 68),
            Note::A4 => (168, 85, 247),
            Note::B4 => (236, 72, 153),
            Note::C5 => (20, 184, 166),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// The quick-pick buttons beside the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordPreset {
    CMajor,
    FMajor,
    GMajor,
    FullOctave,
}

impl ChordPreset {
    pub const ALL: [ChordPreset; 4] = [
        ChordPreset::CMajor,
        ChordPreset::FMajor,
        ChordPreset::GMajor,
        ChordPreset::FullOctave,
    ];

    pub fn notes(self) -> &'static [Note] {
        match self {
            ChordPreset::CMajor => &[Note::C4, Note::E4, Note::G4],
            ChordPreset::FMajor => &[Note::F4, Note::A4, Note::C5],
            ChordPreset::GMajor => &[Note::G4, Note::B4, Note::D4],
            ChordPreset::FullOctave => &Note::ALL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChordPreset::CMajor => "C Major (C+E+G)",
            ChordPreset::FMajor => "F Major (F+A+C)",
            ChordPreset::GMajor => "G Major (G+B+D)",
            ChordPreset::FullOctave => "Full Octave Cluster",
        }
    }
}

/// The selected keys, in the order they were pressed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSet {
    notes: Vec<Note>,
}

impl NoteSet {
    pub fn empty() -> Self {
        Self { notes: Vec::new() }
    }

    pub fn from_notes(notes: &[Note]) -> Self {
        let mut set = Self::empty();
        for &note in notes {
            set.insert(note);
        }
        set
    }

    pub fn from_preset(preset: ChordPreset) -> Self {
        Self::from_notes(preset.notes())
    }

    pub fn insert(&mut self, note: Note) -> bool {
        if self.contains(note) {
            return false;
        }
        self.notes.push(note);
        true
    }

    /// Press or release a key. Returns true when the key is now selected.
    pub fn toggle(&mut self, note: Note) -> bool {
        if let Some(pos) = self.notes.iter().position(|&n| n == note) {
            self.notes.remove(pos);
            false
        } else {
            self.notes.push(note);
            true
        }
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    pub fn contains(&self, note: Note) -> bool {
        self.notes.contains(&note)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Note> + '_ {
        self.notes.iter().copied()
    }

    /// Same notes regardless of order.
    fn is_exactly(&self, notes: &[Note]) -> bool {
        self.notes.len() == notes.len() && notes.iter().all(|&n| self.contains(n))
    }
}

impl Default for NoteSet {
    /// C major, what the keyboard shows when the screen opens.
    fn default() -> Self {
        Self::from_preset(ChordPreset::CMajor)
    }
}

/// Name shown above the keyboard.
pub fn chord_name(set: &NoteSet, language: Language) -> String {
    let en = language == Language::En;
    if set.is_empty() {
        return if en { "No selection" } else { "ไม่มีการเลือก" }.to_string();
    }
    if set.is_exactly(ChordPreset::CMajor.notes()) {
        return if en { "C Major (Happy)" } else { "C เมเจอร์ (มีความสุข)" }.to_string();
    }
    if set.is_exactly(ChordPreset::FMajor.notes()) {
        return if en { "F Major" } else { "F เมเจอร์" }.to_string();
    }
    if set.is_exactly(ChordPreset::GMajor.notes()) {
        return if en { "G Major" } else { "G เมเจอร์" }.to_string();
    }
    match (set.len(), en) {
        (1, true) => "Single Note".to_string(),
        (1, false) => "โน้ตตัวเดียว".to_string(),
        (n, true) => format!("{n}-Note Cluster"),
        (n, false) => format!("กลุ่มโน้ต {n} ตัว"),
    }
}

/// Notes to start and notes to stop to move from `previous` to `next`.
pub fn diff(previous: &NoteSet, next: &NoteSet) -> (Vec<Note>, Vec<Note>) {
    let starts: Vec<Note> = next.iter().filter(|&n| !previous.contains(n)).collect();
    let stops: Vec<Note> = previous.iter().filter(|&n| !next.contains(n)).collect();
    if !starts.is_empty() || !stops.is_empty() {
        debug!("harmony: start {starts:?}, stop {stops:?}");
    }
    (starts, stops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_c_major() {
        let set = NoteSet::default();
        assert_eq!(chord_name(&set, Language::En), "C Major (Happy)");
        assert_eq!(chord_name(&set, Language::Th), "C เมเจอร์ (มีความสุข)");
    }

    #[test]
    fn triads_are_named_regardless_of_order() {
        let set = NoteSet::from_notes(&[Note::C5, Note::F4, Note::A4]);
        assert_eq!(chord_name(&set, Language::En), "F Major");
        let set = NoteSet::from_notes(&[Note::D4, Note::G4, Note::B4]);
        assert_eq!(chord_name(&set, Language::En), "G Major");
    }

    #[test]
    fn other_selections_are_counted() {
        assert_eq!(chord_name(&NoteSet::empty(), Language::En), "No selection");
        assert_eq!(
            chord_name(&NoteSet::from_notes(&[Note::A4]), Language::En),
            "Single Note"
        );
        let set = NoteSet::from_notes(&[Note::C4, Note::E4, Note::G4, Note::B4]);
        assert_eq!(chord_name(&set, Language::En), "4-Note Cluster");
        assert_eq!(
            chord_name(&NoteSet::from_preset(ChordPreset::FullOctave), Language::En),
            "8-Note Cluster"
        );
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut set = NoteSet::empty();
        assert!(set.toggle(Note::E4));
        assert!(set.contains(Note::E4));
        assert!(!set.toggle(Note::E4));
        assert!(set.is_empty());
    }

    #[test]
    fn diff_reports_changes_only() {
        let before = NoteSet::default();
        let after = NoteSet::from_preset(ChordPreset::FMajor);
        let (starts, stops) = diff(&before, &after);

        assert_eq!(starts, vec![Note::F4, Note::A4, Note::C5]);
        assert_eq!(stops, vec![Note::C4, Note::E4, Note::G4]);

        let (starts, stops) = diff(&after, &after);
        assert!(starts.is_empty() && stops.is_empty());
    }

    #[test]
    fn note_table_matches_equal_temperament() {
        for note in Note::ALL {
            let semitones = match note {
                Note::C4 => -9,
                Note::D4 => -7,
                Note::E4 => -5,
                Note::F4 => -4,
                Note::G4 => -2,
                Note::A4 => 0,
                Note::B4 => 2,
                Note::C5 => 3,
            };
            let expected = 440.0 * 2f32.powf(semitones as f32 / 12.0);
            assert!((note.frequency() - expected).abs() < 0.01, "{note:?}");
        }
    }
}
