//! Harmony screen - an eight-key keyboard that names what it hears

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use what_is_music::{
    content::{text, Text},
    harmony::{chord_name, diff, ChordPreset, Note, NoteSet},
    synth::{AudioCommand, Patch, VoiceKey},
};

use super::{chrome::hint_line, hit, palette::rgb, spectrum::render_spectrum, Outbox, Screen, View};

/// Home-row keys, one per note, left to right
const NOTE_KEYS: [char; 8] = ['a', 's', 'd', 'f', 'g', 'h', 'j', 'k'];
const PRESET_KEYS: [char; 4] = ['z', 'x', 'c', 'v'];

pub struct HarmonyScreen {
    selected: NoteSet,
    /// What the audio side is currently holding
    sounding: NoteSet,
    keys: Vec<(Rect, Note)>,
    presets: Vec<(Rect, ChordPreset)>,
}

impl HarmonyScreen {
    pub fn new() -> Self {
        Self {
            selected: NoteSet::default(),
            sounding: NoteSet::empty(),
            keys: Vec::new(),
            presets: Vec::new(),
        }
    }

    /// Start and stop chord voices until the audio side matches the keyboard.
    fn sync(&mut self, out: &mut Outbox) {
        let (starts, stops) = diff(&self.sounding, &self.selected);
        for note in stops {
            out.send(AudioCommand::Release(VoiceKey::Chord(note)));
        }
        for note in starts {
            out.send(AudioCommand::Hold {
                key: VoiceKey::Chord(note),
                patch: Patch::ChordNote { hz: note.frequency() },
            });
        }
        self.sounding = self.selected.clone();
    }
}

impl Screen for HarmonyScreen {
    fn enter(&mut self, out: &mut Outbox) {
        *self = Self::new();
        self.sync(out);
    }

    fn leave(&mut self, out: &mut Outbox) {
        self.selected.clear();
        self.sync(out);
    }

    fn key(&mut self, code: KeyCode, out: &mut Outbox) -> bool {
        let KeyCode::Char(c) = code else {
            if matches!(code, KeyCode::Backspace | KeyCode::Delete) {
                self.selected.clear();
                self.sync(out);
                return true;
            }
            return false;
        };
        let c = c.to_ascii_lowercase();
        if let Some(note) = NOTE_KEYS.iter().position(|&k| k == c).and_then(Note::from_index) {
            self.selected.toggle(note);
        } else if let Some(i) = PRESET_KEYS.iter().position(|&k| k == c) {
            self.selected = NoteSet::from_preset(ChordPreset::ALL[i]);
        } else {
            return false;
        }
        self.sync(out);
        true
    }

    fn mouse(&mut self, event: MouseEvent, out: &mut Outbox) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (column, row) = (event.column, event.row);
        if let Some(&(_, note)) = self.keys.iter().find(|(area, _)| hit(*area, column, row)) {
            self.selected.toggle(note);
        } else if let Some(&(_, preset)) = self.presets.iter().find(|(area, _)| hit(*area, column, row)) {
            self.selected = NoteSet::from_preset(preset);
        } else {
            return;
        }
        self.sync(out);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &View) {
        let palette = &view.palette;
        let language = view.language;

        let [name, keyboard, lower, hints] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .areas(area);

        let heading = Paragraph::new(vec![
            Line::styled(text(Text::HarmonyTagline, language), Style::default().fg(palette.muted)),
            Line::from(vec![
                Span::styled(
                    format!("{}: ", text(Text::HarmonyName, language)),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(
                    chord_name(&self.selected, language),
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                ),
            ]),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(heading, name);

        let columns = Layout::horizontal(Note::ALL.iter().map(|_| Constraint::Ratio(1, Note::ALL.len() as u32)))
            .spacing(1)
            .split(keyboard);
        self.keys.clear();
        for ((note, key), &cell) in Note::ALL.into_iter().zip(NOTE_KEYS).zip(columns.iter()) {
            let on = self.selected.contains(note);
            let (fill, ink) = if on {
                (rgb(note.color()), palette.bg)
            } else {
                (palette.surface, palette.fg)
            };
            let label = Paragraph::new(vec![
                Line::default(),
                Line::styled(note.name(), Style::default().fg(ink).add_modifier(Modifier::BOLD)),
                Line::styled(note.degree(), Style::default().fg(ink)),
                Line::styled(format!("[{}]", key.to_ascii_uppercase()), Style::default().fg(ink)),
            ])
            .alignment(Alignment::Center)
            .style(Style::default().bg(fill));
            frame.render_widget(label, cell);
            self.keys.push((cell, note));
        }

        let [spectrum_area, presets_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(30)]).areas(lower);

        match view.spectrum {
            Some(data) => render_spectrum(frame, spectrum_area, data, palette),
            None => frame.render_widget(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.border)),
                spectrum_area,
            ),
        }

        let presets_block = Block::default()
            .title(format!(" {} ", text(Text::TryCombinations, language)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border));
        let presets_inner = presets_block.inner(presets_area);
        frame.render_widget(presets_block, presets_area);

        let rows = Layout::vertical(ChordPreset::ALL.iter().map(|_| Constraint::Length(1))).split(presets_inner);
        self.presets.clear();
        for ((preset, key), &row) in ChordPreset::ALL.into_iter().zip(PRESET_KEYS).zip(rows.iter()) {
            let current = self.selected == NoteSet::from_preset(preset);
            let style = if current {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };
            let line = Line::from(vec![
                Span::styled(format!("[{}] ", key.to_ascii_uppercase()), Style::default().fg(palette.accent)),
                Span::styled(preset.label(), style),
            ]);
            frame.render_widget(Paragraph::new(line), row);
            self.presets.push((row, preset));
        }

        let hints_line = hint_line(
            &[
                ("A-K", "C4-C5"),
                ("Z-V", text(Text::TryCombinations, language)),
                ("Bksp", text(Text::Clear, language)),
            ],
            palette,
        );
        frame.render_widget(Paragraph::new(hints_line), hints);
    }
}
