//! Rhythm screen - a 4 x 4 step sequencer

use std::time::Duration;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use what_is_music::{
    content::{text, Text},
    rhythm::{Grid, Percussion, StepClock, ROWS, STEPS},
    synth::AudioCommand,
};

use super::{chrome::hint_line, hit, palette::rgb, waveform::render_waveform, Outbox, Screen, View};

const TEMPO_STEP: u32 = 5;

fn row_color(voice: Percussion) -> Color {
    rgb(match voice {
        Percussion::Kick => (0x13, 0xc8, 0xec),
        Percussion::Snare => (0x10, 0xb9, 0x81),
        Percussion::Tom => (0xf5, 0x9e, 0x0b),
        Percussion::HiHat => (0xa8, 0x55, 0xf7),
    })
}

pub struct RhythmScreen {
    grid: Grid,
    clock: StepClock,
    default_bpm: u32,
    /// Keyboard selection: (row, step)
    selected: (usize, usize),
    cells: Vec<(Rect, Percussion, usize)>,
}

impl RhythmScreen {
    pub fn new(default_bpm: u32) -> Self {
        Self {
            grid: Grid::new(),
            clock: StepClock::new(default_bpm),
            default_bpm,
            selected: (0, 0),
            cells: Vec::new(),
        }
    }

    /// Flip a cell; switching one on previews its sound.
    fn toggle(&mut self, voice: Percussion, step: usize, out: &mut Outbox) {
        if self.grid.toggle(voice, step) {
            out.send(AudioCommand::Trigger(voice));
        }
    }
}

impl Screen for RhythmScreen {
    fn enter(&mut self, _out: &mut Outbox) {
        *self = Self::new(self.default_bpm);
    }

    fn leave(&mut self, _out: &mut Outbox) {
        // Hits already fired finish on their own.
        self.clock.stop();
    }

    fn tick(&mut self, elapsed: Duration, out: &mut Outbox) {
        if let Some(tick) = self.clock.advance(elapsed, &self.grid) {
            for voice in tick.voices.iter() {
                out.send(AudioCommand::Trigger(voice));
            }
        }
    }

    fn key(&mut self, code: KeyCode, out: &mut Outbox) -> bool {
        let (row, step) = self.selected;
        match code {
            KeyCode::Char(' ') => {
                self.clock.toggle();
            }
            KeyCode::Enter => {
                if let Some(voice) = Percussion::from_row(row) {
                    self.toggle(voice, step, out);
                }
            }
            KeyCode::Up => self.selected.0 = (row + ROWS - 1) % ROWS,
            KeyCode::Down => self.selected.0 = (row + 1) % ROWS,
            KeyCode::Left => self.selected.1 = (step + STEPS - 1) % STEPS,
            KeyCode::Right => self.selected.1 = (step + 1) % STEPS,
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.clock.set_tempo(self.clock.bpm() + TEMPO_STEP);
            }
            KeyCode::Char('-') => {
                self.clock.set_tempo(self.clock.bpm().saturating_sub(TEMPO_STEP));
            }
            KeyCode::Char('c') | KeyCode::Char('C') => self.grid.clear(),
            _ => return false,
        }
        true
    }

    fn mouse(&mut self, event: MouseEvent, out: &mut Outbox) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let cell = self
            .cells
            .iter()
            .find(|(area, _, _)| hit(*area, event.column, event.row))
            .map(|&(_, voice, step)| (voice, step));
        if let Some((voice, step)) = cell {
            self.selected = (voice.row(), step);
            self.toggle(voice, step, out);
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &View) {
        let palette = &view.palette;
        let language = view.language;
        let [status, board, scope, hints] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(ROWS as u16 * 3 + 1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .areas(area);

        let state = if self.clock.is_running() {
            text(Text::Pause, language)
        } else {
            text(Text::Play, language)
        };
        let status_text = vec![
            Line::styled(text(Text::RhythmTagline, language), Style::default().fg(palette.muted)),
            Line::from(vec![
                Span::styled(
                    format!(" {} BPM ", self.clock.bpm()),
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  [Space] {state}"), Style::default().fg(palette.fg)),
            ]),
        ];
        frame.render_widget(Paragraph::new(status_text), status);

        // Step numbers on top, one row per voice below
        let rows = Layout::vertical(
            std::iter::once(Constraint::Length(1)).chain((0..ROWS).map(|_| Constraint::Length(3))),
        )
        .split(board);
        let columns = |row: Rect| {
            Layout::horizontal(
                std::iter::once(Constraint::Length(12))
                    .chain((0..STEPS).map(|_| Constraint::Ratio(1, STEPS as u32))),
            )
            .spacing(1)
            .split(row)
        };

        let playing_step = self.clock.is_running().then(|| self.clock.cursor());
        let header = columns(rows[0]);
        for step in 0..STEPS {
            let style = if playing_step == Some(step) {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.muted)
            };
            frame.render_widget(
                Paragraph::new(format!("{}", step + 1)).alignment(Alignment::Center).style(style),
                header[step + 1],
            );
        }

        self.cells.clear();
        for voice in Percussion::ALL {
            let cols = columns(rows[voice.row() + 1]);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::default(),
                    Line::styled(voice.label(language), Style::default().fg(row_color(voice))),
                ]),
                cols[0],
            );

            for step in 0..STEPS {
                let cell = cols[step + 1];
                let active = self.grid.is_active(voice, step);
                let on_beat = playing_step == Some(step);
                let fill = match (active, on_beat) {
                    (true, _) => row_color(voice),
                    (false, true) => palette.border,
                    (false, false) => palette.surface,
                };
                let mut block = Block::default().style(Style::default().bg(fill));
                if self.selected == (voice.row(), step) {
                    block = block
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(palette.fg));
                }
                frame.render_widget(block, cell);
                self.cells.push((cell, voice, step));
            }
        }

        render_waveform(frame, scope, view.scope, text(Text::VisualImpact, language), palette);

        let hints_line = hint_line(
            &[
                ("click/Enter", "on/off"),
                ("←↑↓→", "select"),
                ("+/-", "BPM"),
                ("Space", text(Text::Play, language)),
                ("C", text(Text::Clear, language)),
            ],
            palette,
        );
        frame.render_widget(Paragraph::new(hints_line), hints);
    }
}
