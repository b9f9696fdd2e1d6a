//! Tempo screen - metronome, Italian markings, and the voice experiment

use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use what_is_music::{
    content::{text, Text},
    synth::AudioCommand,
    tempo::{
        Metronome, RecorderState, Tempo, TempoMarking, VoiceRecorder, MAX_BPM, MAX_RECORDING_SECONDS,
        MIN_BPM,
    },
};

use super::{chrome::hint_line, Outbox, Request, Screen, View};

/// Portion of each beat the pulse stays lit
const PULSE_WIDTH: f32 = 0.2;

pub struct TempoScreen {
    metronome: Metronome,
    recorder: VoiceRecorder,
    default_tempo: Tempo,
    default_metronome: bool,
}

impl TempoScreen {
    pub fn new(default_tempo: Tempo, metronome_on: bool) -> Self {
        let mut metronome = Metronome::new(default_tempo);
        metronome.set_enabled(metronome_on);
        Self {
            metronome,
            recorder: VoiceRecorder::new(),
            default_tempo,
            default_metronome: metronome_on,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    /// The microphone is open at `input_rate`; start the take.
    pub fn recording_started(&mut self, input_rate: f32, out: &mut Outbox) {
        if self.recorder.start(input_rate) {
            out.send(AudioCommand::StopLoop);
        }
    }

    pub fn push_input(&mut self, samples: &[f32]) {
        self.recorder.push(samples);
    }

    /// The microphone is closed; keep the take resampled to `output_rate`.
    pub fn recording_finished(&mut self, output_rate: f32) -> what_is_music::Result<()> {
        self.recorder.finish(output_rate)
    }

    fn set_tempo(&mut self, tempo: Tempo, out: &mut Outbox) {
        self.metronome.set_tempo(tempo);
        if self.recorder.is_playing() {
            out.send(AudioCommand::SetLoopRate(tempo.voice_playback_rate()));
        }
    }

    fn toggle_voice(&mut self, out: &mut Outbox) {
        let was_playing = self.recorder.is_playing();
        let playing = self.recorder.toggle_playback();
        if playing && !was_playing {
            if let Some(clip) = self.recorder.clip() {
                out.send(AudioCommand::StartLoop {
                    samples: clip.to_vec(),
                    sample_rate: self.recorder.clip_rate(),
                    rate: self.metronome.tempo().voice_playback_rate(),
                });
            }
        } else if was_playing && !playing {
            out.send(AudioCommand::StopLoop);
        }
    }
}

impl Screen for TempoScreen {
    fn enter(&mut self, _out: &mut Outbox) {
        *self = Self::new(self.default_tempo, self.default_metronome);
    }

    fn leave(&mut self, out: &mut Outbox) {
        if self.recorder.is_recording() {
            self.recorder.cancel();
            out.request(Request::CancelRecording);
        }
        if self.recorder.is_playing() {
            self.recorder.stop_playback();
            out.send(AudioCommand::StopLoop);
        }
    }

    fn tick(&mut self, elapsed: Duration, out: &mut Outbox) {
        // Several beats due in one frame still make one click.
        if self.metronome.advance(elapsed) > 0 {
            out.send(AudioCommand::Click);
        }
        if self.recorder.is_recording() && self.recorder.take_seconds() >= MAX_RECORDING_SECONDS {
            out.request(Request::StopRecording);
        }
    }

    fn key(&mut self, code: KeyCode, out: &mut Outbox) -> bool {
        let tempo = self.metronome.tempo();
        match code {
            KeyCode::Up => self.set_tempo(tempo.nudge(1), out),
            KeyCode::Down => self.set_tempo(tempo.nudge(-1), out),
            KeyCode::Right => self.set_tempo(tempo.nudge(10), out),
            KeyCode::Left => self.set_tempo(tempo.nudge(-10), out),
            KeyCode::Char('z') | KeyCode::Char('Z') => self.set_tempo(TempoMarking::Largo.preset(), out),
            KeyCode::Char('x') | KeyCode::Char('X') => self.set_tempo(TempoMarking::Andante.preset(), out),
            KeyCode::Char('c') | KeyCode::Char('C') => self.set_tempo(TempoMarking::Allegro.preset(), out),
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.metronome.toggle();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.recorder.is_recording() {
                    out.request(Request::StopRecording);
                } else {
                    out.request(Request::StartRecording);
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => self.toggle_voice(out),
            _ => return false,
        }
        true
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &View) {
        let palette = &view.palette;
        let language = view.language;
        let tempo = self.metronome.tempo();
        let marking = tempo.marking();

        let [top, presets, voice, hints] = Layout::vertical([
            Constraint::Min(9),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .areas(area);
        let [readout, facts] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(top);

        // BPM, marking, pulse, and the slider
        let lit = self.metronome.beat_phase() < PULSE_WIDTH;
        let pulse = if lit { "●" } else { "○" };
        let pulse_style = if lit {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.border)
        };
        let metronome_state = if self.metronome.is_enabled() { "ON" } else { "OFF" };
        let readout_block = Block::default()
            .title(format!(" {} ", text(Text::CurrentTempo, language)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border));
        let readout_inner = readout_block.inner(readout);
        frame.render_widget(readout_block, readout);

        let [numbers, slider] =
            Layout::vertical([Constraint::Min(4), Constraint::Length(2)]).areas(readout_inner);
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{pulse} "), pulse_style),
                Span::styled(
                    format!("{} BPM", tempo.bpm()),
                    Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("{} ", text(Text::CurrentMode, language)), Style::default().fg(palette.muted)),
                Span::styled(marking.name(), Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
            ]),
            Line::styled(marking.description(language), Style::default().fg(palette.fg)),
            Line::styled(
                format!("{}: {metronome_state}", text(Text::MetronomeSound, language)),
                Style::default().fg(palette.muted),
            ),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), numbers);

        let span = (MAX_BPM - MIN_BPM) as f64;
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(palette.accent).bg(palette.surface))
            .ratio(((tempo.bpm() - MIN_BPM) as f64 / span).clamp(0.0, 1.0))
            .label(format!(
                "{} {MIN_BPM}  ·  {MAX_BPM} {}",
                text(Text::Slow, language),
                text(Text::Fast, language)
            ));
        frame.render_widget(gauge, slider);

        let facts_text = Paragraph::new(vec![
            Line::styled(
                text(Text::DidYouKnow, language),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
            Line::styled(text(Text::TempoDesc, language), Style::default().fg(palette.fg)),
            Line::default(),
            Line::styled(text(Text::ItalianTerms, language), Style::default().fg(palette.muted)),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(facts_text, facts);

        // Largo / Andante / Allegro
        let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).spacing(1).split(presets);
        for ((preset, key), &cell) in TempoMarking::ALL.into_iter().zip(["Z", "X", "C"]).zip(columns.iter()) {
            let border = if preset == marking { palette.accent } else { palette.border };
            let card = Paragraph::new(vec![
                Line::from(vec![
                    Span::styled(format!("[{key}] "), Style::default().fg(palette.accent)),
                    Span::styled(preset.name(), Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
                ]),
                Line::styled(format!("{} BPM", preset.range_label()), Style::default().fg(palette.muted)),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border)),
            );
            frame.render_widget(card, cell);
        }

        // Voice experiment
        let recorder_line = match self.recorder.state() {
            RecorderState::Recording => Line::styled(
                format!(
                    "● {}  {:.1} s / {:.0} s",
                    text(Text::StopRecord, language),
                    self.recorder.take_seconds(),
                    MAX_RECORDING_SECONDS
                ),
                Style::default().fg(palette.alert).add_modifier(Modifier::BOLD),
            ),
            RecorderState::Recorded => {
                let label = if self.recorder.is_playing() {
                    text(Text::StopVoice, language)
                } else {
                    text(Text::PlayVoice, language)
                };
                Line::from(vec![
                    Span::styled(format!("[P] {label}"), Style::default().fg(palette.accent)),
                    Span::styled(
                        format!("   x{:.2}", tempo.voice_playback_rate()),
                        Style::default().fg(palette.muted),
                    ),
                ])
            }
            RecorderState::Idle => Line::styled(
                format!("[R] {}", text(Text::RecordVoice, language)),
                Style::default().fg(palette.accent),
            ),
        };
        let voice_panel = Paragraph::new(vec![
            Line::styled(text(Text::VoiceHint, language), Style::default().fg(palette.muted)),
            recorder_line,
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", text(Text::VoiceExperiment, language)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(voice_panel, voice);

        let record_label = if self.recorder.is_recording() {
            text(Text::StopRecord, language)
        } else {
            text(Text::RecordVoice, language)
        };
        let hints_line = hint_line(
            &[
                ("↑↓", "±1"),
                ("←→", "±10"),
                ("M", text(Text::MetronomeSound, language)),
                ("R", record_label),
                ("P", text(Text::PlayVoice, language)),
            ],
            palette,
        );
        frame.render_widget(Paragraph::new(hints_line), hints);
    }
}
