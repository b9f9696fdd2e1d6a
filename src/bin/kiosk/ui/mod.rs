//! TUI module for the kiosk
//!
//! One cooperative loop at ~60 fps: pull audio back from the sound card,
//! advance the active screen's timers by the measured frame time, draw,
//! then wait up to 16 ms for a key or mouse event.
//!
//! Screens never talk to the audio context. They fill an `Outbox` with
//! commands and requests, and the loop delivers them.

mod chrome;
mod dynamics;
mod harmony;
mod melody;
mod menu;
mod palette;
mod rhythm;
mod spectrum;
mod tempo;
mod waveform;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use log::{error, info, warn};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    widgets::Block,
    DefaultTerminal, Frame,
};

use what_is_music::{
    content::{self, Language, ModuleId, Text, Theme},
    synth::AudioCommand,
    Error, KioskConfig,
};

use super::audio::AudioContext;
use dynamics::DynamicsScreen;
use harmony::HarmonyScreen;
use melody::MelodyScreen;
use menu::MenuScreen;
use palette::Palette;
use rhythm::RhythmScreen;
use spectrum::SpectrumAnalyzer;
use tempo::TempoScreen;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;
/// How long an alert stays in the footer
const ALERT_DURATION: Duration = Duration::from_secs(4);

/// Something only the UI loop can do for a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Open(ModuleId),
    StartRecording,
    StopRecording,
    CancelRecording,
}

/// What a screen wants done after handling an event.
#[derive(Debug, Default)]
pub struct Outbox {
    commands: Vec<AudioCommand>,
    requests: Vec<Request>,
}

impl Outbox {
    pub fn send(&mut self, command: AudioCommand) {
        self.commands.push(command);
    }

    pub fn request(&mut self, request: Request) {
        self.requests.push(request);
    }
}

/// What produced an outbox: the visitor, or a screen's own timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Gesture,
    Timer,
}

impl Origin {
    /// Only a gesture may wake the sound card, and never just to silence
    /// something. Timer output is dropped until the device is open.
    fn may_open_audio(self, command: &AudioCommand) -> bool {
        self == Origin::Gesture
            && !matches!(
                command,
                AudioCommand::Release(_) | AudioCommand::ReleaseAll | AudioCommand::StopLoop
            )
    }
}

/// Everything a screen needs to draw itself besides its own state.
pub struct View<'a> {
    pub language: Language,
    pub palette: Palette,
    /// Most recent output samples, oldest first
    pub scope: &'a [f32],
    /// (frequency Hz, level dB) pairs, once audio is running
    pub spectrum: Option<&'a [(f64, f64)]>,
}

/// One exhibition screen (or the menu).
pub trait Screen {
    /// Start from a clean slate; called every time the visitor arrives.
    fn enter(&mut self, out: &mut Outbox);

    /// Stop every timer and sound this screen started.
    fn leave(&mut self, out: &mut Outbox);

    fn tick(&mut self, _elapsed: Duration, _out: &mut Outbox) {}

    /// Returns false when the key means nothing on this screen.
    fn key(&mut self, code: KeyCode, out: &mut Outbox) -> bool;

    fn mouse(&mut self, _event: MouseEvent, _out: &mut Outbox) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &View);
}

pub(crate) fn hit(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

struct Alert {
    text: Text,
    since: Instant,
}

/// UI application state
pub struct UiApp {
    config: KioskConfig,
    language: Language,
    theme: Theme,
    module: ModuleId,
    /// Opened on the first gesture that makes a sound
    audio: Option<AudioContext>,
    audio_failed: bool,
    /// Audio sample buffer for visualization
    scope: Vec<f32>,
    spectrum: Option<SpectrumAnalyzer>,
    /// Scratch space for microphone samples
    input_buf: Vec<f32>,
    menu: MenuScreen,
    melody: MelodyScreen,
    rhythm: RhythmScreen,
    tempo: TempoScreen,
    dynamics: DynamicsScreen,
    harmony: HarmonyScreen,
    back_button: Option<Rect>,
    alert: Option<Alert>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(config: KioskConfig) -> Self {
        Self {
            language: config.language,
            theme: config.theme,
            module: ModuleId::Menu,
            audio: None,
            audio_failed: false,
            scope: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: None,
            input_buf: Vec::new(),
            menu: MenuScreen::new(),
            melody: MelodyScreen::new(config.melody_speed),
            rhythm: RhythmScreen::new(config.rhythm_bpm),
            tempo: TempoScreen::new(config.tempo, config.metronome),
            dynamics: DynamicsScreen::new(config.volume),
            harmony: HarmonyScreen::new(),
            back_button: None,
            alert: None,
            should_quit: false,
            config,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let mut last_frame = Instant::now();

        while !self.should_quit {
            let now = Instant::now();
            let elapsed = now.duration_since(last_frame);
            last_frame = now;

            self.poll_audio();
            self.tick(elapsed);

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        let mut out = Outbox::default();
        self.screen_mut(self.module).leave(&mut out);
        self.flush(out, Origin::Gesture);
        // Closes the output and any microphone stream.
        self.audio = None;
        Ok(())
    }

    fn screen_mut(&mut self, id: ModuleId) -> &mut dyn Screen {
        match id {
            ModuleId::Menu => &mut self.menu,
            ModuleId::Melody => &mut self.melody,
            ModuleId::Rhythm => &mut self.rhythm,
            ModuleId::Tempo => &mut self.tempo,
            ModuleId::Dynamics => &mut self.dynamics,
            ModuleId::Harmony => &mut self.harmony,
        }
    }

    fn go_to(&mut self, id: ModuleId) {
        if id == self.module {
            return;
        }
        info!("screen {:?} -> {:?}", self.module, id);
        let mut out = Outbox::default();
        self.screen_mut(self.module).leave(&mut out);
        self.module = id;
        self.screen_mut(id).enter(&mut out);
        self.flush(out, Origin::Gesture);
    }

    fn ensure_audio(&mut self) -> Option<&mut AudioContext> {
        if self.audio.is_none() && !self.audio_failed {
            match AudioContext::open(self.config.master_gain) {
                Ok(audio) => {
                    self.spectrum = Some(SpectrumAnalyzer::new(VIS_BUFFER_SIZE, audio.sample_rate()));
                    self.audio = Some(audio);
                }
                Err(err) => {
                    // Keep the exhibition usable without sound.
                    error!("audio unavailable: {err:#}");
                    self.audio_failed = true;
                }
            }
        }
        self.audio.as_mut()
    }

    /// The visitor touched an exhibition screen; from now on its timers
    /// may be heard.
    fn wake_audio(&mut self) {
        if self.module != ModuleId::Menu {
            self.ensure_audio();
        }
    }

    fn send(&mut self, command: AudioCommand, origin: Origin) {
        if self.audio.is_none() && !origin.may_open_audio(&command) {
            return;
        }
        if let Some(audio) = self.ensure_audio() {
            audio.send(command);
        }
    }

    fn flush(&mut self, out: Outbox, origin: Origin) {
        for command in out.commands {
            self.send(command, origin);
        }
        for request in out.requests {
            self.handle_request(request);
        }
    }

    fn handle_request(&mut self, request: Request) {
        match request {
            Request::Open(id) => self.go_to(id),
            Request::StartRecording => {
                let opened = match self.ensure_audio() {
                    Some(audio) => audio.open_input(),
                    None => Err(Error::NoInputDevice),
                };
                match opened {
                    Ok(input_rate) => {
                        let mut out = Outbox::default();
                        self.tempo.recording_started(input_rate, &mut out);
                        self.flush(out, Origin::Gesture);
                    }
                    Err(err) => {
                        warn!("cannot record: {err}");
                        if err.is_microphone_denied() {
                            self.show_alert(Text::MicrophoneDenied);
                        }
                    }
                }
            }
            Request::StopRecording => {
                if let Some(audio) = self.audio.as_mut() {
                    self.input_buf.clear();
                    audio.drain_input(&mut self.input_buf);
                    audio.close_input();
                    self.tempo.push_input(&self.input_buf);
                    if let Err(err) = self.tempo.recording_finished(audio.sample_rate()) {
                        warn!("recording discarded: {err}");
                    }
                }
            }
            Request::CancelRecording => {
                if let Some(audio) = self.audio.as_mut() {
                    audio.close_input();
                }
            }
        }
    }

    fn show_alert(&mut self, text: Text) {
        self.alert = Some(Alert {
            text,
            since: Instant::now(),
        });
    }

    /// Poll for new audio samples from the ring buffers
    fn poll_audio(&mut self) {
        let Some(audio) = self.audio.as_mut() else {
            return;
        };

        // Append new samples and keep only the last VIS_BUFFER_SIZE
        audio.drain_scope(&mut self.scope);
        if self.scope.len() > VIS_BUFFER_SIZE {
            let excess = self.scope.len() - VIS_BUFFER_SIZE;
            self.scope.drain(0..excess);
        }
        if let Some(spectrum) = self.spectrum.as_mut() {
            spectrum.update(&self.scope);
        }

        if self.tempo.is_recording() {
            self.input_buf.clear();
            audio.drain_input(&mut self.input_buf);
            self.tempo.push_input(&self.input_buf);
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        if self
            .alert
            .as_ref()
            .is_some_and(|alert| alert.since.elapsed() >= ALERT_DURATION)
        {
            self.alert = None;
        }

        let mut out = Outbox::default();
        self.screen_mut(self.module).tick(elapsed, &mut out);
        self.flush(out, Origin::Timer);
    }

    /// Handle keyboard input; the active screen gets first refusal
    fn handle_key(&mut self, code: KeyCode) {
        let mut out = Outbox::default();
        let handled = self.screen_mut(self.module).key(code, &mut out);
        if handled {
            self.wake_audio();
        }
        self.flush(out, Origin::Gesture);
        if handled {
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc => self.go_to(ModuleId::Menu),
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.language = self.language.toggle();
                info!("language {}", self.language.code());
            }
            KeyCode::Char('t') | KeyCode::Char('T') => self.theme = self.theme.toggle(),
            KeyCode::Char('[') => {
                if let Some(previous) = self.module.previous() {
                    self.go_to(previous);
                }
            }
            KeyCode::Char(']') => {
                if let Some(next) = self.module.next() {
                    self.go_to(next);
                }
            }
            KeyCode::Char(c @ '1'..='5') => {
                let number = c as u8 - b'0';
                if let Some(module) = content::MODULES.iter().find(|m| m.number == number) {
                    self.go_to(module.id);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self
                .back_button
                .is_some_and(|back| hit(back, mouse.column, mouse.row))
        {
            self.go_to(ModuleId::Menu);
            return;
        }

        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            self.wake_audio();
        }
        let mut out = Outbox::default();
        self.screen_mut(self.module).mouse(mouse, &mut out);
        self.flush(out, Origin::Gesture);
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let palette = Palette::for_theme(self.theme);
        frame.render_widget(Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)), area);

        // Main layout: header, screen, footer
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .areas(area);

        self.back_button = chrome::render_header(frame, header, self.module, self.language, self.theme, &palette);

        let view = View {
            language: self.language,
            palette,
            scope: &self.scope,
            spectrum: self.spectrum.as_ref().map(|s| s.data()),
        };
        match self.module {
            ModuleId::Menu => self.menu.render(frame, body, &view),
            ModuleId::Melody => self.melody.render(frame, body, &view),
            ModuleId::Rhythm => self.rhythm.render(frame, body, &view),
            ModuleId::Tempo => self.tempo.render(frame, body, &view),
            ModuleId::Dynamics => self.dynamics.render(frame, body, &view),
            ModuleId::Harmony => self.harmony.render(frame, body, &view),
        }

        let alert = self.alert.as_ref().map(|alert| alert.text);
        chrome::render_footer(frame, footer, self.module, self.language, alert, &palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use what_is_music::rhythm::Percussion;

    #[test]
    fn timers_never_open_audio() {
        assert!(!Origin::Timer.may_open_audio(&AudioCommand::Click));
        assert!(!Origin::Timer.may_open_audio(&AudioCommand::Trigger(Percussion::Kick)));
    }

    #[test]
    fn gestures_open_audio_except_to_silence() {
        assert!(Origin::Gesture.may_open_audio(&AudioCommand::Click));
        assert!(!Origin::Gesture.may_open_audio(&AudioCommand::ReleaseAll));
        assert!(!Origin::Gesture.may_open_audio(&AudioCommand::StopLoop));
    }
}
