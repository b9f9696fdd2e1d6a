//! Melody screen - draw a line, hear it as pitch

use std::time::Duration;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};

use what_is_music::{
    content::{text, Text},
    melody::{
        sketch::{to_canvas, Sketch, Viewport, PLAYING_GAIN},
        stroke::{y_to_frequency, CANVAS_HEIGHT, CANVAS_WIDTH},
    },
    synth::{AudioCommand, Patch, VoiceKey},
};

use super::{chrome::hint_line, palette::rgb, waveform::render_waveform, Outbox, Screen, View};

/// Heights of the guide lines, in drawing coordinates
const GUIDE_ROWS: [f32; 3] = [50.0, 200.0, 350.0];
const ACCENT: (u8, u8, u8) = (0x13, 0xc8, 0xec);

pub struct MelodyScreen {
    sketch: Sketch,
    default_speed: f32,
    /// The melody voice exists on the audio side
    voice_held: bool,
    /// The voice's gain is up
    sounding: bool,
    show_guides: bool,
    /// Terminal cells covered by the drawing surface
    canvas: Option<Viewport>,
}

impl MelodyScreen {
    pub fn new(default_speed: f32) -> Self {
        let mut sketch = Sketch::new();
        sketch.set_speed(default_speed);
        Self {
            sketch,
            default_speed,
            voice_held: false,
            sounding: false,
            show_guides: true,
            canvas: None,
        }
    }

    /// Bring the voice's gain in line with the play state.
    fn sync_gain(&mut self, out: &mut Outbox) {
        let playing = self.sketch.is_playing();
        if !self.voice_held || playing == self.sounding {
            return;
        }
        self.sounding = playing;
        let gain = if playing { PLAYING_GAIN } else { 0.0 };
        out.send(AudioCommand::SetGain {
            key: VoiceKey::Melody,
            gain,
        });
    }
}

impl Screen for MelodyScreen {
    fn enter(&mut self, _out: &mut Outbox) {
        *self = Self::new(self.default_speed);
    }

    fn leave(&mut self, out: &mut Outbox) {
        self.sketch.clear();
        if self.voice_held {
            out.send(AudioCommand::Release(VoiceKey::Melody));
        }
        self.voice_held = false;
        self.sounding = false;
    }

    fn tick(&mut self, elapsed: Duration, out: &mut Outbox) {
        if let Some(frame) = self.sketch.advance(elapsed) {
            if self.voice_held {
                out.send(AudioCommand::SetFrequency {
                    key: VoiceKey::Melody,
                    hz: frame.frequency,
                });
            } else {
                out.send(AudioCommand::Hold {
                    key: VoiceKey::Melody,
                    patch: Patch::Tone { hz: frame.frequency },
                });
                self.voice_held = true;
                self.sounding = false;
            }
        }
        self.sync_gain(out);
    }

    fn key(&mut self, code: KeyCode, out: &mut Outbox) -> bool {
        match code {
            KeyCode::Char(' ') => {
                self.sketch.toggle_playback();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => self.sketch.clear(),
            KeyCode::Char('g') | KeyCode::Char('G') => self.show_guides = !self.show_guides,
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => self.sketch.step_speed(1),
            KeyCode::Down | KeyCode::Char('-') => self.sketch.step_speed(-1),
            _ => return false,
        }
        self.sync_gain(out);
        true
    }

    fn mouse(&mut self, event: MouseEvent, out: &mut Outbox) {
        let Some(canvas) = self.canvas else {
            return;
        };
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if canvas.contains(event.column, event.row) => {
                self.sketch.begin();
                self.sketch.extend(to_canvas(event.column, event.row, canvas));
            }
            MouseEventKind::Drag(MouseButton::Left) if self.sketch.is_drawing() => {
                self.sketch.extend(to_canvas(event.column, event.row, canvas));
            }
            MouseEventKind::Up(MouseButton::Left) if self.sketch.is_drawing() => {
                self.sketch.extend(to_canvas(event.column, event.row, canvas));
                self.sketch.end();
            }
            _ => return,
        }
        self.sync_gain(out);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &View) {
        let palette = &view.palette;
        let language = view.language;
        let [status, drawing, scope, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .areas(area);

        // Status line: play state, speed, current pitch
        let state = if self.sketch.is_playing() {
            text(Text::Play, language)
        } else {
            text(Text::Pause, language)
        };
        let pitch = self
            .sketch
            .playhead()
            .map(|_| format!("{:.0} Hz", self.sketch.stroke().sample_pitch(self.sketch.phase())))
            .unwrap_or_else(|| "-".into());
        let status_line = Line::from(vec![
            Span::styled(
                format!(" {} ", text(Text::DrawMelody, language)),
                Style::default().fg(rgb(ACCENT)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {state}"), Style::default().fg(palette.fg)),
            Span::styled(
                format!(
                    "  {}: {:.1}x",
                    text(Text::PlaybackSpeed, language),
                    self.sketch.speed()
                ),
                Style::default().fg(palette.muted),
            ),
            Span::styled(format!("  {pitch}"), Style::default().fg(palette.accent)),
        ]);
        frame.render_widget(Paragraph::new(status_line), status);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border));
        let inner = block.inner(drawing);
        self.canvas = Some(Viewport::new(inner.x, inner.y, inner.width, inner.height));

        // Canvas y grows upwards; stroke y grows downwards.
        let flip = |y: f32| (CANVAS_HEIGHT - y) as f64;
        let points = self.sketch.stroke().points();
        let playhead = self.sketch.playhead();
        let show_guides = self.show_guides;
        let (fg, muted, border, accent) = (palette.fg, palette.muted, palette.border, rgb(ACCENT));

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, CANVAS_WIDTH as f64])
            .y_bounds([0.0, CANVAS_HEIGHT as f64])
            .paint(move |ctx| {
                if show_guides {
                    for row in GUIDE_ROWS {
                        let y = flip(row);
                        let hz = y_to_frequency(row);
                        ctx.draw(&CanvasLine {
                            x1: 0.0,
                            y1: y,
                            x2: CANVAS_WIDTH as f64,
                            y2: y,
                            color: border,
                        });
                        ctx.print(4.0, y, Span::styled(format!("{hz:.0} Hz"), Style::default().fg(muted)));
                    }
                    ctx.layer();
                }
                for pair in points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].x as f64,
                        y1: flip(pair[0].y),
                        x2: pair[1].x as f64,
                        y2: flip(pair[1].y),
                        color: accent,
                    });
                }
                if let Some(head) = playhead {
                    ctx.layer();
                    ctx.draw(&Circle {
                        x: head.x as f64,
                        y: flip(head.y),
                        radius: 12.0,
                        color: fg,
                    });
                }
            });
        frame.render_widget(canvas, drawing);

        render_waveform(frame, scope, view.scope, text(Text::VisualImpact, language), palette);

        let hints_line = hint_line(
            &[
                ("drag", text(Text::DrawMelody, language)),
                ("Space", text(Text::Play, language)),
                ("↑↓", text(Text::PlaybackSpeed, language)),
                ("G", text(Text::ShowGuides, language)),
                ("C", text(Text::Clear, language)),
            ],
            palette,
        );
        frame.render_widget(Paragraph::new(hints_line), hints);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};
    use what_is_music::content::{Language, Theme};

    use super::*;
    use crate::ui::palette::Palette;

    #[test]
    fn guides_sit_at_fixed_heights() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
        let mut screen = MelodyScreen::new(1.0);
        let view = View {
            language: Language::En,
            palette: Palette::for_theme(Theme::Dark),
            scope: &[0.0; 64],
            spectrum: None,
        };
        terminal
            .draw(|frame| screen.render(frame, frame.area(), &view))
            .expect("draw");

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        // y = 50, 200, 350
        for label in ["784 Hz", "495 Hz", "206 Hz"] {
            assert!(rendered.contains(label), "missing guide {label}");
        }
    }
}
