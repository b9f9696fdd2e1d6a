//! Dynamics screen - one fader, a drone, and a growing star

use std::f64::consts::{FRAC_PI_2, PI};

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};

use what_is_music::{
    content::{text, Text},
    dynamics::Volume,
    synth::{AudioCommand, Patch, VoiceKey},
};

use super::{chrome::hint_line, hit, palette::rgb, Outbox, Screen, View};

const ACCENT: (u8, u8, u8) = (0xa8, 0x55, 0xf7);
const VOLUME_STEP: f32 = 5.0;
/// Star radius at `star_scale` 1.0, in canvas units
const STAR_RADIUS: f64 = 40.0;

pub struct DynamicsScreen {
    volume: Volume,
    default_volume: Volume,
    /// Cells the fader track covers
    fader: Option<Rect>,
}

impl DynamicsScreen {
    pub fn new(default_volume: Volume) -> Self {
        Self {
            volume: default_volume,
            default_volume,
            fader: None,
        }
    }

    fn set_volume(&mut self, volume: Volume, out: &mut Outbox) {
        if volume == self.volume {
            return;
        }
        self.volume = volume;
        out.send(AudioCommand::SetGain {
            key: VoiceKey::Drone,
            gain: volume.gain(),
        });
        out.send(AudioCommand::SetCutoff {
            key: VoiceKey::Drone,
            hz: volume.cutoff(),
        });
    }
}

/// Outline of a five-pointed star centred on (50, 50).
fn star_outline(radius: f64) -> Vec<(f64, f64)> {
    (0..=10)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { radius * 0.45 };
            let angle = FRAC_PI_2 + i as f64 * PI / 5.0;
            (50.0 + r * angle.cos(), 50.0 + r * angle.sin())
        })
        .collect()
}

impl Screen for DynamicsScreen {
    fn enter(&mut self, out: &mut Outbox) {
        *self = Self::new(self.default_volume);
        out.send(AudioCommand::Hold {
            key: VoiceKey::Drone,
            patch: Patch::Drone {
                cutoff: self.volume.cutoff(),
                gain: self.volume.gain(),
            },
        });
    }

    fn leave(&mut self, out: &mut Outbox) {
        out.send(AudioCommand::Release(VoiceKey::Drone));
    }

    fn key(&mut self, code: KeyCode, out: &mut Outbox) -> bool {
        let volume = match code {
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => self.volume.nudge(VOLUME_STEP),
            KeyCode::Down | KeyCode::Char('-') => self.volume.nudge(-VOLUME_STEP),
            KeyCode::Home => Volume::new(100.0),
            KeyCode::End => Volume::new(0.0),
            _ => return false,
        };
        self.set_volume(volume, out);
        true
    }

    fn mouse(&mut self, event: MouseEvent, out: &mut Outbox) {
        let Some(fader) = self.fader else {
            return;
        };
        let pressed = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => hit(fader, event.column, event.row),
            MouseEventKind::Drag(MouseButton::Left) => true,
            _ => false,
        };
        if pressed {
            // Cell centres, so the top cell is not quite 100.
            let y = event.row as f32 + 0.5;
            let volume = Volume::from_slider(y, fader.y as f32, fader.height as f32);
            self.set_volume(volume, out);
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &View) {
        let palette = &view.palette;
        let language = view.language;
        let accent = rgb(ACCENT);
        let intensity = self.volume.intensity();

        let [body, hints] = Layout::vertical([Constraint::Min(8), Constraint::Length(1)]).areas(area);
        let [fader_area, label_area, star_area] = Layout::horizontal([
            Constraint::Length(12),
            Constraint::Length(28),
            Constraint::Min(20),
        ])
        .spacing(1)
        .areas(body);

        // Fader: filled from the bottom
        let fader_block = Block::default()
            .title(format!(" {} ", text(Text::Volume, language)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border));
        let track = fader_block.inner(fader_area);
        frame.render_widget(fader_block, fader_area);
        self.fader = Some(track);

        let filled = ((self.volume.value() / 100.0) * track.height as f32).round() as u16;
        let bar: Vec<Line> = (0..track.height)
            .map(|row| {
                if track.height - row <= filled {
                    Line::styled("█".repeat(track.width as usize), Style::default().fg(accent))
                } else {
                    Line::styled("░".repeat(track.width as usize), Style::default().fg(palette.surface))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(bar), track);

        // Level name and meaning
        let labels = Paragraph::new(vec![
            Line::default(),
            Line::styled(
                format!("{:.0}", self.volume.value()),
                Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::from(vec![
                Span::styled(
                    format!("{} ", intensity.symbol()),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD | Modifier::ITALIC),
                ),
                Span::styled(intensity.name(), Style::default().fg(palette.fg)),
            ]),
            Line::styled(intensity.meaning(language), Style::default().fg(palette.muted)),
            Line::default(),
            Line::styled(
                format!("{:.0} Hz", self.volume.cutoff()),
                Style::default().fg(palette.muted),
            ),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(labels, label_area);

        // The star grows with the level
        let outline = star_outline(STAR_RADIUS * self.volume.star_scale() as f64);
        let star = Canvas::default()
            .block(
                Block::default()
                    .title(format!(" {} ", text(Text::VisualImpact, language)))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.border)),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, 100.0])
            .y_bounds([0.0, 100.0])
            .paint(move |ctx| {
                for pair in outline.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: pair[0].1,
                        x2: pair[1].0,
                        y2: pair[1].1,
                        color: accent,
                    });
                }
            });
        frame.render_widget(star, star_area);

        let hints_line = hint_line(
            &[
                ("drag/↑↓", text(Text::Volume, language)),
                ("Home", "ff"),
                ("End", "p"),
            ],
            palette,
        );
        frame.render_widget(Paragraph::new(hints_line), hints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_outline_is_closed() {
        let outline = star_outline(10.0);
        assert_eq!(outline.len(), 11);
        let (first, last) = (outline[0], outline[10]);
        assert!((first.0 - last.0).abs() < 1e-9 && (first.1 - last.1).abs() < 1e-9);
        // The first point is the top tip.
        assert!((first.1 - 60.0).abs() < 1e-9);
    }
}
