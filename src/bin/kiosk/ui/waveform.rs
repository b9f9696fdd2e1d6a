//! Oscilloscope for the kiosk's output
//!
//! The trace starts at a rising zero crossing so a held tone stands still
//! instead of crawling across the panel, and the vertical scale follows the
//! loudest sample so a quiet chord note is as readable as a kick.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Line,
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType},
    Frame,
};

use super::palette::Palette;

/// Smallest half-height of the view; keeps silence looking flat.
const QUIET_RANGE: f32 = 0.05;

/// Where to start drawing: the first upward zero crossing in the older half
/// of `buffer`, or 0 when there is none.
fn trigger_index(buffer: &[f32]) -> usize {
    let half = buffer.len() / 2;
    buffer[..half.min(buffer.len())]
        .windows(2)
        .position(|pair| pair[0] <= 0.0 && pair[1] > 0.0)
        .map_or(0, |i| i + 1)
}

/// Half-height of the view for `trace`.
fn display_range(trace: &[f32]) -> f32 {
    trace
        .iter()
        .fold(0.0f32, |peak, s| peak.max(s.abs()))
        .clamp(QUIET_RANGE, 1.0)
}

pub fn render_waveform(frame: &mut Frame, area: Rect, buffer: &[f32], title: &str, palette: &Palette) {
    let start = trigger_index(buffer);
    let window = (buffer.len() / 2).max(1);
    let trace = &buffer[start..(start + window).min(buffer.len())];
    let range = display_range(trace);

    let span = trace.len().max(1) as f64;
    let data: Vec<(f64, f64)> = trace
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / span, sample.clamp(-range, range) as f64))
        .collect();

    let level = if range > QUIET_RANGE {
        format!(" {:.0} dBFS ", 20.0 * range.log10())
    } else {
        " - ".to_string()
    };
    let block = Block::default()
        .title(format!(" {title} "))
        .title_bottom(Line::styled(level, Style::default().fg(palette.muted)).right_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette.accent))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(Axis::default().bounds([0.0, 1.0]))
        .y_axis(Axis::default().bounds([-range as f64, range as f64]));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_finds_the_rising_crossing() {
        let buffer = [0.5, 0.2, -0.3, -0.1, 0.4, 0.6, 0.1, -0.2, 0.3, 0.0];
        assert_eq!(trigger_index(&buffer), 4);
    }

    #[test]
    fn no_crossing_starts_at_zero() {
        assert_eq!(trigger_index(&[0.3; 16]), 0);
        assert_eq!(trigger_index(&[]), 0);
    }

    #[test]
    fn range_follows_the_peak_within_limits() {
        assert_eq!(display_range(&[0.0; 8]), QUIET_RANGE);
        assert!((display_range(&[0.1, -0.12, 0.05]) - 0.12).abs() < 1e-6);
        assert_eq!(display_range(&[3.0]), 1.0);
    }
}
