//! Spectrum analyzer widget
//!
//! FFT of the most recent output with log-spaced bins, plotted on a log
//! frequency axis so the harmony keyboard's notes spread out evenly.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::palette::Palette;

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 48;
/// Lowest frequency shown, in Hz
const MIN_FREQ: f32 = 50.0;
/// Highest frequency shown; the keyboard tops out at C5
const MAX_FREQ: f32 = 4_000.0;
const FLOOR_DB: f64 = -100.0;

/// Spectrum analyzer with FFT processing
pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// Frequency values for each bin (Hz)
    freq_bins: Vec<f64>,
    /// FFT bin indices corresponding to each frequency
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Current spectrum data: (frequency_hz, magnitude_db)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `buffer_len` is the FFT size and must match the buffers passed to
    /// [`update`](Self::update).
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let buffer_len = buffer_len.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        // Hann window - reduces spectral leakage
        let denom = (buffer_len - 1) as f32;
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos()))
            .collect();

        let max_freq = (sample_rate / 2.0).min(MAX_FREQ).max(MIN_FREQ * 2.0) as f64;
        let min_freq = MIN_FREQ as f64;
        let ratio = max_freq / min_freq;
        let half = buffer_len / 2;

        let mut freq_bins = Vec::with_capacity(SPECTRUM_BINS);
        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = min_freq * ratio.powf(t);
            let index = (freq * buffer_len as f64 / sample_rate.max(1.0) as f64).round() as usize;
            freq_bins.push(freq);
            bin_indices.push(index.min(half - 1));
        }

        let spectrum = freq_bins.iter().map(|&f| (f.log10(), FLOOR_DB)).collect();

        Self {
            window,
            freq_bins,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute from `buffer`. Buffers of the wrong length are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for ((point, &freq), &index) in self
            .spectrum
            .iter_mut()
            .zip(&self.freq_bins)
            .zip(&self.bin_indices)
        {
            let bin = self.scratch[index];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            *point = (freq.log10(), (10.0 * (power as f64).log10()).max(FLOOR_DB));
        }
    }

    /// (log10 Hz, dB) pairs ready for plotting
    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render the spectrum analyzer widget
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)], palette: &Palette) {
    let block = Block::default()
        .title(" Spectrum ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette.accent))
        .data(spectrum);

    let max_db = spectrum.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([(MIN_FREQ as f64).log10(), (MAX_FREQ as f64).log10()])
                .labels(["50", "200", "1k", "4k"])
                .style(Style::default().fg(palette.muted)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(["-100", "-50", "0"])
                .style(Style::default().fg(palette.muted)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_peaks_near_its_frequency() {
        let sample_rate = 48_000.0;
        let len = 1024;
        let hz = 440.0f32;
        let buffer: Vec<f32> = (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * hz * i as f32 / sample_rate).sin())
            .collect();

        let mut analyzer = SpectrumAnalyzer::new(len, sample_rate);
        analyzer.update(&buffer);

        let peak = analyzer
            .data()
            .iter()
            .copied()
            .fold((0.0, f64::MIN), |best, point| if point.1 > best.1 { point } else { best });
        let peak_hz = 10f64.powf(peak.0);
        assert!((peak_hz - 440.0).abs() < 100.0, "peak at {peak_hz} Hz");
    }

    #[test]
    fn wrong_length_is_ignored() {
        let mut analyzer = SpectrumAnalyzer::new(1024, 48_000.0);
        analyzer.update(&[1.0; 16]);
        assert!(analyzer.data().iter().all(|&(_, db)| db == FLOOR_DB));
    }
}
