use log::{info, warn};

use crate::error::{Error, Result};

/// Longest take kept; later samples are dropped.
pub const MAX_RECORDING_SECONDS: f32 = 30.0;

/// What the record/play buttons should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Recorded,
}

/// Captures one take from the microphone for the tempo screen's voice loop.
///
/// ```text
///   Idle ──start──▶ Recording ──finish──▶ Recorded ──start──▶ Recording ...
///                       │
///                       └── finish with no audio ──▶ Idle (EmptyRecording)
/// ```
///
/// Samples arrive at the microphone's rate and are resampled to the output
/// rate when the take is finished, so the loop player only ever deals with
/// a rate change caused by the tempo.
#[derive(Debug, Clone, Default)]
pub struct VoiceRecorder {
    recording: bool,
    input_rate: f32,
    take: Vec<f32>,
    clip: Option<Vec<f32>>,
    clip_rate: f32,
    playing: bool,
}

impl VoiceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new take at `input_rate`. Stops a playing loop.
    ///
    /// Returns true when a loop was playing and has been stopped.
    pub fn start(&mut self, input_rate: f32) -> bool {
        info!("voice recording started at {input_rate} Hz");
        self.recording = true;
        self.input_rate = input_rate;
        self.take.clear();
        std::mem::take(&mut self.playing)
    }

    /// Append microphone samples. Ignored unless recording.
    pub fn push(&mut self, samples: &[f32]) {
        if !self.recording {
            return;
        }
        let limit = (MAX_RECORDING_SECONDS * self.input_rate) as usize;
        let room = limit.saturating_sub(self.take.len());
        self.take.extend_from_slice(&samples[..samples.len().min(room)]);
    }

    /// End the take and keep it, resampled to `output_rate`.
    ///
    /// An empty take is discarded and the previous clip, if any, survives.
    pub fn finish(&mut self, output_rate: f32) -> Result<()> {
        if !self.recording {
            return Ok(());
        }
        self.recording = false;
        let take = std::mem::take(&mut self.take);
        if take.is_empty() {
            warn!("voice recording finished with no audio");
            return Err(Error::EmptyRecording);
        }

        let clip = resample_linear(&take, self.input_rate, output_rate);
        info!(
            "voice recording kept: {:.2} s",
            clip.len() as f32 / output_rate
        );
        self.clip = Some(clip);
        self.clip_rate = output_rate;
        Ok(())
    }

    /// Abandon the take in progress.
    pub fn cancel(&mut self) {
        self.recording = false;
        self.take.clear();
    }

    /// Start or stop the loop. Returns the new playing state.
    ///
    /// Nothing happens without a clip.
    pub fn toggle_playback(&mut self) -> bool {
        if self.playing {
            self.playing = false;
        } else if self.clip.is_some() && !self.recording {
            self.playing = true;
        }
        self.playing
    }

    pub fn stop_playback(&mut self) {
        self.playing = false;
    }

    pub fn state(&self) -> RecorderState {
        if self.recording {
            RecorderState::Recording
        } else if self.clip.is_some() {
            RecorderState::Recorded
        } else {
            RecorderState::Idle
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn clip(&self) -> Option<&[f32]> {
        self.clip.as_deref()
    }

    pub fn clip_rate(&self) -> f32 {
        self.clip_rate
    }

    /// Seconds captured so far in the current take.
    pub fn take_seconds(&self) -> f32 {
        if self.input_rate > 0.0 {
            self.take.len() as f32 / self.input_rate
        } else {
            0.0
        }
    }
}

/// Linear-interpolation sample rate conversion.
pub fn resample_linear(input: &[f32], from_rate: f32, to_rate: f32) -> Vec<f32> {
    if input.is_empty() || from_rate <= 0.0 || to_rate <= 0.0 || from_rate == to_rate {
        return input.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = ((input.len() as f64) / ratio).round().max(1.0) as usize;
    let last = input.len() - 1;

    (0..out_len)
        .map(|i| {
            let position = i as f64 * ratio;
            let index = (position as usize).min(last);
            let next = (index + 1).min(last);
            let frac = (position - index as f64) as f32;
            input[index] + (input[next] - input[index]) * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_keeps_a_take() {
        let mut recorder = VoiceRecorder::new();
        assert_eq!(recorder.state(), RecorderState::Idle);

        recorder.start(48_000.0);
        assert_eq!(recorder.state(), RecorderState::Recording);
        recorder.push(&[0.1; 480]);
        assert!((recorder.take_seconds() - 0.01).abs() < 1e-6);

        assert!(recorder.finish(48_000.0).is_ok());
        assert_eq!(recorder.state(), RecorderState::Recorded);
        assert_eq!(recorder.clip().map(<[f32]>::len), Some(480));
    }

    #[test]
    fn empty_take_is_an_error_and_keeps_old_clip() {
        let mut recorder = VoiceRecorder::new();
        recorder.start(48_000.0);
        recorder.push(&[0.2; 10]);
        recorder.finish(48_000.0).ok();

        recorder.start(48_000.0);
        assert!(matches!(
            recorder.finish(48_000.0),
            Err(Error::EmptyRecording)
        ));
        assert_eq!(recorder.clip().map(<[f32]>::len), Some(10));
    }

    #[test]
    fn push_is_ignored_when_idle() {
        let mut recorder = VoiceRecorder::new();
        recorder.push(&[0.5; 100]);
        assert_eq!(recorder.take_seconds(), 0.0);
    }

    #[test]
    fn take_length_is_capped() {
        let mut recorder = VoiceRecorder::new();
        recorder.start(100.0);
        for _ in 0..40 {
            recorder.push(&[0.0; 100]);
        }
        assert!((recorder.take_seconds() - MAX_RECORDING_SECONDS).abs() < 1e-3);
    }

    #[test]
    fn playback_needs_a_clip_and_stops_on_new_take() {
        let mut recorder = VoiceRecorder::new();
        assert!(!recorder.toggle_playback());

        recorder.start(8_000.0);
        recorder.push(&[0.3; 80]);
        recorder.finish(8_000.0).ok();
        assert!(recorder.toggle_playback());

        assert!(recorder.start(8_000.0));
        assert!(!recorder.is_playing());
    }

    #[test]
    fn resampling_changes_length_by_ratio() {
        let input: Vec<f32> = (0..441).map(|i| i as f32 / 441.0).collect();
        let output = resample_linear(&input, 44_100.0, 48_000.0);
        assert_eq!(output.len(), 480);
        assert_eq!(output[0], 0.0);
        assert!(output.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn same_rate_is_a_copy() {
        let input = vec![0.1, -0.2, 0.3];
        assert_eq!(resample_linear(&input, 48_000.0, 48_000.0), input);
    }
}
