//! Audio context - the kiosk's only connection to the sound card
//!
//! ```text
//!   UI thread                         cpal output callback
//!   ─────────                         ────────────────────
//!   send(AudioCommand) ──[commands]──▶ Mixer::process ──▶ speakers
//!   drain_scope()      ◀──[scope]───── rendered block
//!   drain_scope()      ◀──[clips]───── retired loop clips (freed here)
//!
//!                                     cpal input callback
//!   drain_input()      ◀──[mic]─────── microphone frames (mono)
//! ```
//!
//! All four links are `rtrb` ring buffers, so neither callback ever locks.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, error, info, warn};
use rtrb::{Consumer, Producer, RingBuffer};

use what_is_music::{
    synth::{AudioCommand, Mixer},
    Error, MAX_BLOCK_SIZE,
};

/// Pending UI → audio commands
const COMMAND_QUEUE_SIZE: usize = 1024;
/// Rendered samples kept for the scope and spectrum
const SCOPE_QUEUE_SIZE: usize = 8192;
/// Retired loop clips waiting to be freed on the UI thread
const CLIP_RETURN_SIZE: usize = 4;
/// Seconds of microphone audio buffered between UI frames
const INPUT_QUEUE_SECONDS: usize = 2;

/// An open microphone stream
struct InputCapture {
    _stream: cpal::Stream,
    rx: Consumer<f32>,
    sample_rate: f32,
}

/// Owns the output stream (and, while recording, the input stream).
///
/// Dropping the context closes both.
pub struct AudioContext {
    _stream: cpal::Stream,
    commands: Producer<AudioCommand>,
    scope: Consumer<f32>,
    retired_clips: Consumer<Vec<f32>>,
    sample_rate: f32,
    input: Option<InputCapture>,
}

impl AudioContext {
    /// Open the default output device and start rendering silence.
    pub fn open(master_gain: f32) -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!(
            "audio output: {} ({} Hz, {} channels)",
            device.name().unwrap_or_else(|_| "unknown".into()),
            sample_rate,
            channels
        );

        let (commands, mut command_rx) = RingBuffer::<AudioCommand>::new(COMMAND_QUEUE_SIZE);
        let (mut scope_tx, scope) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);
        let (clip_tx, retired_clips) = RingBuffer::<Vec<f32>>::new(CLIP_RETURN_SIZE);

        let mut mixer = Mixer::new(sample_rate)
            .with_master(master_gain)
            .with_clip_return(clip_tx);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames_to_render];
                        mixer.process(&mut command_rx, block);

                        // Copy to output (mono to all channels)
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                            // The UI only wants the most recent audio; drop when full.
                            let _ = scope_tx.push(s);
                        }

                        frames_written += frames_to_render;
                    }
                },
                |err| error!("audio output error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        Ok(Self {
            _stream: stream,
            commands,
            scope,
            retired_clips,
            sample_rate,
            input: None,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn send(&mut self, command: AudioCommand) {
        debug!("audio <- {command:?}");
        if self.commands.push(command).is_err() {
            warn!("audio command queue full, command dropped");
        }
    }

    /// Append every rendered sample received since the last call, and free
    /// any loop clips the mixer has let go of.
    pub fn drain_scope(&mut self, out: &mut Vec<f32>) {
        while let Ok(sample) = self.scope.pop() {
            out.push(sample);
        }
        while let Ok(clip) = self.retired_clips.pop() {
            debug!("freed retired clip of {} samples", clip.len());
        }
    }

    /// Start capturing from the default microphone.
    ///
    /// Returns the capture sample rate. Any failure means the visitor gets
    /// the "microphone denied" alert.
    pub fn open_input(&mut self) -> what_is_music::Result<f32> {
        if let Some(input) = &self.input {
            return Ok(input.sample_rate);
        }

        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(Error::NoInputDevice)?;
        let config = device
            .default_input_config()
            .map_err(|err| Error::CaptureFailed(err.to_string()))?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels().max(1) as usize;
        let (mut tx, rx) =
            RingBuffer::<f32>::new(sample_rate as usize * INPUT_QUEUE_SECONDS);

        let stream = device
            .build_input_stream(
                &config.into(),
                move |data: &[f32], _| {
                    for frame in data.chunks(channels) {
                        let mono = frame.iter().sum::<f32>() / frame.len() as f32;
                        if tx.push(mono).is_err() {
                            break;
                        }
                    }
                },
                |err| error!("audio input error: {err}"),
                None,
            )
            .map_err(|err| Error::CaptureFailed(err.to_string()))?;
        stream
            .play()
            .map_err(|err| Error::CaptureFailed(err.to_string()))?;

        info!("microphone open at {sample_rate} Hz, {channels} channels");
        self.input = Some(InputCapture {
            _stream: stream,
            rx,
            sample_rate,
        });
        Ok(sample_rate)
    }

    /// Stop capturing. Samples not yet drained are lost.
    pub fn close_input(&mut self) {
        if self.input.take().is_some() {
            info!("microphone closed");
        }
    }

    /// Append every microphone sample received since the last call.
    pub fn drain_input(&mut self, out: &mut Vec<f32>) {
        if let Some(input) = self.input.as_mut() {
            while let Ok(sample) = input.rx.pop() {
                out.push(sample);
            }
        }
    }
}

impl Drop for AudioContext {
    fn drop(&mut self) {
        self.close_input();
        info!("audio context closed");
    }
}
