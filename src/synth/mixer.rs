#[cfg(feature = "rtrb")]
use log::warn;
use log::debug;
#[cfg(feature = "rtrb")]
use rtrb::Producer;

use crate::{
    dsp::automation::Param,
    graph::{GraphNode, LoopNode, RenderCtx},
    synth::message::{AudioCommand, MessageReceiver, VoiceKey},
    voices::{self, HeldVoice, OneShotVoice, CONTROL_TIME_CONSTANT},
    MAX_BLOCK_SIZE,
};

/*
Mixer
=====

Everything the kiosk plays ends up here, on the audio thread:

  one-shots   drum hits and metronome clicks. Fire and forget: each one
              stops itself, the mixer only frees its slot once it reports
              inactive. When every slot is busy the oldest hit is stolen.

  held        sustained voices, one slot per `VoiceKey`. Starting a key that
              is already sounding releases the old voice first.

  releasing   held voices that were told to stop and are fading out. When
              every slot is busy the longest-fading voice is cut.

  loop        the visitor's recorded voice, if any.

All voice storage is sized in `new`; handling a command or rendering a block
only moves voices between slots. The one heap object that does come through
is a recorded clip. A retired clip is handed back over the clip-return ring
so it is freed on the UI thread.

Per block:
  1. drain pending commands
  2. sum every voice into `out`
  3. apply the master gain and a tanh soft clip so the sum stays in [-1, 1]
*/

/// Most drum hits and clicks that may ring at once.
pub const MAX_ONE_SHOTS: usize = 32;
/// Most released voices that may fade at once.
pub const MAX_RELEASING: usize = 2 * VoiceKey::COUNT;

struct OneShot {
    node: OneShotVoice,
    started: u64,
}

struct Fading {
    voice: HeldVoice,
    since: u64,
}

/// Index of the first empty slot, or of the oldest occupant.
fn free_or_oldest<T>(slots: &[Option<T>], age: impl Fn(&T) -> u64) -> usize {
    slots
        .iter()
        .position(Option::is_none)
        .or_else(|| {
            slots
                .iter()
                .enumerate()
                .filter_map(|(idx, slot)| slot.as_ref().map(|item| (idx, age(item))))
                .min_by_key(|&(_, started)| started)
                .map(|(idx, _)| idx)
        })
        .unwrap_or(0)
}

pub struct Mixer {
    ctx: RenderCtx,
    one_shots: [Option<OneShot>; MAX_ONE_SHOTS],
    held: [Option<HeldVoice>; VoiceKey::COUNT],
    releasing: [Option<Fading>; MAX_RELEASING],
    looper: Option<LoopNode>,
    #[cfg(feature = "rtrb")]
    clip_return: Option<Producer<Vec<f32>>>,
    master: Param,
    temp_buffer: Vec<f32>,
    frame_counter: u64,
}

impl Mixer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            ctx: RenderCtx::new(sample_rate),
            one_shots: std::array::from_fn(|_| None),
            held: std::array::from_fn(|_| None),
            releasing: std::array::from_fn(|_| None),
            looper: None,
            #[cfg(feature = "rtrb")]
            clip_return: None,
            master: Param::new(1.0),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        }
    }

    pub fn with_master(mut self, gain: f32) -> Self {
        self.master.set_value(gain.clamp(0.0, 1.0));
        self
    }

    /// Send retired loop clips to `tx` instead of freeing them here.
    #[cfg(feature = "rtrb")]
    pub fn with_clip_return(mut self, tx: Producer<Vec<f32>>) -> Self {
        self.clip_return = Some(tx);
        self
    }

    pub fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate
    }

    /// Apply every pending command.
    pub fn drain<R: MessageReceiver>(&mut self, rx: &mut R) {
        while let Some(command) = rx.pop() {
            self.handle(command);
        }
    }

    pub fn handle(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::Trigger(voice) => self.fire(voices::percussion(voice)),
            AudioCommand::Click => self.fire(voices::click()),
            AudioCommand::Hold { key, patch } => {
                let old = self.held[key.slot()].replace(HeldVoice::new(patch));
                if let Some(old) = old {
                    self.fade_out(old);
                }
            }
            AudioCommand::SetFrequency { key, hz } => {
                if let Some(voice) = self.held[key.slot()].as_mut() {
                    voice.set_frequency(hz);
                }
            }
            AudioCommand::SetGain { key, gain } => {
                if let Some(voice) = self.held[key.slot()].as_mut() {
                    voice.set_gain(gain);
                }
            }
            AudioCommand::SetCutoff { key, hz } => {
                if let Some(voice) = self.held[key.slot()].as_mut() {
                    voice.set_cutoff(hz);
                }
            }
            AudioCommand::Release(key) => {
                if let Some(voice) = self.held[key.slot()].take() {
                    self.fade_out(voice);
                }
            }
            AudioCommand::ReleaseAll => {
                for slot in 0..VoiceKey::COUNT {
                    if let Some(voice) = self.held[slot].take() {
                        self.fade_out(voice);
                    }
                }
                self.retire_loop();
            }
            AudioCommand::StartLoop {
                samples,
                sample_rate,
                rate,
            } => {
                self.retire_loop();
                self.looper = Some(LoopNode::new(samples, sample_rate).with_rate(rate));
            }
            AudioCommand::SetLoopRate(rate) => {
                if let Some(looper) = self.looper.as_mut() {
                    looper.set_rate(rate);
                }
            }
            AudioCommand::StopLoop => self.retire_loop(),
            AudioCommand::SetMaster(gain) => {
                self.master
                    .set_target(gain.clamp(0.0, 1.0), CONTROL_TIME_CONSTANT);
            }
        }
    }

    fn fire(&mut self, mut node: OneShotVoice) {
        let idx = free_or_oldest(&self.one_shots, |shot| shot.started);
        if self.one_shots[idx].is_some() {
            debug!("one-shot pool full, stealing oldest hit");
        }
        node.note_on(&self.ctx);
        self.one_shots[idx] = Some(OneShot {
            node,
            started: self.frame_counter,
        });
    }

    fn fade_out(&mut self, mut voice: HeldVoice) {
        voice.release();
        let idx = free_or_oldest(&self.releasing, |fading| fading.since);
        if self.releasing[idx].is_some() {
            debug!("release pool full, cutting the oldest fade");
        }
        self.releasing[idx] = Some(Fading {
            voice,
            since: self.frame_counter,
        });
    }

    fn retire_loop(&mut self) {
        if let Some(looper) = self.looper.take() {
            self.retire_clip(looper.into_clip());
        }
    }

    #[cfg(feature = "rtrb")]
    fn retire_clip(&mut self, clip: Vec<f32>) {
        match self.clip_return.as_mut() {
            Some(tx) => {
                if tx.push(clip).is_err() {
                    warn!("clip return queue full, freeing clip on the audio thread");
                }
            }
            None => drop(clip),
        }
    }

    #[cfg(not(feature = "rtrb"))]
    fn retire_clip(&mut self, clip: Vec<f32>) {
        drop(clip);
    }

    /// Drain commands from `rx`, then render into `out`.
    pub fn process<R: MessageReceiver>(&mut self, rx: &mut R, out: &mut [f32]) {
        self.drain(rx);
        self.render_block(out);
    }

    /// Render the current voices into `out` (overwrites it).
    pub fn render_block(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk);
        }
    }

    fn render_chunk(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        let len = out.len();
        let ctx = self.ctx;
        let temp = &mut self.temp_buffer[..len];

        let mut accumulate = |node: &mut dyn GraphNode| {
            node.render_block(temp, &ctx);
            for (o, v) in out.iter_mut().zip(temp.iter()) {
                *o += v;
            }
        };

        for shot in self.one_shots.iter_mut().flatten() {
            accumulate(&mut shot.node);
        }
        for voice in self.held.iter_mut().flatten() {
            accumulate(voice);
        }
        for fading in self.releasing.iter_mut().flatten() {
            accumulate(&mut fading.voice);
        }
        if let Some(looper) = self.looper.as_mut() {
            accumulate(looper);
        }

        for sample in out.iter_mut() {
            *sample = (*sample * self.master.next_value(ctx.sample_rate)).tanh();
        }

        for slot in &mut self.one_shots {
            if slot.as_ref().is_some_and(|shot| !shot.node.is_active()) {
                *slot = None;
            }
        }
        for slot in &mut self.releasing {
            if slot.as_ref().is_some_and(|fading| !fading.voice.is_active()) {
                *slot = None;
            }
        }
        self.frame_counter += len as u64;
    }

    pub fn one_shot_count(&self) -> usize {
        self.one_shots.iter().flatten().count()
    }

    pub fn held_count(&self) -> usize {
        self.held.iter().flatten().count()
    }

    pub fn releasing_count(&self) -> usize {
        self.releasing.iter().flatten().count()
    }

    pub fn is_holding(&self, key: VoiceKey) -> bool {
        self.held[key.slot()].is_some()
    }

    pub fn held_voice(&self, key: VoiceKey) -> Option<&HeldVoice> {
        self.held[key.slot()].as_ref()
    }

    pub fn is_looping(&self) -> bool {
        self.looper.is_some()
    }

    pub fn loop_rate(&self) -> Option<f32> {
        self.looper.as_ref().map(LoopNode::rate)
    }

    /// True when nothing at all is sounding.
    pub fn is_silent(&self) -> bool {
        self.one_shot_count() == 0
            && self.held_count() == 0
            && self.releasing_count() == 0
            && self.looper.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::Note;
    use crate::rhythm::Percussion;
    use crate::voices::Patch;
    use std::collections::VecDeque;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn render_seconds(mixer: &mut Mixer, seconds: f32) -> Vec<f32> {
        let mut out = vec![0.0f32; (seconds * SAMPLE_RATE) as usize];
        mixer.render_block(&mut out);
        out
    }

    #[test]
    fn drum_hit_plays_then_is_dropped() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        let mut rx = VecDeque::from([AudioCommand::Trigger(Percussion::Kick)]);
        let mut out = vec![0.0f32; 512];
        mixer.process(&mut rx, &mut out);

        assert_eq!(mixer.one_shot_count(), 1);
        assert!(out.iter().any(|&s| s.abs() > 0.1));

        render_seconds(&mut mixer, 0.6);
        assert_eq!(mixer.one_shot_count(), 0);
        assert!(mixer.is_silent());
    }

    #[test]
    fn full_pool_steals_the_oldest() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        for _ in 0..MAX_ONE_SHOTS + 5 {
            mixer.handle(AudioCommand::Trigger(Percussion::Kick));
        }
        assert_eq!(mixer.one_shot_count(), MAX_ONE_SHOTS);
    }

    #[test]
    fn holding_a_key_twice_replaces_the_voice() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        let key = VoiceKey::Chord(Note::C4);
        mixer.handle(AudioCommand::Hold {
            key,
            patch: Patch::ChordNote { hz: Note::C4.frequency() },
        });
        mixer.handle(AudioCommand::Hold {
            key,
            patch: Patch::ChordNote { hz: Note::C4.frequency() },
        });

        assert_eq!(mixer.held_count(), 1);
        assert_eq!(mixer.releasing_count(), 1);
    }

    #[test]
    fn released_voice_is_freed_after_fading() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        mixer.handle(AudioCommand::Hold {
            key: VoiceKey::Melody,
            patch: Patch::Tone { hz: 440.0 },
        });
        mixer.handle(AudioCommand::SetGain {
            key: VoiceKey::Melody,
            gain: 0.2,
        });
        render_seconds(&mut mixer, 0.3);

        mixer.handle(AudioCommand::Release(VoiceKey::Melody));
        assert!(!mixer.is_holding(VoiceKey::Melody));
        assert_eq!(mixer.releasing_count(), 1);

        render_seconds(&mut mixer, 0.2);
        assert_eq!(mixer.releasing_count(), 0);
    }

    #[test]
    fn controls_reach_the_held_voice() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        mixer.handle(AudioCommand::Hold {
            key: VoiceKey::Drone,
            patch: Patch::Drone { cutoff: 1_600.0, gain: 0.21 },
        });
        mixer.handle(AudioCommand::SetCutoff {
            key: VoiceKey::Drone,
            hz: 700.0,
        });
        render_seconds(&mut mixer, 0.5);

        let cutoff = mixer
            .held_voice(VoiceKey::Drone)
            .and_then(HeldVoice::cutoff)
            .unwrap_or_default();
        assert!((cutoff - 700.0).abs() < 5.0);
    }

    #[test]
    fn release_all_clears_voices_and_loop() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        mixer.handle(AudioCommand::Hold {
            key: VoiceKey::Chord(Note::E4),
            patch: Patch::ChordNote { hz: Note::E4.frequency() },
        });
        mixer.handle(AudioCommand::StartLoop {
            samples: vec![0.1; 100],
            sample_rate: SAMPLE_RATE,
            rate: 1.0,
        });
        mixer.handle(AudioCommand::ReleaseAll);

        assert_eq!(mixer.held_count(), 0);
        assert!(!mixer.is_looping());
    }

    #[test]
    fn loop_rate_follows_commands() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        mixer.handle(AudioCommand::StartLoop {
            samples: vec![0.1; 100],
            sample_rate: SAMPLE_RATE,
            rate: 1.0,
        });
        mixer.handle(AudioCommand::SetLoopRate(1.5));
        assert_eq!(mixer.loop_rate(), Some(1.5));
    }

    #[test]
    fn release_pool_is_bounded() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        for _ in 0..MAX_RELEASING * 3 {
            mixer.handle(AudioCommand::Hold {
                key: VoiceKey::Melody,
                patch: Patch::Tone { hz: 440.0 },
            });
            mixer.handle(AudioCommand::Release(VoiceKey::Melody));
        }
        assert_eq!(mixer.releasing_count(), MAX_RELEASING);
        assert!(!mixer.is_holding(VoiceKey::Melody));
    }

    #[test]
    fn stealing_takes_the_oldest_slot() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        mixer.handle(AudioCommand::Click);
        render_seconds(&mut mixer, 0.01);
        for _ in 0..MAX_ONE_SHOTS {
            mixer.handle(AudioCommand::Trigger(Percussion::Kick));
        }
        assert_eq!(mixer.one_shot_count(), MAX_ONE_SHOTS);

        // Had a kick been stolen, the click would end here and leave a gap.
        render_seconds(&mut mixer, 0.15);
        assert_eq!(mixer.one_shot_count(), MAX_ONE_SHOTS);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn retired_clips_are_handed_back() {
        let (tx, mut rx) = rtrb::RingBuffer::<Vec<f32>>::new(4);
        let mut mixer = Mixer::new(SAMPLE_RATE).with_clip_return(tx);
        for len in [100, 200] {
            mixer.handle(AudioCommand::StartLoop {
                samples: vec![0.1; len],
                sample_rate: SAMPLE_RATE,
                rate: 1.0,
            });
        }
        mixer.handle(AudioCommand::StopLoop);

        assert_eq!(rx.pop().ok().map(|clip| clip.len()), Some(100));
        assert_eq!(rx.pop().ok().map(|clip| clip.len()), Some(200));
        assert!(rx.pop().is_err());
        assert!(!mixer.is_looping());
    }

    #[test]
    fn output_stays_within_unity() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        for _ in 0..8 {
            mixer.handle(AudioCommand::Trigger(Percussion::Kick));
        }
        let out = render_seconds(&mut mixer, 0.05);
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
    }
}
