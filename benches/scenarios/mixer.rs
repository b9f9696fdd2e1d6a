//! Benchmarks for the mixer under kiosk-like load.

use std::collections::VecDeque;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use what_is_music::harmony::Note;
use what_is_music::rhythm::Percussion;
use what_is_music::synth::{AudioCommand, Mixer, Patch, VoiceKey, MAX_ONE_SHOTS};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mixer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Idle: nothing sounding, only the master stage
        let mut mixer = Mixer::new(SAMPLE_RATE);
        let mut queue = VecDeque::new();
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| mixer.process(black_box(&mut queue), black_box(&mut buffer)))
        });

        // Full octave cluster held on the harmony screen
        let mut mixer = Mixer::new(SAMPLE_RATE);
        for note in Note::ALL {
            mixer.handle(AudioCommand::Hold {
                key: VoiceKey::Chord(note),
                patch: Patch::ChordNote { hz: note.frequency() },
            });
        }
        group.bench_with_input(BenchmarkId::new("octave_cluster", size), &size, |b, _| {
            b.iter(|| mixer.render_block(black_box(&mut buffer)))
        });

        // Worst case: the one-shot pool refilled every block
        let mut mixer = Mixer::new(SAMPLE_RATE);
        let mut queue = VecDeque::new();
        group.bench_with_input(BenchmarkId::new("full_drum_pool", size), &size, |b, _| {
            b.iter(|| {
                while mixer.one_shot_count() + queue.len() < MAX_ONE_SHOTS {
                    let voice = Percussion::ALL[queue.len() % Percussion::ALL.len()];
                    queue.push_back(AudioCommand::Trigger(voice));
                }
                mixer.process(black_box(&mut queue), black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
