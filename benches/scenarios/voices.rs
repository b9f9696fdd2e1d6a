//! Benchmarks for the kiosk's voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use what_is_music::graph::{GraphNode, RenderCtx};
use what_is_music::rhythm::Percussion;
use what_is_music::voices::{self, HeldVoice};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let ctx = RenderCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // One-shots restart whenever they finish so every block does real work
        for voice in Percussion::ALL {
            let mut node = voices::percussion(voice);
            node.note_on(&ctx);
            let name = format!("{voice:?}").to_lowercase();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    if !node.is_active() {
                        node.note_on(&ctx);
                    }
                    node.render_block(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        let mut drone = HeldVoice::drone(1_600.0, 0.21);
        group.bench_with_input(BenchmarkId::new("drone", size), &size, |b, _| {
            b.iter(|| drone.render_block(black_box(&mut buffer), black_box(&ctx)))
        });

        // Tone gliding to a new pitch every block, as during melody playback
        let mut tone = HeldVoice::tone(220.0);
        tone.set_gain(0.2);
        let mut hz = 220.0f32;
        group.bench_with_input(BenchmarkId::new("melody_tone", size), &size, |b, _| {
            b.iter(|| {
                hz = if hz > 880.0 { 110.0 } else { hz * 1.01 };
                tone.set_frequency(hz);
                tone.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
