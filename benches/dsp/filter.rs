//! Benchmarks for the state-variable low-pass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use what_is_music::dsp::{filter::SVFilter, oscillator::OscillatorBlock};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let mut source = vec![0.0f32; size];
        OscillatorBlock::sawtooth().render(&mut source, 110.0, SAMPLE_RATE);
        let mut buffer = source.clone();

        // Fixed cutoff
        let mut filter = SVFilter::lowpass(1_600.0).with_q(5.0);
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&source);
                filter.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });

        // Cutoff moved every block, as the loudness fader does
        let mut filter = SVFilter::lowpass(200.0).with_q(5.0);
        let mut cutoff = 200.0f32;
        group.bench_with_input(BenchmarkId::new("lowpass_moving", size), &size, |b, _| {
            b.iter(|| {
                cutoff = if cutoff > 2_200.0 { 200.0 } else { cutoff + 10.0 };
                filter.set_cutoff(cutoff);
                buffer.copy_from_slice(&source);
                filter.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
