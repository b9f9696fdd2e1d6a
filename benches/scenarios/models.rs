//! Benchmarks for the per-frame work of the melody and rhythm screens.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion};
use what_is_music::melody::{sample_pitch, Point};
use what_is_music::rhythm::{Grid, Percussion, StepClock};

/// Stroke lengths a visitor produces: a flick, a sweep, a long doodle
const STROKE_LENGTHS: &[usize] = &[2, 64, 1024];

fn doodle(points: usize) -> Vec<Point> {
    (0..points)
        .map(|i| {
            let t = i as f32 / points.max(2).saturating_sub(1) as f32;
            Point::new(t * 1000.0, 200.0 + 180.0 * (t * 12.0).sin())
        })
        .collect()
}

pub fn bench_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/models");

    for &len in STROKE_LENGTHS {
        let stroke = doodle(len);
        let mut phase = 0.0f32;
        group.bench_with_input(BenchmarkId::new("sample_pitch", len), &len, |b, _| {
            b.iter(|| {
                phase = (phase + 0.005) % 1.0;
                sample_pitch(black_box(&stroke), black_box(phase))
            })
        });
    }

    let mut grid = Grid::new();
    for step in 0..4 {
        grid.toggle(Percussion::HiHat, step);
    }
    grid.toggle(Percussion::Kick, 0);
    grid.toggle(Percussion::Snare, 2);

    let mut clock = StepClock::new(200);
    clock.start();
    group.bench_function("step_clock_frame", |b| {
        b.iter(|| clock.advance(black_box(Duration::from_millis(16)), black_box(&grid)))
    });

    group.finish();
}
