//! Benchmarks the frame processing of the beat detector. The spectrum
//! transform is cheap (rectification), so the numbers mostly reflect the
//! band aggregation and the trailing-window statistics.
//!
//! To run these, run `$ cargo bench "process frame"`

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spectral_beat_detector::{BeatDetector, BeatType, DetectorConfig};
use std::hint::black_box;

fn rectify(samples: &[f32], spectrum: &mut [f32]) {
    for (magnitude, sample) in spectrum.iter_mut().zip(samples) {
        *magnitude = sample.abs();
    }
}

fn random_frames(frame_len: usize, count: usize) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..count)
        .map(|_| {
            (0..frame_len)
                .map(|_| rng.random_range(-1.0..=1.0))
                .collect::<Vec<f32>>()
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    for (band_count, history_len) in [(64, 40), (128, 40), (64, 160)] {
        let config = DetectorConfig::<f32> {
            band_count,
            history_len,
            ..Default::default()
        };
        let frames = random_frames(config.spectrum_len, 64);
        let mut detector = BeatDetector::new(rectify, config).unwrap();
        let mut beats = 0_usize;
        let mut sink = |_: BeatType, _: f32| beats += 1;

        // Fill the history first, as a running detector would have it.
        for frame in &frames {
            detector.process(frame, &mut sink).unwrap();
        }

        let mut frame_iter = frames.iter().cycle();
        c.bench_function(
            &format!("process frame (1024 samples, {band_count} bands, history {history_len})"),
            |b| {
                b.iter(|| {
                    let frame = frame_iter.next().unwrap();
                    detector.process(black_box(frame), &mut sink).unwrap();
                })
            },
        );
        black_box(beats);
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
