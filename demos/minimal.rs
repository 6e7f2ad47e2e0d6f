//! Minimal example on how to use this library. Runs the detector on a
//! synthetic drum pattern and prints the detected beats.
//!
//! `$ cargo run --example minimal`

use log::LevelFilter;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use spectral_beat_detector::{BeatDetector, BeatType, DetectorConfig, SpectrumTransform};
use std::f32::consts::PI;
use std::sync::Arc;

const SAMPLING_RATE: f32 = 44100.0;
const FRAME_LEN: usize = 1024;
const FRAMES: usize = 200;
/// A kick spans a few bands: body and click.
const KICK_TONES_HZ: [f32; 3] = [100.0, 800.0, 1500.0];

/// Magnitudes of the complex FFT of the frame.
struct FftTransform {
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
}

impl FftTransform {
    fn new(len: usize) -> Self {
        Self {
            fft: FftPlanner::new().plan_fft_forward(len),
            buffer: vec![Complex::default(); len],
        }
    }
}

impl SpectrumTransform<f32> for FftTransform {
    fn transform(&mut self, samples: &[f32], spectrum: &mut [f32]) {
        for (value, &sample) in self.buffer.iter_mut().zip(samples) {
            *value = Complex::new(sample, 0.0);
        }
        self.fft.process(&mut self.buffer);
        for (magnitude, value) in spectrum.iter_mut().zip(&self.buffer) {
            *magnitude = value.norm();
        }
    }
}

/// A kick (tone burst) every 16 frames and a hi-hat (noise burst) every
/// 4 frames on top of quiet noise.
fn drum_frame(frame_index: usize) -> Vec<f32> {
    let kick = frame_index % 16 == 0;
    let hihat = frame_index % 4 == 2;
    (0..FRAME_LEN)
        .map(|i| {
            let t = (frame_index * FRAME_LEN + i) as f32 / SAMPLING_RATE;
            let mut sample = rand::random_range(-0.001_f32..=0.001);
            if kick {
                sample += KICK_TONES_HZ
                    .iter()
                    .map(|hz| 0.3 * (2.0 * PI * hz * t).sin())
                    .sum::<f32>();
            }
            if hihat {
                sample += rand::random_range(-0.2_f32..=0.2);
            }
            sample
        })
        .collect()
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .with_colors(true)
        .init()
        .unwrap();

    let config = DetectorConfig::<f32> {
        spectrum_len: FRAME_LEN,
        ..Default::default()
    };
    let mut detector = BeatDetector::new(FftTransform::new(FRAME_LEN), config).unwrap();

    for frame_index in 0..FRAMES {
        let frame = drum_frame(frame_index);
        let ms = (frame_index * FRAME_LEN) as f32 / SAMPLING_RATE * 1000.0;
        detector
            .process(&frame, &mut |beat_type: BeatType, energy: f32| {
                log::info!("{ms:>7.1} ms: {beat_type:>4} beat (energy {energy:.1})");
            })
            .unwrap();
    }
}
