/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Helpers for tests: a real spectrum transform and synthetic signals.

use crate::SpectrumTransform;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;
use std::vec;
use std::vec::Vec;

/// Spectrum transform that returns the magnitudes of the complex FFT. As the
/// input is real-valued, the upper half mirrors the lower half.
pub struct FftMagnitudeTransform {
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
}

impl FftMagnitudeTransform {
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(len),
            buffer: vec![Complex::default(); len],
        }
    }
}

impl SpectrumTransform<f32> for FftMagnitudeTransform {
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

/// Synthetic audio signals.
pub mod signals {
    use super::*;
    use core::f32::consts::PI;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Every n-th frame of [`kick_pattern`] contains a kick.
    pub const KICK_INTERVAL: usize = 8;

    /// FFT bins of the tones that form a kick. Each tone completes an integer
    /// number of periods per frame, so it doesn't leak into other bins.
    const KICK_BINS: [usize; 3] = [8, 24, 40];
    const KICK_AMPLITUDE: f32 = 0.3;
    const NOISE_AMPLITUDE: f32 = 0.001;

    /// Returns `frame_count` frames of low white noise. Every
    /// [`KICK_INTERVAL`]-th frame, starting with the first one, additionally
    /// contains a low-frequency burst that fills the whole frame.
    pub fn kick_pattern(frame_len: usize, frame_count: usize, seed: u64) -> Vec<Vec<f32>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut frames = Vec::with_capacity(frame_count);
        for frame_index in 0..frame_count {
            let is_kick = frame_index % KICK_INTERVAL == 0;
            let mut frame = Vec::with_capacity(frame_len);
            for i in 0..frame_len {
                let noise = rng.random_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
                let kick = if is_kick {
                    KICK_BINS
                        .iter()
                        .map(|&bin| {
                            let phase = 2.0 * PI * (bin * i) as f32 / frame_len as f32;
                            KICK_AMPLITUDE * phase.sin()
                        })
                        .sum::<f32>()
                } else {
                    0.0
                };
                frame.push(noise + kick);
            }
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn kick_pattern_has_expected_shape() {
        let frames = kick_pattern(256, 17, 1);
        assert_eq!(frames.len(), 17);
        assert!(frames.iter().all(|frame| frame.len() == 256));

        let peak = |frame: &Vec<f32>| frame.iter().fold(0.0_f32, |acc, x| acc.max(x.abs()));
        assert!(peak(&frames[0]) > 0.5);
        assert!(peak(&frames[1]) <= NOISE_AMPLITUDE);
        assert!(peak(&frames[KICK_INTERVAL]) > 0.5);
        assert!(peak(&frames[2 * KICK_INTERVAL]) > 0.5);
    }
}

#[test]
fn fft_transform_finds_tone() {
    let len = 64;
    let samples = (0..len)
        .map(|i| (2.0 * core::f32::consts::PI * 4.0 * i as f32 / len as f32).sin())
        .collect::<Vec<_>>();
    let mut spectrum = vec![0.0_f32; len];
    FftMagnitudeTransform::new(len).transform(&samples, &mut spectrum);

    let max_bin = spectrum
        .iter()
        .take(len / 2)
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(bin, _)| bin);
    assert_eq!(max_bin, Some(4));
    assert!((spectrum[4] - len as f32 / 2.0).abs() < 0.01);
    assert!((spectrum[len - 4] - spectrum[4]).abs() < 0.01);
}
