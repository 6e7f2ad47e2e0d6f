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
//! spectral-beat-detector detects beats in audio frames and classifies them
//! into low, mid, and high beats. It is written in Rust and `no_std`
//! compatible (it needs `alloc`).
//!
//! ## How it works
//!
//! For every frame of raw samples, a caller-provided [`SpectrumTransform`]
//! (typically an FFT) produces a magnitude spectrum. The spectrum is
//! partitioned into equally sized bands. Each band keeps a trailing history
//! of its energy in a [`SlidingWindowStats`], which yields an adaptive
//! baseline (average and mean absolute deviation). A band exceeds its
//! threshold if its current energy is noticeably above that baseline. The
//! [`BeatType`]s differ in how far above the baseline a band must be and in
//! how many bands must exceed at the same time. Detected beats are reported
//! synchronously to a [`BeatSink`].
//!
//! A beat type that fired is silent for the configured number of refractory
//! frames.
//!
//! ## Example
//! ```rust
//! use spectral_beat_detector::{BeatDetector, BeatType, DetectorConfig, SimpleBeatSink};
//!
//! // Use an FFT here, such as `rustfft`.
//! let transform = |samples: &[f32], spectrum: &mut [f32]| {
//!     for (magnitude, sample) in spectrum.iter_mut().zip(samples) {
//!         *magnitude = sample.abs();
//!     }
//! };
//! let mut detector = BeatDetector::new(transform, DetectorConfig::default()).unwrap();
//!
//! let frame = [0.0; 1024];
//! let mut sink = SimpleBeatSink::new();
//! detector.process(&frame, &mut sink).unwrap();
//! assert!(!sink.is_beat(BeatType::Low));
//! ```
//!
//! ## Live audio input
//! With the `recording` feature, `recording::start_detector_thread` feeds
//! the audio of an input device into a detector.
//!
//! ## Threading
//! The detector does all work synchronously on the calling thread.
//! [`BeatDetector::process`] takes `&mut self`, so sharing a detector across
//! threads requires a lock.

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod beat_detector;
mod beat_type;
mod config;
mod energy;
mod sink;
mod spectrum;
mod state;
mod window_stats;

pub mod util;

#[cfg(feature = "recording")]
pub mod recording;

#[cfg(test)]
mod test_utils;

pub use beat_detector::{BeatDetector, FrameError};
pub use beat_type::{BeatType, PerBeatType};
pub use config::{
    CategoryParams, ConfigError, DetectorConfig, DEFAULT_BAND_COUNT, DEFAULT_DECIBEL_CUTOFF,
    DEFAULT_HISTORY_LEN, DEFAULT_REFRACTORY_FRAMES, DEFAULT_SPECTRUM_LEN,
};
pub use energy::Energy;
pub use sink::{BeatSink, SimpleBeatSink};
pub use spectrum::SpectrumTransform;
pub use state::{CategoryFrameStats, DetectorState};
pub use window_stats::SlidingWindowStats;
