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
//! Module for [`DetectorConfig`], the construction-time configuration of a
//! [`BeatDetector`].
//!
//! [`BeatDetector`]: crate::BeatDetector

use crate::beat_type::{BeatType, PerBeatType};
use crate::energy::{from_count, Energy};
use num_traits::NumCast;
use thiserror::Error;

/// Default length of the magnitude spectrum (and the raw sample frame).
pub const DEFAULT_SPECTRUM_LEN: usize = 1024;
/// Default number of bands the spectrum is partitioned into.
pub const DEFAULT_BAND_COUNT: usize = 64;
/// Default number of past frames in each band's trailing window.
pub const DEFAULT_HISTORY_LEN: usize = 40;
/// Default clipping level in decibel, see [`crate::util::normalize_decibels`].
pub const DEFAULT_DECIBEL_CUTOFF: f32 = 125.0;
/// Default number of frames a beat type stays silent after it fired.
pub const DEFAULT_REFRACTORY_FRAMES: usize = 1;

/// Errors for invalid [`DetectorConfig`]s.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The spectrum must hold at least one value.
    #[error("the spectrum length must not be zero")]
    ZeroSpectrumLength,
    /// There must be at least one band.
    #[error("the band count must not be zero")]
    ZeroBandCount,
    /// The trailing window of each band must hold at least one value.
    #[error("the history length must not be zero")]
    ZeroHistoryLength,
    /// Every band needs at least one spectrum value.
    #[error("{band_count} bands do not fit into a spectrum of length {spectrum_len}")]
    TooManyBands {
        spectrum_len: usize,
        band_count: usize,
    },
    /// Spectrum values would not be attributed to any band.
    #[error("a spectrum of length {spectrum_len} can't be split evenly into {band_count} bands")]
    UnevenBands {
        spectrum_len: usize,
        band_count: usize,
    },
    /// The threshold percentage must be finite and not negative.
    #[error("invalid threshold percentage {value} for {beat_type} beats")]
    InvalidThreshold { beat_type: BeatType, value: f64 },
    /// The decibel cutoff must be finite and positive.
    #[error("invalid decibel cutoff {0}")]
    InvalidDecibelCutoff(f64),
}

/// Detection parameters of a single [`BeatType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryParams<T> {
    /// A beat of this type fires if more than `cutoff / 2` (integer division)
    /// bands exceed their threshold in the same frame.
    pub cutoff: usize,
    /// Relative height of a band's threshold above its trailing average,
    /// in percent.
    pub threshold_percent: T,
}

impl<T: Energy> CategoryParams<T> {
    /// Creates new parameters.
    pub fn new(cutoff: usize, threshold_percent: T) -> Self {
        Self {
            cutoff,
            threshold_percent,
        }
    }

    /// Minimum number of exceeding bands so that the beat type fires.
    #[inline]
    pub(crate) const fn min_exceed_count(&self) -> usize {
        self.cutoff / 2 + 1
    }

    /// Threshold as factor, i.e., `threshold_percent / 100`.
    #[inline]
    pub(crate) fn threshold_factor(&self) -> T {
        self.threshold_percent / from_count(100)
    }
}

/// Construction-time configuration of a [`BeatDetector`]. All values are
/// immutable for the lifetime of the detector.
///
/// Use `..Default::default()` to only override some values:
/// ```rust
/// use spectral_beat_detector::DetectorConfig;
/// let config = DetectorConfig::<f32> {
///     spectrum_len: 512,
///     band_count: 32,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// [`BeatDetector`]: crate::BeatDetector
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig<T> {
    /// Length of the raw sample frame and of the magnitude spectrum.
    pub spectrum_len: usize,
    /// Number of contiguous bands the spectrum is partitioned into.
    pub band_count: usize,
    /// Number of past frames in the trailing window of each band.
    pub history_len: usize,
    /// Clipping level in decibel. Not used by the detection itself, but
    /// available to spectrum transforms via
    /// [`crate::util::normalize_decibels`].
    pub decibel_cutoff: T,
    /// Number of frames after a beat during which the same beat type can't
    /// fire again. `0` lets a beat type fire on consecutive frames.
    pub refractory_frames: usize,
    /// Detection parameters per beat type.
    pub categories: PerBeatType<CategoryParams<T>>,
}

impl<T: Energy> DetectorConfig<T> {
    /// Returns the number of spectrum values that form one band.
    #[inline]
    pub fn samples_per_band(&self) -> usize {
        self.spectrum_len / self.band_count.max(1)
    }

    /// Checks the invariants of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spectrum_len == 0 {
            return Err(ConfigError::ZeroSpectrumLength);
        }
        if self.band_count == 0 {
            return Err(ConfigError::ZeroBandCount);
        }
        if self.history_len == 0 {
            return Err(ConfigError::ZeroHistoryLength);
        }
        if self.band_count > self.spectrum_len {
            return Err(ConfigError::TooManyBands {
                spectrum_len: self.spectrum_len,
                band_count: self.band_count,
            });
        }
        if self.spectrum_len % self.band_count != 0 {
            return Err(ConfigError::UnevenBands {
                spectrum_len: self.spectrum_len,
                band_count: self.band_count,
            });
        }
        for (beat_type, params) in self.categories.iter() {
            let value = params.threshold_percent;
            if !value.is_finite() || value.is_sign_negative() {
                return Err(ConfigError::InvalidThreshold {
                    beat_type,
                    value: value.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        if !self.decibel_cutoff.is_finite() || self.decibel_cutoff <= T::zero() {
            return Err(ConfigError::InvalidDecibelCutoff(
                self.decibel_cutoff.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }
}

impl<T: Energy> Default for DetectorConfig<T> {
    fn default() -> Self {
        let percent = |value: usize| -> T { from_count(value) };
        Self {
            spectrum_len: DEFAULT_SPECTRUM_LEN,
            band_count: DEFAULT_BAND_COUNT,
            history_len: DEFAULT_HISTORY_LEN,
            decibel_cutoff: <T as NumCast>::from(DEFAULT_DECIBEL_CUTOFF)
                .unwrap_or_else(|| percent(125)),
            refractory_frames: DEFAULT_REFRACTORY_FRAMES,
            categories: PerBeatType::new(
                CategoryParams::new(4, percent(150)),
                CategoryParams::new(16, percent(130)),
                CategoryParams::new(32, percent(80)),
            ),
        }
    }
}
