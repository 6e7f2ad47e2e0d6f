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
//! Module for [`DetectorState`].

use crate::beat_type::{BeatType, PerBeatType};
use crate::config::{ConfigError, DetectorConfig};
use crate::energy::Energy;
use crate::window_stats::SlidingWindowStats;
use alloc::vec;
use alloc::vec::Vec;

/// Per-frame statistics of a single [`BeatType`], collected while evaluating
/// the thresholds of all bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryFrameStats<T> {
    /// Number of bands whose current energy exceeded their threshold.
    pub exceed_count: usize,
    /// Sum of the trailing averages of all bands.
    pub mean_sum: T,
    /// Sum of the current energies of all bands. This is the energy reported
    /// when the beat type fires.
    pub peak_sum: T,
}

impl<T: Energy> Default for CategoryFrameStats<T> {
    fn default() -> Self {
        Self {
            exceed_count: 0,
            mean_sum: T::zero(),
            peak_sum: T::zero(),
        }
    }
}

/// The configuration and all mutable state a [`BeatDetector`] operates on.
///
/// It is created once and mutated in place on every frame. It has no
/// behavior on its own, besides initialization and accessors.
///
/// [`BeatDetector`]: crate::BeatDetector
#[derive(Debug, Clone)]
pub struct DetectorState<T: Energy> {
    // read-only fields
    pub(crate) config: DetectorConfig<T>,
    samples_per_band: usize,
    // mutable fields
    /// Trailing energy window per band.
    pub(crate) history: Vec<SlidingWindowStats<T>>,
    /// Scratch buffer for the spectrum of the current frame.
    pub(crate) spectrum: Vec<T>,
    /// Energy per band of the current frame.
    pub(crate) band_energy: Vec<T>,
    /// Frames remaining until a beat type may fire again.
    pub(crate) refractory: PerBeatType<usize>,
    /// Energy of the latest beat per beat type.
    pub(crate) last_energy: PerBeatType<T>,
    pub(crate) frame_stats: PerBeatType<CategoryFrameStats<T>>,
    pub(crate) frame_count: u64,
}

impl<T: Energy> DetectorState<T> {
    /// Validates the configuration and allocates all buffers.
    pub fn new(config: DetectorConfig<T>) -> Result<Self, ConfigError> {
        config.validate()?;

        let samples_per_band = config.samples_per_band();
        let history = (0..config.band_count)
            .map(|_| SlidingWindowStats::new(config.history_len))
            .collect::<Vec<_>>();

        log::debug!(
            "Created detector state: spectrum_len={}, band_count={}, samples_per_band={}, history_len={}",
            config.spectrum_len,
            config.band_count,
            samples_per_band,
            config.history_len
        );

        Ok(Self {
            samples_per_band,
            history,
            spectrum: vec![T::zero(); config.spectrum_len],
            band_energy: vec![T::zero(); config.band_count],
            refractory: PerBeatType::splat(0),
            last_energy: PerBeatType::splat(T::zero()),
            frame_stats: PerBeatType::default(),
            frame_count: 0,
            config,
        })
    }

    /// Returns the configuration.
    #[inline]
    pub const fn config(&self) -> &DetectorConfig<T> {
        &self.config
    }

    /// Returns the number of spectrum values per band.
    #[inline]
    pub const fn samples_per_band(&self) -> usize {
        self.samples_per_band
    }

    /// Returns the clipping level in decibel.
    #[inline]
    pub fn decibel_cutoff(&self) -> T {
        self.config.decibel_cutoff
    }

    /// Returns the spectrum of the latest frame.
    #[inline]
    pub fn spectrum(&self) -> &[T] {
        &self.spectrum
    }

    /// Returns the energy per band of the latest frame.
    #[inline]
    pub fn band_energies(&self) -> &[T] {
        &self.band_energy
    }

    /// Returns the trailing-window statistics of the given band.
    ///
    /// # Panics
    /// Panics if `band` is out of range.
    #[inline]
    pub fn band_stats(&self, band: usize) -> &SlidingWindowStats<T> {
        &self.history[band]
    }

    /// Returns the remaining frames until the beat type may fire again.
    #[inline]
    pub fn refractory_counter(&self, beat_type: BeatType) -> usize {
        self.refractory[beat_type]
    }

    /// Returns the energy of the latest beat of the given type, or zero if
    /// there was none yet.
    #[inline]
    pub fn last_energy(&self, beat_type: BeatType) -> T {
        self.last_energy[beat_type]
    }

    /// Returns the statistics of the latest frame for the given beat type.
    #[inline]
    pub fn frame_stats(&self, beat_type: BeatType) -> &CategoryFrameStats<T> {
        &self.frame_stats[beat_type]
    }

    /// Returns the number of processed frames.
    #[inline]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
