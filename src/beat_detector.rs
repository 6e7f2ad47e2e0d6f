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
//! Module for [`BeatDetector`].

use crate::beat_type::{BeatType, PerBeatType};
use crate::config::{ConfigError, DetectorConfig};
use crate::energy::{from_count, Energy};
use crate::sink::BeatSink;
use crate::spectrum::SpectrumTransform;
use crate::state::{CategoryFrameStats, DetectorState};
use thiserror::Error;

/// Gain applied to every spectrum magnitude before it is summed into its band.
const BAND_ENERGY_GAIN: usize = 10;

/// Errors when processing a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The frame doesn't have the configured spectrum length.
    #[error("the frame has {actual} samples but the detector expects {expected}")]
    InvalidFrameLength { expected: usize, actual: usize },
}

/// Beat detector that classifies beats into [`BeatType`]s by comparing the
/// spectral energy of each band against the band's trailing history.
///
/// For each frame, the detector
/// 1. lets the refractory counters of all beat types count down,
/// 2. obtains the magnitude spectrum from the [`SpectrumTransform`],
/// 3. sums the (amplified) magnitudes of each band and normalizes them by
///    the band width, which yields the band's current energy,
/// 4. feeds the energy into the band's [`SlidingWindowStats`],
/// 5. counts per beat type the bands whose energy exceeds
///    `dispersion / average + average * threshold_percent / 100`,
/// 6. fires every beat type that is not in its refractory period and whose
///    count exceeds `cutoff / 2`.
///
/// Bands whose trailing average is zero never exceed their threshold.
///
/// ## Example
/// ```rust
/// use spectral_beat_detector::{BeatDetector, BeatType, DetectorConfig};
///
/// let config = DetectorConfig::<f32> {
///     spectrum_len: 8,
///     band_count: 4,
///     ..Default::default()
/// };
/// // Regularly feed frames of `spectrum_len` samples into the detector. A
/// // real application plugs in an FFT here.
/// let rectify = |samples: &[f32], spectrum: &mut [f32]| {
///     for (magnitude, sample) in spectrum.iter_mut().zip(samples) {
///         *magnitude = sample.abs();
///     }
/// };
/// let mut detector = BeatDetector::new(rectify, config).unwrap();
///
/// let mut beats = Vec::new();
/// detector.process(&[8.0; 8], &mut beats).unwrap();
/// // Four bands with an energy of 80 each. Only the low beat type needs as
/// // few as three exceeding bands.
/// assert_eq!(beats, [(BeatType::Low, 320.0)]);
/// ```
///
/// [`SlidingWindowStats`]: crate::SlidingWindowStats
#[derive(Debug, Clone)]
pub struct BeatDetector<T: Energy, F> {
    transform: F,
    state: DetectorState<T>,
}

impl<T: Energy, F: SpectrumTransform<T>> BeatDetector<T, F> {
    /// Creates a new detector that obtains the spectrum of each frame from
    /// `transform`.
    pub fn new(transform: F, config: DetectorConfig<T>) -> Result<Self, ConfigError> {
        let state = DetectorState::new(config)?;
        Ok(Self { transform, state })
    }

    /// Processes the next frame of raw samples and reports all beats in it to
    /// `sink`. `samples` must have the configured spectrum length.
    ///
    /// This function is supposed to be called once per audio frame, in the
    /// order the frames were captured.
    pub fn process(
        &mut self,
        samples: &[T],
        sink: &mut impl BeatSink<T>,
    ) -> Result<(), FrameError> {
        let expected = self.state.config().spectrum_len;
        if samples.len() != expected {
            return Err(FrameError::InvalidFrameLength {
                expected,
                actual: samples.len(),
            });
        }

        self.state.frame_count += 1;
        let blocked = self.tick_refractory_counters();

        self.transform.transform(samples, &mut self.state.spectrum);
        self.update_band_energies();
        self.evaluate_thresholds();
        self.fire_beats(blocked, sink);

        log::trace!(
            "frame {}: exceed counts low={} mid={} high={}",
            self.state.frame_count,
            self.state.frame_stats[BeatType::Low].exceed_count,
            self.state.frame_stats[BeatType::Mid].exceed_count,
            self.state.frame_stats[BeatType::High].exceed_count,
        );
        Ok(())
    }

    /// Returns the state of the detector.
    #[inline]
    pub const fn state(&self) -> &DetectorState<T> {
        &self.state
    }

    /// Returns the configuration of the detector.
    #[inline]
    pub const fn config(&self) -> &DetectorConfig<T> {
        self.state.config()
    }

    /// Returns the spectrum transform.
    #[inline]
    pub const fn transform(&self) -> &F {
        &self.transform
    }

    /// Counts the refractory counters of all beat types down by one. Returns
    /// which beat types were still in their refractory period when the frame
    /// began. These can't fire in this frame.
    fn tick_refractory_counters(&mut self) -> PerBeatType<bool> {
        let mut blocked = PerBeatType::splat(false);
        for (beat_type, counter) in self.state.refractory.iter_mut() {
            if *counter > 0 {
                blocked[beat_type] = true;
                *counter -= 1;
            }
        }
        blocked
    }

    /// Sums the spectrum into the bands and adds the resulting energy to the
    /// history of each band.
    fn update_band_energies(&mut self) {
        let state = &mut self.state;
        let samples_per_band = state.samples_per_band();
        let gain = from_count::<T>(BAND_ENERGY_GAIN);
        let band_width = from_count::<T>(samples_per_band);

        // Only the current frame must contribute to the band energy.
        state.band_energy.fill(T::zero());

        let bands = state
            .spectrum
            .chunks_exact(samples_per_band)
            .zip(state.band_energy.iter_mut())
            .zip(state.history.iter_mut());
        for ((magnitudes, energy), history) in bands {
            let sum = magnitudes
                .iter()
                .fold(T::zero(), |acc, &magnitude| acc + magnitude * gain);
            *energy = sum / band_width;
            history.add_sample(*energy);
        }
    }

    /// Collects the [`CategoryFrameStats`] of all beat types.
    fn evaluate_thresholds(&mut self) {
        let state = &mut self.state;
        let config = &state.config;

        for (beat_type, stats) in state.frame_stats.iter_mut() {
            let threshold_factor = config.categories[beat_type].threshold_factor();
            let mut frame_stats = CategoryFrameStats::default();

            for (band, (&energy, history)) in
                state.band_energy.iter().zip(state.history.iter()).enumerate()
            {
                let average = history.average();
                frame_stats.mean_sum = frame_stats.mean_sum + average;
                frame_stats.peak_sum = frame_stats.peak_sum + energy;

                if average == T::zero() {
                    log::trace!("{beat_type}: skipping band {band} with zero average");
                    continue;
                }
                let threshold = history.dispersion() / average + average * threshold_factor;
                // A NaN threshold compares as false.
                if energy > threshold {
                    frame_stats.exceed_count += 1;
                }
            }

            *stats = frame_stats;
        }
    }

    /// Fires all beat types that are not blocked and whose exceed count is
    /// high enough.
    fn fire_beats(&mut self, blocked: PerBeatType<bool>, sink: &mut impl BeatSink<T>) {
        let state = &mut self.state;
        for beat_type in BeatType::ALL {
            if blocked[beat_type] {
                continue;
            }
            let stats = state.frame_stats[beat_type];
            let params = state.config.categories[beat_type];
            if stats.exceed_count < params.min_exceed_count() {
                continue;
            }

            state.refractory[beat_type] = state.config.refractory_frames;
            state.last_energy[beat_type] = stats.peak_sum;
            log::debug!(
                "frame {}: {beat_type} beat with energy {:?} ({} of {} bands exceeded)",
                state.frame_count,
                stats.peak_sum,
                stats.exceed_count,
                state.config.band_count
            );
            sink.on_beat(beat_type, stats.peak_sum);
        }
    }
}
