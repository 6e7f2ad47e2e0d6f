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
//! Utilities for spectrum transforms.

use crate::energy::{from_count, Energy};

/// Maps a spectrum magnitude to a normalized decibel value in range
/// `0.0..=1.0`.
///
/// The magnitude is converted to `20 * log10(magnitude)` dB and clipped at
/// `-decibel_cutoff`. `-decibel_cutoff` dB maps to `0.0` and `0` dB (or more)
/// maps to `1.0`. Magnitudes that are zero, negative, or NaN map to `0.0`.
///
/// Magnitudes above `1.0` (positive dB) are clamped to `1.0` instead of
/// growing beyond the normalized range.
///
/// `decibel_cutoff` is typically [`crate::DetectorConfig::decibel_cutoff`]
/// and must be positive.
#[inline]
pub fn normalize_decibels<T: Energy>(magnitude: T, decibel_cutoff: T) -> T {
    debug_assert!(decibel_cutoff > T::zero());
    if magnitude.is_nan() || magnitude <= T::zero() {
        return T::zero();
    }

    let decibel = from_count::<T>(20) * magnitude.log10();
    let decibel = decibel.max(-decibel_cutoff);
    (T::one() + decibel / decibel_cutoff).min(T::one())
}

/// Applies [`normalize_decibels`] to every value of `spectrum`.
pub fn normalize_spectrum_decibels<T: Energy>(spectrum: &mut [T], decibel_cutoff: T) {
    spectrum
        .iter_mut()
        .for_each(|magnitude| *magnitude = normalize_decibels(*magnitude, decibel_cutoff));
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use float_cmp::approx_eq;

    #[test]
    fn test_normalize_decibels() {
        check!(normalize_decibels(1.0_f32, 125.0) == 1.0);
        // positive dB is clamped
        check!(normalize_decibels(10.0_f32, 125.0) == 1.0);
        check!(normalize_decibels(1e6_f64, 125.0) == 1.0);
        check!(approx_eq!(
            f32,
            normalize_decibels(0.1, 100.0),
            0.8,
            epsilon = 0.0001
        ));
        check!(approx_eq!(
            f64,
            normalize_decibels(1e-5, 125.0),
            0.2,
            epsilon = 0.0001
        ));
        // clipped
        check!(normalize_decibels(1e-9_f64, 125.0) == 0.0);
        check!(normalize_decibels(0.0_f32, 125.0) == 0.0);
        check!(normalize_decibels(-1.0_f32, 125.0) == 0.0);
        check!(normalize_decibels(f32::NAN, 125.0) == 0.0);
    }

    #[test]
    fn test_normalize_spectrum_decibels() {
        let mut spectrum = [1.0_f32, 0.0, 0.1];
        normalize_spectrum_decibels(&mut spectrum, 100.0);
        check!(spectrum[0] == 1.0);
        check!(spectrum[1] == 0.0);
        check!(approx_eq!(f32, spectrum[2], 0.8, epsilon = 0.0001));
    }
}
