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
//! Module for the [`SpectrumTransform`] capability.

/// Converts a frame of raw audio samples into a magnitude spectrum.
///
/// The detector never computes a spectrum itself but calls the transform once
/// per frame. The transform receives the raw samples and a buffer of the
/// **same length** that it must fill with magnitudes. Note that this differs
/// from the usual half-length spectrum of a real-valued FFT: transforms that
/// only produce `len / 2` meaningful bins should fill the remaining bins (for
/// example, with the mirrored upper half or zeroes).
///
/// It is implemented for every `FnMut(&[T], &mut [T])`:
/// ```rust
/// use spectral_beat_detector::SpectrumTransform;
/// let mut rectify = |samples: &[f32], spectrum: &mut [f32]| {
///     for (magnitude, sample) in spectrum.iter_mut().zip(samples) {
///         *magnitude = sample.abs();
///     }
/// };
/// let mut spectrum = [0.0; 2];
/// rectify.transform(&[-0.5, 0.25], &mut spectrum);
/// assert_eq!(spectrum, [0.5, 0.25]);
/// ```
pub trait SpectrumTransform<T> {
    /// Writes the magnitude spectrum of `samples` into `spectrum`.
    /// `samples.len() == spectrum.len()` always holds.
    fn transform(&mut self, samples: &[T], spectrum: &mut [T]);
}

impl<T, F> SpectrumTransform<T> for F
where
    F: FnMut(&[T], &mut [T]),
{
    #[inline]
    fn transform(&mut self, samples: &[T], spectrum: &mut [T]) {
        self(samples, spectrum)
    }
}
