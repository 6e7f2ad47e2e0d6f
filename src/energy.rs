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
//! Module for the [`Energy`] number type.

use core::fmt::Debug;
use num_traits::{Float, NumCast};

/// Floating-point type used uniformly for samples, spectrum magnitudes, band
/// energies, and statistics. Implemented for `f32` and `f64`.
pub trait Energy: Float + Debug + Send + Sync + 'static {}

impl<T: Float + Debug + Send + Sync + 'static> Energy for T {}

/// Converts a count into the energy type.
///
/// Counts in this crate are buffer lengths, which are always representable
/// (possibly rounded) by `f32` and `f64`.
#[inline]
pub(crate) fn from_count<T: Energy>(count: usize) -> T {
    <T as NumCast>::from(count).expect("should be representable as float")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn counts_convert_to_floats() {
        check!(from_count::<f32>(0) == 0.0);
        check!(from_count::<f32>(40) == 40.0);
        check!(from_count::<f64>(1024) == 1024.0);
    }
}
