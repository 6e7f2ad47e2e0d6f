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
//! Module for [`SlidingWindowStats`], i.e., statistics over the trailing
//! energy history of a single band.

use crate::energy::{from_count, Energy};
use ringbuffer::{AllocRingBuffer, RingBuffer};

/// Trailing-window tracker of a series of energy values. It reports a running
/// average and the mean absolute deviation (dispersion) of the window.
///
/// The average always divides the running sum by the full capacity of the
/// window, even if fewer values have been inserted so far. This keeps the
/// average low during warm-up, which makes the first frames of a detection
/// run more sensitive. The dispersion in contrast is computed over the values
/// that are actually present in the window.
///
/// The dispersion is recomputed from the live window on every insertion,
/// i.e., each insertion is `O(capacity)`.
#[derive(Debug, Clone)]
pub struct SlidingWindowStats<T: Energy> {
    window: AllocRingBuffer<T>,
    /// Capacity of the window as float, to not convert it on every insertion.
    capacity: T,
    sum: T,
    average: T,
    dispersion: T,
}

impl<T: Energy> SlidingWindowStats<T> {
    /// Creates a new window that holds the `capacity` most recent values.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must not be zero");
        Self {
            window: AllocRingBuffer::new(capacity),
            capacity: from_count(capacity),
            sum: T::zero(),
            average: T::zero(),
            dispersion: T::zero(),
        }
    }

    /// Adds a new value to the window. Once the window is full, the oldest
    /// value gets evicted.
    pub fn add_sample(&mut self, value: T) {
        let evicted = if self.window.is_full() {
            self.window.front().copied().unwrap_or_else(T::zero)
        } else {
            T::zero()
        };
        self.window.push(value);

        self.sum = self.sum + (value - evicted);
        self.average = self.sum / self.capacity;

        let deviation_sum = self
            .window
            .iter()
            .map(|&x| (x - self.average).abs())
            .fold(T::zero(), |acc, x| acc + x);
        self.dispersion = deviation_sum / from_count(self.window.len());
    }

    /// Returns the running average. During warm-up, this is the sum of all
    /// values divided by [`Self::capacity`].
    #[inline]
    pub fn average(&self) -> T {
        self.average
    }

    /// Returns the mean absolute deviation of the values in the window from
    /// [`Self::average`].
    #[inline]
    pub fn dispersion(&self) -> T {
        self.dispersion
    }

    /// Returns the number of values in the window, which is the number of
    /// values ever inserted, capped at [`Self::capacity`].
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.window.len()
    }

    /// Returns the maximum number of values in the window.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use float_cmp::approx_eq;

    #[test]
    fn new_window_is_empty() {
        let stats = SlidingWindowStats::<f32>::new(4);
        check!(stats.sample_count() == 0);
        check!(stats.capacity() == 4);
        check!(stats.average() == 0.0);
        check!(stats.dispersion() == 0.0);
    }

    #[test]
    #[should_panic]
    fn zero_capacity_is_rejected() {
        let _ = SlidingWindowStats::<f32>::new(0);
    }

    #[test]
    fn identical_values_have_no_dispersion() {
        for capacity in [1, 2, 7, 40] {
            let mut stats = SlidingWindowStats::<f64>::new(capacity);
            for _ in 0..capacity {
                stats.add_sample(3.25);
            }
            check!(stats.average() == 3.25);
            check!(stats.dispersion() == 0.0);
            check!(stats.sample_count() == capacity);
        }
    }

    #[test]
    fn average_divides_by_capacity_during_warmup() {
        let mut stats = SlidingWindowStats::<f32>::new(4);

        stats.add_sample(8.0);
        check!(stats.sample_count() == 1);
        check!(stats.average() == 2.0);
        // |8 - 2|
        check!(stats.dispersion() == 6.0);

        stats.add_sample(4.0);
        check!(stats.sample_count() == 2);
        check!(stats.average() == 3.0);
        // (|8 - 3| + |4 - 3|) / 2
        check!(stats.dispersion() == 3.0);
    }

    #[test]
    fn oldest_value_is_evicted_once_full() {
        let mut stats = SlidingWindowStats::<f32>::new(2);
        stats.add_sample(10.0);
        stats.add_sample(5.0);
        check!(stats.average() == 7.5);
        check!(stats.dispersion() == 2.5);

        // evicts 10.0
        stats.add_sample(50.0);
        check!(stats.sample_count() == 2);
        check!(stats.average() == 27.5);
        check!(stats.dispersion() == 22.5);

        // evicts 5.0
        stats.add_sample(1.0);
        check!(stats.average() == 25.5);
        check!(stats.dispersion() == 24.5);
    }

    #[test]
    fn single_outlier_changes_average_by_at_most_value_per_capacity() {
        const CAPACITY: usize = 16;
        let mut stats = SlidingWindowStats::<f64>::new(CAPACITY);
        for _ in 0..CAPACITY {
            stats.add_sample(1.0);
        }

        let outlier = 1000.0;
        let before = stats.average();
        stats.add_sample(outlier);
        let change = (stats.average() - before).abs();
        check!(change <= outlier / CAPACITY as f64);

        // Once the outlier is evicted, the average is back to the baseline.
        for _ in 0..CAPACITY {
            stats.add_sample(1.0);
        }
        check!(stats.average() == before);
    }

    #[test]
    fn window_forgets_old_values() {
        let mut stats = SlidingWindowStats::<f32>::new(3);
        for value in [100.0, 100.0, 100.0, 2.0, 2.0, 2.0] {
            stats.add_sample(value);
        }
        check!(approx_eq!(f32, stats.average(), 2.0, epsilon = 0.0001));
        check!(approx_eq!(f32, stats.dispersion(), 0.0, epsilon = 0.0001));
    }
}
