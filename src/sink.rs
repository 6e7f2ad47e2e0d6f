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
//! Module for the [`BeatSink`] capability and [`SimpleBeatSink`].

use crate::beat_type::{BeatType, PerBeatType};
use crate::energy::Energy;
use alloc::vec::Vec;

/// Receives the beats a [`BeatDetector`] detects.
///
/// The detector calls the sink synchronously, zero to three times per frame
/// (at most once per [`BeatType`]). Implementations should return quickly as
/// they run on the thread that processes the audio.
///
/// It is implemented for every `FnMut(BeatType, T)`, for
/// `Vec<(BeatType, T)>`, which collects all beats, and for
/// [`SimpleBeatSink`].
///
/// [`BeatDetector`]: crate::BeatDetector
pub trait BeatSink<T> {
    /// Called when a beat of type `beat_type` fired. `energy` is the summed
    /// energy of all bands in that frame.
    fn on_beat(&mut self, beat_type: BeatType, energy: T);
}

impl<T, F> BeatSink<T> for F
where
    F: FnMut(BeatType, T),
{
    #[inline]
    fn on_beat(&mut self, beat_type: BeatType, energy: T) {
        self(beat_type, energy)
    }
}

impl<T> BeatSink<T> for Vec<(BeatType, T)> {
    #[inline]
    fn on_beat(&mut self, beat_type: BeatType, energy: T) {
        self.push((beat_type, energy));
    }
}

/// Sink that remembers which beat types fired and with which energy.
///
/// Call [`Self::reset`] before each frame if you only want to know about the
/// beats of the latest frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleBeatSink<T> {
    beat: PerBeatType<bool>,
    energy: PerBeatType<T>,
}

impl<T: Energy> SimpleBeatSink<T> {
    /// Creates a new sink without any beats.
    pub fn new() -> Self {
        Self {
            beat: PerBeatType::splat(false),
            energy: PerBeatType::splat(T::zero()),
        }
    }

    /// Returns whether a beat of the given type fired.
    #[inline]
    pub fn is_beat(&self, beat_type: BeatType) -> bool {
        self.beat[beat_type]
    }

    /// Returns whether any beat fired.
    #[inline]
    pub fn any_beat(&self) -> bool {
        self.beat.iter().any(|(_, &beat)| beat)
    }

    /// Returns the energy of the latest beat of the given type, or zero.
    #[inline]
    pub fn energy(&self, beat_type: BeatType) -> T {
        self.energy[beat_type]
    }

    /// Forgets all beats.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<T: Energy> Default for SimpleBeatSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Energy> BeatSink<T> for SimpleBeatSink<T> {
    fn on_beat(&mut self, beat_type: BeatType, energy: T) {
        self.beat[beat_type] = true;
        self.energy[beat_type] = energy;
    }
}
