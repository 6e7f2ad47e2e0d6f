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
//! Module for [`BeatType`] and the fixed-size mapping [`PerBeatType`].

use core::fmt::{Display, Formatter};
use core::ops::{Index, IndexMut};

/// Frequency category of a beat.
///
/// The set is closed: every detector evaluates exactly these three
/// categories, always in the order of [`BeatType::ALL`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BeatType {
    /// Beats in the lower frequency range, such as kick drums.
    Low,
    /// Beats in the middle frequency range, such as snares.
    Mid,
    /// Beats in the upper frequency range, such as hi-hats.
    High,
}

impl BeatType {
    /// All beat types in evaluation order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Mid, Self::High];

    /// Number of beat types.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the position of the beat type in [`Self::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Mid => 1,
            Self::High => 2,
        }
    }
}

impl Display for BeatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        };
        f.pad(name)
    }
}

/// Holds one value of type `V` for every [`BeatType`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PerBeatType<V>([V; BeatType::COUNT]);

impl<V> PerBeatType<V> {
    /// Creates a new mapping from the values for [`BeatType::Low`],
    /// [`BeatType::Mid`], and [`BeatType::High`].
    pub const fn new(low: V, mid: V, high: V) -> Self {
        Self([low, mid, high])
    }

    /// Creates a new mapping where every beat type holds a copy of `value`.
    pub fn splat(value: V) -> Self
    where
        V: Clone,
    {
        Self([value.clone(), value.clone(), value])
    }

    /// Iterates all entries in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (BeatType, &V)> {
        BeatType::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterates all entries mutably in evaluation order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BeatType, &mut V)> {
        BeatType::ALL.into_iter().zip(self.0.iter_mut())
    }
}

impl<V> Index<BeatType> for PerBeatType<V> {
    type Output = V;

    fn index(&self, beat_type: BeatType) -> &Self::Output {
        &self.0[beat_type.index()]
    }
}

impl<V> IndexMut<BeatType> for PerBeatType<V> {
    fn index_mut(&mut self, beat_type: BeatType) -> &mut Self::Output {
        &mut self.0[beat_type.index()]
    }
}
