//! Cached lookup of the grid interval containing a coordinate.

use super::fgr;
use std::ops::Add;

/// Counts of how often the cached interval could be reused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcceleratorStatistics {
    pub hits: u64,
    pub misses: u64,
}

impl Add for AcceleratorStatistics {
    type Output = Self;
    fn add(self, other: Self) -> Self::Output {
        Self {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
        }
    }
}

/// Remembers the most recently located interval along one axis, so that
/// sequences of nearby lookups avoid a full binary search.
///
/// Lookups mutate the cache, so an accelerator must not be shared between
/// independent query streams.
#[derive(Clone, Debug, Default)]
pub struct IntervalAccelerator {
    cached_index: usize,
    statistics: AcceleratorStatistics,
}

impl IntervalAccelerator {
    /// Creates a new accelerator with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the index `i` of the interval `[coords[i], coords[i+1])` containing `x`.
    ///
    /// The result is always a valid interval index in `0..coords.len()-1`, so
    /// a coordinate at or beyond the upper end maps to the last interval and
    /// one below the lower end maps to the first.
    ///
    /// # Panics
    ///
    /// If `coords` has fewer than two elements.
    pub fn find(&mut self, coords: &[fgr], x: fgr) -> usize {
        let size = coords.len();
        assert!(size >= 2, "Cannot search axis with fewer than two points");
        let last_interval = size - 2;

        let cached = self.cached_index.min(last_interval);
        let index = if x < coords[cached] {
            self.statistics.misses += 1;
            search_interval(coords, x, 0, cached)
        } else if cached < last_interval && x >= coords[cached + 1] {
            self.statistics.misses += 1;
            search_interval(coords, x, cached + 1, last_interval)
        } else {
            self.statistics.hits += 1;
            cached
        };
        self.cached_index = index;
        index
    }

    /// Returns the index of the most recently found interval.
    pub fn cached_index(&self) -> usize {
        self.cached_index
    }

    /// Returns the hit and miss counts accumulated so far.
    pub fn statistics(&self) -> AcceleratorStatistics {
        self.statistics
    }

    /// Clears the cached interval and the statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Binary search for the interval containing `x`, restricted to interval
/// indices in `lower..=upper`.
fn search_interval(coords: &[fgr], x: fgr, lower: usize, upper: usize) -> usize {
    // Number of candidate lower edges not exceeding x
    let n_below = coords[lower..=upper].partition_point(|&coord| coord <= x);
    (lower + n_below.saturating_sub(1)).min(upper)
}
