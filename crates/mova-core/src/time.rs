//! Time representation for word-level audio editing.
//!
//! All stored time values are seconds as `f64`. Display geometry is
//! derived from them through a pixels-per-second scale and never fed
//! back into the time domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open time span `[start, end)` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Start time in seconds (inclusive).
    pub start: f64,
    /// End time in seconds (exclusive).
    pub end: f64,
}

impl TimeSpan {
    /// Create a span from start and end times.
    #[inline]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Create a span from a start time and a duration.
    #[inline]
    pub fn from_start_duration(start: f64, duration: f64) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    /// Duration of the span in seconds.
    #[inline]
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the span in seconds.
    #[inline]
    pub fn midpoint(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Check if a time falls within this span.
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time < self.end
    }

    /// Check if two spans overlap.
    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Compute the intersection of two spans, if any.
    pub fn intersection(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s)", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_duration_and_midpoint() {
        let span = TimeSpan::new(0.4, 0.7);
        assert!((span.duration() - 0.3).abs() < 1e-9);
        assert!((span.midpoint() - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_contains_is_half_open() {
        let span = TimeSpan::new(0.0, 0.3);
        assert!(span.contains(0.0));
        assert!(span.contains(0.2));
        assert!(!span.contains(0.3));
    }

    #[test]
    fn test_overlap() {
        let a = TimeSpan::new(0.0, 2.0);
        let b = TimeSpan::new(1.0, 3.0);
        assert!(a.overlaps(b));

        let c = TimeSpan::new(2.0, 4.0);
        assert!(!a.overlaps(c), "touching spans do not overlap");

        let i = a.intersection(b).unwrap();
        assert_eq!(i, TimeSpan::new(1.0, 2.0));
    }
}
