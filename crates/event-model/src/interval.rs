//! Clip windows on the source timeline.

use serde::{Deserialize, Serialize};

/// A half-open time range `[start, end)` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Window around an event at `t`, clamped so it never starts before zero.
    pub fn around(t: f64, before: f64, after: f64) -> Self {
        Self {
            start: (t - before).max(0.0),
            end: t + after,
        }
    }

    /// Length of the window in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `other` lies entirely within this window.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether `other` overlaps this window or touches its end.
    pub fn touches(&self, other: &Interval) -> bool {
        other.start <= self.end && self.start <= other.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around_clamps_at_zero() {
        let window = Interval::around(2.0, 7.0, 3.0);
        assert_eq!(window, Interval::new(0.0, 5.0));
        assert!((window.duration() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_around_keeps_full_width_away_from_zero() {
        let window = Interval::around(60.0, 7.0, 3.0);
        assert_eq!(window, Interval::new(53.0, 63.0));
        assert!((window.duration() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_touching_windows_count_as_overlap() {
        let a = Interval::new(0.0, 5.0);
        let b = Interval::new(5.0, 8.0);
        let c = Interval::new(5.1, 8.0);
        assert!(a.touches(&b));
        assert!(!a.touches(&c));
    }

    #[test]
    fn test_contains() {
        let outer = Interval::new(1.0, 10.0);
        assert!(outer.contains(&Interval::new(1.0, 10.0)));
        assert!(outer.contains(&Interval::new(2.0, 3.0)));
        assert!(!outer.contains(&Interval::new(0.5, 3.0)));
    }
}
