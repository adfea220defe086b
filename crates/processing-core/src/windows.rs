//! Clip window computation.
//!
//! # Algorithm
//!
//! 1. **Pad** each event time into a candidate `[max(0, t - before), t + after)`.
//! 2. **Sort** candidates by start (stable).
//! 3. **Sweep** with one accumulator: a candidate starting at or before the
//!    accumulator's end extends it; any other candidate closes it and opens a
//!    new one.
//!
//! The result is the fewest windows that cover every candidate, ordered and
//! pairwise disjoint. Touching windows are merged.

use fragreel_common::config::ClipConfig;
use fragreel_common::error::{FragreelError, FragreelResult};
use fragreel_event_model::event::EventRecord;
use fragreel_event_model::interval::Interval;

/// Seconds kept around each event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPadding {
    before: f64,
    after: f64,
}

impl ClipPadding {
    /// `before` must be non-negative and `after` positive, so every window is non-empty.
    pub fn new(before: f64, after: f64) -> FragreelResult<Self> {
        if !before.is_finite() || before < 0.0 {
            return Err(FragreelError::config(format!(
                "seconds before an event must be non-negative, got {before}"
            )));
        }
        if !after.is_finite() || after <= 0.0 {
            return Err(FragreelError::config(format!(
                "seconds after an event must be positive, got {after}"
            )));
        }
        Ok(Self { before, after })
    }

    pub fn from_config(config: &ClipConfig) -> FragreelResult<Self> {
        Self::new(config.seconds_before, config.seconds_after)
    }

    /// Candidate window for an event at `t`.
    pub fn window(&self, t: f64) -> Interval {
        Interval::around(t, self.before, self.after)
    }
}

impl Default for ClipPadding {
    fn default() -> Self {
        let config = ClipConfig::default();
        Self {
            before: config.seconds_before,
            after: config.seconds_after,
        }
    }
}

/// Compute merged clip windows for event times.
pub fn compute_windows(times: &[f64], padding: ClipPadding) -> FragreelResult<Vec<Interval>> {
    if times.is_empty() {
        return Err(FragreelError::empty_input("no events to build clips from"));
    }
    if let Some(&bad) = times.iter().find(|t| !t.is_finite() || **t < 0.0) {
        return Err(FragreelError::config(format!(
            "event times must be finite and non-negative, got {bad}"
        )));
    }

    let candidates: Vec<Interval> = times.iter().map(|&t| padding.window(t)).collect();
    let merged = merge_intervals(&candidates);

    tracing::debug!(
        events = times.len(),
        windows = merged.len(),
        before = padding.before,
        after = padding.after,
        "Merged event windows"
    );

    Ok(merged)
}

/// Merge overlapping or touching intervals. Merging merged output is a no-op.
pub fn merge_intervals(candidates: &[Interval]) -> Vec<Interval> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return vec![];
    };

    let mut merged = Vec::new();
    let acc = iter.fold(first, |mut acc, candidate| {
        if acc.touches(&candidate) {
            acc.end = acc.end.max(candidate.end);
            acc
        } else {
            merged.push(acc);
            candidate
        }
    });
    merged.push(acc);

    merged
}

/// Event times from an event table, skipping rows without a time.
///
/// Rows logged before the first frame marker have no time and cannot be
/// placed on the recording; each is reported and left out.
pub fn anchored_times(records: &[EventRecord]) -> FragreelResult<Vec<f64>> {
    let mut times = Vec::with_capacity(records.len());
    for record in records {
        match record.seconds {
            Some(seconds) => times.push(seconds),
            None => tracing::warn!(event = %record.event, "Skipping event without a frame"),
        }
    }

    if times.is_empty() {
        return Err(FragreelError::empty_input(format!(
            "none of {} event(s) has a timestamp",
            records.len()
        )));
    }

    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn padding(before: f64, after: f64) -> ClipPadding {
        ClipPadding::new(before, after).unwrap()
    }

    #[test]
    fn test_empty_times_is_an_error() {
        let err = compute_windows(&[], ClipPadding::default()).unwrap_err();
        assert!(matches!(err, FragreelError::EmptyInput { .. }));
    }

    #[test]
    fn test_single_event_clamped_on_the_left() {
        let windows = compute_windows(&[2.0], padding(7.0, 3.0)).unwrap();
        assert_eq!(windows, vec![Interval::new(0.0, 5.0)]);
    }

    #[test]
    fn test_single_event_full_width() {
        let windows = compute_windows(&[100.0], padding(7.0, 3.0)).unwrap();
        assert_eq!(windows.len(), 1);
        assert!((windows[0].duration() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_nearby_events_merge_into_one_window() {
        let windows = compute_windows(&[20.0, 25.0], padding(7.0, 3.0)).unwrap();
        assert_eq!(windows, vec![Interval::new(13.0, 28.0)]);
    }

    #[test]
    fn test_touching_windows_merge() {
        // [3, 13) and [13, 23)
        let windows = compute_windows(&[10.0, 20.0], padding(7.0, 3.0)).unwrap();
        assert_eq!(windows, vec![Interval::new(3.0, 23.0)]);
    }

    #[test]
    fn test_distant_events_stay_apart() {
        let windows = compute_windows(&[10.0, 40.0, 41.0, 90.0], padding(7.0, 3.0)).unwrap();
        assert_eq!(
            windows,
            vec![
                Interval::new(3.0, 13.0),
                Interval::new(33.0, 44.0),
                Interval::new(83.0, 93.0),
            ]
        );
    }

    #[test]
    fn test_unsorted_times_are_sorted_before_merging() {
        let windows = compute_windows(&[90.0, 10.0, 12.0], padding(7.0, 3.0)).unwrap();
        assert_eq!(
            windows,
            vec![Interval::new(3.0, 15.0), Interval::new(83.0, 93.0)]
        );
    }

    #[test]
    fn test_contained_candidate_does_not_shrink_window() {
        let merged = merge_intervals(&[Interval::new(0.0, 10.0), Interval::new(2.0, 4.0)]);
        assert_eq!(merged, vec![Interval::new(0.0, 10.0)]);
    }

    #[test]
    fn test_negative_or_non_finite_times_are_rejected() {
        for bad in [-20.0, f64::NAN, f64::INFINITY] {
            let err = compute_windows(&[5.0, bad], padding(7.0, 3.0)).unwrap_err();
            assert!(matches!(err, FragreelError::Config { .. }), "accepted {bad}");
        }
    }

    #[test]
    fn test_invalid_padding_is_rejected() {
        assert!(ClipPadding::new(-1.0, 3.0).is_err());
        assert!(ClipPadding::new(7.0, 0.0).is_err());
        assert!(ClipPadding::new(f64::NAN, 3.0).is_err());
    }

    #[test]
    fn test_anchored_times_skips_rows_without_seconds() {
        let records = vec![
            EventRecord {
                frame: None,
                seconds: None,
                event: "early".to_string(),
            },
            EventRecord {
                frame: Some(20),
                seconds: Some(2.0),
                event: "kill".to_string(),
            },
        ];
        assert_eq!(anchored_times(&records).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_anchored_times_with_nothing_usable_is_empty_input() {
        let records = vec![EventRecord {
            frame: None,
            seconds: None,
            event: "early".to_string(),
        }];
        let err = anchored_times(&records).unwrap_err();
        assert!(matches!(err, FragreelError::EmptyInput { .. }));
        assert!(matches!(
            anchored_times(&[]).unwrap_err(),
            FragreelError::EmptyInput { .. }
        ));
    }

    proptest! {
        #[test]
        fn prop_windows_are_ordered_and_disjoint(
            times in prop::collection::vec(0.0f64..3600.0, 1..64),
            before in 0.0f64..20.0,
            after in 0.1f64..20.0,
        ) {
            let windows = compute_windows(&times, padding(before, after)).unwrap();
            for pair in windows.windows(2) {
                prop_assert!(pair[0].start < pair[0].end);
                prop_assert!(pair[0].end < pair[1].start);
            }
        }

        #[test]
        fn prop_every_candidate_lies_in_exactly_one_window(
            times in prop::collection::vec(0.0f64..3600.0, 1..64),
            before in 0.0f64..20.0,
            after in 0.1f64..20.0,
        ) {
            let padding = padding(before, after);
            let windows = compute_windows(&times, padding).unwrap();
            for &t in &times {
                let candidate = padding.window(t);
                let holders = windows.iter().filter(|w| w.contains(&candidate)).count();
                prop_assert_eq!(holders, 1);
            }
        }

        #[test]
        fn prop_window_bounds_come_from_candidates(
            times in prop::collection::vec(0.0f64..3600.0, 1..64),
            before in 0.0f64..20.0,
            after in 0.1f64..20.0,
        ) {
            let padding = padding(before, after);
            let candidates: Vec<Interval> = times.iter().map(|&t| padding.window(t)).collect();
            for window in compute_windows(&times, padding).unwrap() {
                prop_assert!(candidates.iter().any(|c| c.start == window.start));
                prop_assert!(candidates.iter().any(|c| c.end == window.end));
            }
        }

        #[test]
        fn prop_merge_is_idempotent(
            times in prop::collection::vec(0.0f64..3600.0, 1..64),
            before in 0.0f64..20.0,
            after in 0.1f64..20.0,
        ) {
            let windows = compute_windows(&times, padding(before, after)).unwrap();
            prop_assert_eq!(merge_intervals(&windows), windows);
        }
    }
}
