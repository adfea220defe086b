//! Kill event location in demo logs.
//!
//! A demo log interleaves frame markers with printed game messages:
//!
//! ```text
//! Frame [10]
//! Print - Visor was railed by maddox
//! Frame [20]
//! ```
//!
//! The scan threads the most recent frame marker through the lines as fold
//! state. A kill line is tagged with that frame, or with `None` when no marker
//! has been seen yet. Marker lines are never tested as kill lines.

use fragreel_common::config::LocatorConfig;
use fragreel_common::error::{FragreelError, FragreelResult};
use fragreel_event_model::event::KillEvent;
use regex::{Regex, RegexBuilder};

/// Compiled frame marker and kill event patterns.
#[derive(Debug, Clone)]
pub struct LocatorPatterns {
    frame: Regex,
    event: Regex,
}

impl LocatorPatterns {
    /// Compile patterns. The frame pattern needs a capture group holding the
    /// frame number; the event pattern is matched case-insensitively.
    pub fn new(frame_pattern: &str, event_pattern: &str) -> FragreelResult<Self> {
        let frame = Regex::new(frame_pattern).map_err(|e| {
            FragreelError::config(format!("invalid frame pattern `{frame_pattern}`: {e}"))
        })?;
        if frame.captures_len() < 2 {
            return Err(FragreelError::config(format!(
                "frame pattern `{frame_pattern}` has no capture group for the frame number"
            )));
        }

        let event = RegexBuilder::new(event_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                FragreelError::config(format!("invalid event pattern `{event_pattern}`: {e}"))
            })?;

        Ok(Self { frame, event })
    }

    pub fn from_config(config: &LocatorConfig) -> FragreelResult<Self> {
        Self::new(&config.frame_pattern, &config.event_pattern)
    }

    /// Frame number if `line` is a frame marker.
    ///
    /// The outer `Option` says whether the line is a marker at all; the inner
    /// one is `None` when the captured number does not fit a `u64`.
    fn frame_marker(&self, line: &str) -> Option<Option<u64>> {
        let captures = self.frame.captures(line)?;
        Some(captures.get(1).and_then(|m| m.as_str().parse().ok()))
    }
}

/// Scans demo log lines for kill events.
pub struct EventLocator {
    patterns: LocatorPatterns,
}

impl EventLocator {
    pub fn new(patterns: LocatorPatterns) -> Self {
        Self { patterns }
    }

    /// Locator for the stock rail-kill patterns.
    pub fn with_defaults() -> FragreelResult<Self> {
        Ok(Self::new(LocatorPatterns::from_config(
            &LocatorConfig::default(),
        )?))
    }

    /// Locate kill events in order of appearance.
    pub fn locate<'a, I>(&self, lines: I) -> Vec<KillEvent>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (_, events) = lines.into_iter().enumerate().fold(
            (None, Vec::new()),
            |(current_frame, mut events), (index, raw)| {
                let line = raw.trim();

                if let Some(marker) = self.patterns.frame_marker(line) {
                    return match marker {
                        Some(frame) => (Some(frame), events),
                        None => {
                            tracing::warn!(
                                line = index + 1,
                                "Frame marker number out of range, keeping previous frame"
                            );
                            (current_frame, events)
                        }
                    };
                }

                if self.patterns.event.is_match(line) {
                    if current_frame.is_none() {
                        tracing::warn!(line = index + 1, "Kill event before any frame marker");
                    }
                    events.push(KillEvent::new(current_frame, line));
                }

                (current_frame, events)
            },
        );

        tracing::debug!(events = events.len(), "Located kill events");
        events
    }

    /// Locate kill events in a whole log text.
    pub fn locate_text(&self, content: &str) -> Vec<KillEvent> {
        self.locate(content.lines())
    }
}
