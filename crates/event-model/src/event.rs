//! Kill events and the CSV event table.
//!
//! The event table is the hand-off between log scanning and clip rendering.
//! Its header and column order are a stable contract:
//!
//! ```text
//! frame,seconds,event
//! 20,2.00,"Print - Anarki was railed by maddox"
//! ```
//!
//! Events seen before any frame marker have empty `frame` and `seconds`.

use std::path::Path;

use fragreel_common::clock::FrameClock;
use fragreel_common::error::{FragreelError, FragreelResult};

/// Header line of the event table.
pub const EVENT_TABLE_HEADER: &str = "frame,seconds,event";

/// A kill event located in a demo log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillEvent {
    /// Most recent server frame before the event, if any marker was seen.
    pub frame: Option<u64>,

    /// The matching log line, trimmed.
    pub text: String,
}

impl KillEvent {
    pub fn new(frame: Option<u64>, text: impl Into<String>) -> Self {
        Self {
            frame,
            text: text.into(),
        }
    }

    /// Event time in seconds at full precision.
    pub fn time_secs(&self, clock: &FrameClock) -> Option<f64> {
        self.frame.map(|frame| clock.frame_to_secs(frame))
    }

    /// Convert to an event table row.
    pub fn to_record(&self, clock: &FrameClock) -> EventRecord {
        EventRecord {
            frame: self.frame,
            seconds: self.time_secs(clock),
            event: self.text.clone(),
        }
    }
}

/// One row of the event table.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub frame: Option<u64>,
    pub seconds: Option<f64>,
    pub event: String,
}

/// Render rows as event table text, header included.
pub fn format_event_table(records: &[EventRecord]) -> String {
    let mut output = String::from(EVENT_TABLE_HEADER);
    output.push('\n');

    for record in records {
        let frame = record.frame.map(|f| f.to_string()).unwrap_or_default();
        let seconds = record
            .seconds
            .map(|s| format!("{s:.2}"))
            .unwrap_or_default();
        output.push_str(&format!(
            "{frame},{seconds},\"{}\"\n",
            record.event.replace('"', "\"\"")
        ));
    }

    output
}

/// Parse event table text produced by [`format_event_table`].
pub fn parse_event_table(content: &str) -> FragreelResult<Vec<EventRecord>> {
    let mut lines = content.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == EVENT_TABLE_HEADER => {}
        Some((_, header)) => {
            return Err(FragreelError::event_table(
                1,
                format!("expected header `{EVENT_TABLE_HEADER}`, found `{}`", header.trim()),
            ));
        }
        None => return Err(FragreelError::event_table(1, "missing header")),
    }

    let mut records = Vec::new();
    for (index, line) in lines {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_row(line, line_no)?);
    }

    Ok(records)
}

fn parse_row(line: &str, line_no: usize) -> FragreelResult<EventRecord> {
    let mut fields = line.splitn(3, ',');
    let (Some(frame), Some(seconds), Some(event)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(FragreelError::event_table(
            line_no,
            "expected three comma-separated fields",
        ));
    };

    let frame = match frame.trim() {
        "" => None,
        raw => Some(raw.parse::<u64>().map_err(|e| {
            FragreelError::event_table(line_no, format!("invalid frame `{raw}`: {e}"))
        })?),
    };

    let seconds = match seconds.trim() {
        "" => None,
        raw => {
            let value = raw.parse::<f64>().map_err(|e| {
                FragreelError::event_table(line_no, format!("invalid seconds `{raw}`: {e}"))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(FragreelError::event_table(
                    line_no,
                    format!("seconds must be a non-negative number, got `{raw}`"),
                ));
            }
            Some(value)
        }
    };

    Ok(EventRecord {
        frame,
        seconds,
        event: unquote(event.trim_end_matches(['\r', '\n'])),
    })
}

fn unquote(field: &str) -> String {
    match field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => field.to_string(),
    }
}

/// Read and parse an event table from disk.
pub fn read_event_table(path: &Path) -> FragreelResult<Vec<EventRecord>> {
    if !path.exists() {
        return Err(FragreelError::missing_input(path));
    }
    let content = std::fs::read_to_string(path)?;
    parse_event_table(&content)
}

/// Write an event table to disk, creating parent directories.
pub fn write_event_table(path: &Path, records: &[EventRecord]) -> FragreelResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format_event_table(records))?;
    Ok(())
}
