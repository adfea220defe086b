//! Frame clock for server-side demo logs.
//!
//! Demo logs count time in server frames rather than seconds. The clock
//! converts a frame index to seconds at a fixed server rate. The result is an
//! approximation anchored to frame boundaries, never finer.

use crate::error::{FragreelError, FragreelResult};

/// Converts server frame indices to seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    frames_per_sec: f64,
}

impl FrameClock {
    /// Create a clock running at `frames_per_sec`. The rate must be finite and positive.
    pub fn new(frames_per_sec: f64) -> FragreelResult<Self> {
        if !frames_per_sec.is_finite() || frames_per_sec <= 0.0 {
            return Err(FragreelError::config(format!(
                "frame rate must be positive, got {frames_per_sec}"
            )));
        }
        Ok(Self { frames_per_sec })
    }

    /// Frames per second.
    pub fn rate(&self) -> f64 {
        self.frames_per_sec
    }

    /// Seconds elapsed at `frame`.
    pub fn frame_to_secs(&self, frame: u64) -> f64 {
        frame as f64 / self.frames_per_sec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_secs() {
        let clock = FrameClock::new(10.0).unwrap();
        assert!((clock.frame_to_secs(20) - 2.0).abs() < 1e-12);
        assert!((clock.frame_to_secs(1234) - 123.4).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        assert!(FrameClock::new(0.0).is_err());
        assert!(FrameClock::new(-5.0).is_err());
        assert!(FrameClock::new(f64::NAN).is_err());
    }
}
