//! Crossfade chains that stitch clips into one reel.
//!
//! N clips are joined by N-1 blends. The first blend takes raw clips 0 and 1;
//! every later blend takes the previous blend's result and the next raw clip:
//!
//! ```text
//! clip0 ─┐
//!        ├─ blend1 ─┐
//! clip1 ─┘          ├─ blend2 ─┐
//! clip2 ────────────┘          ├─ ... ─ blendN-1 (final)
//! clip3 ───────────────────────┘
//! ```
//!
//! Video and audio are two independent chains of the same shape.

use serde::{Deserialize, Serialize};

/// Input to a blend: a raw clip or the result of an earlier blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Operand {
    /// Raw clip by position in the clip list.
    Clip(usize),
    /// Output of blend `i` (1-based, matching the right-hand clip index).
    Intermediate(usize),
}

/// A single crossfade between the running chain and the next clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendStep {
    pub left: Operand,

    /// Index of the raw clip joined on the right.
    pub right: usize,

    /// Crossfade length in seconds.
    pub duration_secs: f64,

    /// Where the blend starts on the left operand's timeline.
    /// Audio crossfades anchor to the end of their left input and carry no offset.
    pub offset_secs: Option<f64>,

    pub output: Operand,
}

/// Full crossfade graph for N >= 2 clips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionPlan {
    pub video: Vec<BlendStep>,
    pub audio: Vec<BlendStep>,
    pub final_video: Operand,
    pub final_audio: Operand,

    /// Length of the stitched reel: the clip sum minus one transition per blend.
    pub total_duration_secs: f64,
}

impl TransitionPlan {
    /// Number of clips the plan stitches together.
    pub fn clip_count(&self) -> usize {
        self.video.len() + 1
    }

    /// Video blend offsets in chain order.
    pub fn video_offsets(&self) -> Vec<f64> {
        self.video.iter().filter_map(|step| step.offset_secs).collect()
    }
}

/// How the rendered clips become the final reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StitchPlan {
    /// A single clip is the reel as-is.
    PassThrough,
    /// Two or more clips joined by crossfades.
    Crossfade(TransitionPlan),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(left: Operand, right: usize, offset: Option<f64>) -> BlendStep {
        BlendStep {
            left,
            right,
            duration_secs: 0.5,
            offset_secs: offset,
            output: Operand::Intermediate(right),
        }
    }

    #[test]
    fn test_clip_count_and_offsets() {
        let plan = TransitionPlan {
            video: vec![
                step(Operand::Clip(0), 1, Some(4.5)),
                step(Operand::Intermediate(1), 2, Some(9.0)),
            ],
            audio: vec![
                step(Operand::Clip(0), 1, None),
                step(Operand::Intermediate(1), 2, None),
            ],
            final_video: Operand::Intermediate(2),
            final_audio: Operand::Intermediate(2),
            total_duration_secs: 14.0,
        };
        assert_eq!(plan.clip_count(), 3);
        assert_eq!(plan.video_offsets(), vec![4.5, 9.0]);
    }

    #[test]
    fn test_stitch_plan_serializes_with_mode_tag() {
        let json = serde_json::to_string(&StitchPlan::PassThrough).unwrap();
        assert_eq!(json, r#"{"mode":"pass_through"}"#);
    }
}
