//! Crossfade chain construction.
//!
//! Every blend overlaps the tail of the running chain with the head of the
//! next clip, so the combined timeline grows by `d_i - transition` per clip
//! instead of `d_i`. The offset of blend `i` is measured on that shrunken
//! timeline:
//!
//! ```text
//! cumulative_0 = d_0
//! offset_i     = cumulative_{i-1} - transition
//! cumulative_i = cumulative_{i-1} + d_i - transition
//! ```

use fragreel_common::error::{FragreelError, FragreelResult};
use fragreel_event_model::transition::{BlendStep, Operand, StitchPlan, TransitionPlan};

/// Which timeline a blend chain is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// Video blends start at an explicit offset into the left operand.
    Offset,
    /// Audio crossfades always overlap the left operand's tail.
    Tail,
}

/// Build the video and audio crossfade chains for two or more clips.
pub fn build_transition_plan(
    clip_durations: &[f64],
    transition_secs: f64,
) -> FragreelResult<TransitionPlan> {
    validate_transition(transition_secs)?;

    if clip_durations.len() < 2 {
        return Err(FragreelError::empty_input(format!(
            "a crossfade needs at least two clips, got {}",
            clip_durations.len()
        )));
    }

    // NaN durations fail the comparison too.
    if let Some((clip_index, &clip_secs)) = clip_durations
        .iter()
        .enumerate()
        .find(|&(_, &d)| !(d > transition_secs))
    {
        return Err(FragreelError::DegenerateTransition {
            clip_index,
            clip_secs,
            transition_secs,
        });
    }

    let (video, total_duration_secs) = blend_chain(clip_durations, transition_secs, Anchor::Offset);
    let (audio, _) = blend_chain(clip_durations, transition_secs, Anchor::Tail);
    let last = Operand::Intermediate(clip_durations.len() - 1);

    tracing::debug!(
        clips = clip_durations.len(),
        transition_secs,
        total_duration_secs,
        "Built transition plan"
    );

    Ok(TransitionPlan {
        video,
        audio,
        final_video: last,
        final_audio: last,
        total_duration_secs,
    })
}

/// Decide how clips become the reel: one clip passes through untouched,
/// two or more are crossfaded.
pub fn plan_stitch(clip_durations: &[f64], transition_secs: f64) -> FragreelResult<StitchPlan> {
    match clip_durations.len() {
        0 => Err(FragreelError::empty_input("no clips to stitch")),
        1 => Ok(StitchPlan::PassThrough),
        _ => build_transition_plan(clip_durations, transition_secs).map(StitchPlan::Crossfade),
    }
}

fn validate_transition(transition_secs: f64) -> FragreelResult<()> {
    if transition_secs.is_finite() && transition_secs > 0.0 {
        Ok(())
    } else {
        Err(FragreelError::config(format!(
            "transition duration must be positive, got {transition_secs}"
        )))
    }
}

/// Left fold over clips 1..N, returning the steps and the final cumulative duration.
fn blend_chain(durations: &[f64], transition: f64, anchor: Anchor) -> (Vec<BlendStep>, f64) {
    durations.iter().enumerate().skip(1).fold(
        (Vec::with_capacity(durations.len() - 1), durations[0]),
        |(mut steps, cumulative), (i, &duration)| {
            let left = if i == 1 {
                Operand::Clip(0)
            } else {
                Operand::Intermediate(i - 1)
            };
            let offset_secs = match anchor {
                Anchor::Offset => Some(cumulative - transition),
                Anchor::Tail => None,
            };

            steps.push(BlendStep {
                left,
                right: i,
                duration_secs: transition,
                offset_secs,
                output: Operand::Intermediate(i),
            });

            (steps, cumulative + duration - transition)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_compound_the_shrinking_timeline() {
        let plan = build_transition_plan(&[5.0, 5.0, 5.0], 0.5).unwrap();
        assert_eq!(plan.video_offsets(), vec![4.5, 9.0]);
        assert!((plan.total_duration_secs - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_chain_references_previous_intermediate() {
        let plan = build_transition_plan(&[10.0, 4.0, 6.0, 8.0], 0.5).unwrap();

        let lefts: Vec<Operand> = plan.video.iter().map(|s| s.left).collect();
        assert_eq!(
            lefts,
            vec![
                Operand::Clip(0),
                Operand::Intermediate(1),
                Operand::Intermediate(2)
            ]
        );
        let rights: Vec<usize> = plan.video.iter().map(|s| s.right).collect();
        assert_eq!(rights, vec![1, 2, 3]);
        assert_eq!(plan.final_video, Operand::Intermediate(3));
        assert_eq!(plan.final_audio, Operand::Intermediate(3));
        assert_eq!(plan.clip_count(), 4);

        // 10 -> 9.5 | 13.5 -> 13.0 | 19.0 -> 18.5 | 26.5
        assert_eq!(plan.video_offsets(), vec![9.5, 13.0, 18.5]);
        assert!((plan.total_duration_secs - 26.5).abs() < 1e-12);
    }

    #[test]
    fn test_audio_chain_mirrors_video_without_offsets() {
        let plan = build_transition_plan(&[5.0, 6.0, 7.0], 0.5).unwrap();
        assert_eq!(plan.audio.len(), plan.video.len());
        for (audio, video) in plan.audio.iter().zip(&plan.video) {
            assert_eq!(audio.left, video.left);
            assert_eq!(audio.right, video.right);
            assert_eq!(audio.output, video.output);
            assert_eq!(audio.duration_secs, 0.5);
            assert_eq!(audio.offset_secs, None);
        }
    }

    #[test]
    fn test_offsets_stay_inside_the_running_timeline() {
        let durations = [3.0, 0.6, 12.0, 1.0, 5.5];
        let plan = build_transition_plan(&durations, 0.5).unwrap();
        let mut cumulative = durations[0];
        for (step, &duration) in plan.video.iter().zip(&durations[1..]) {
            let offset = step.offset_secs.unwrap();
            assert!(offset > 0.0);
            assert!(offset < cumulative);
            cumulative += duration - 0.5;
        }
    }

    #[test]
    fn test_short_clip_is_degenerate() {
        let err = build_transition_plan(&[5.0, 0.5, 5.0], 0.5).unwrap_err();
        match err {
            FragreelError::DegenerateTransition {
                clip_index,
                clip_secs,
                transition_secs,
            } => {
                assert_eq!(clip_index, 1);
                assert_eq!(clip_secs, 0.5);
                assert_eq!(transition_secs, 0.5);
            }
            other => panic!("expected degenerate transition, got {other:?}"),
        }
    }

    #[test]
    fn test_short_first_clip_is_degenerate() {
        let err = build_transition_plan(&[0.2, 5.0], 0.5).unwrap_err();
        assert!(matches!(
            err,
            FragreelError::DegenerateTransition { clip_index: 0, .. }
        ));
    }

    #[test]
    fn test_nan_duration_is_degenerate() {
        let err = build_transition_plan(&[5.0, f64::NAN], 0.5).unwrap_err();
        assert!(matches!(
            err,
            FragreelError::DegenerateTransition { clip_index: 1, .. }
        ));
    }

    #[test]
    fn test_single_clip_cannot_be_crossfaded() {
        let err = build_transition_plan(&[3.0], 0.5).unwrap_err();
        assert!(matches!(err, FragreelError::EmptyInput { .. }));
    }

    #[test]
    fn test_non_positive_transition_is_rejected() {
        assert!(matches!(
            build_transition_plan(&[5.0, 5.0], 0.0).unwrap_err(),
            FragreelError::Config { .. }
        ));
        assert!(build_transition_plan(&[5.0, 5.0], -1.0).is_err());
    }

    #[test]
    fn test_plan_stitch_single_clip_passes_through() {
        assert_eq!(plan_stitch(&[3.0], 0.5).unwrap(), StitchPlan::PassThrough);
    }

    #[test]
    fn test_plan_stitch_empty_is_error() {
        assert!(matches!(
            plan_stitch(&[], 0.5).unwrap_err(),
            FragreelError::EmptyInput { .. }
        ));
    }

    #[test]
    fn test_plan_stitch_many_clips_crossfades() {
        match plan_stitch(&[5.0, 5.0, 5.0], 0.5).unwrap() {
            StitchPlan::Crossfade(plan) => assert_eq!(plan.video_offsets(), vec![4.5, 9.0]),
            StitchPlan::PassThrough => panic!("expected crossfade"),
        }
    }
}
