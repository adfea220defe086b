//! ffmpeg filter-graph rendering for transition plans.
//!
//! Raw inputs are referenced by position (`[2]`, `[2:a]`); blend results get
//! per-stream labels (`[v2]`, `[a2]`).

use fragreel_event_model::transition::{BlendStep, Operand, TransitionPlan};

/// Video stream label for an operand.
pub fn video_label(operand: Operand) -> String {
    match operand {
        Operand::Clip(i) => format!("[{i}]"),
        Operand::Intermediate(i) => format!("[v{i}]"),
    }
}

/// Audio stream label for an operand.
pub fn audio_label(operand: Operand) -> String {
    match operand {
        Operand::Clip(i) => format!("[{i}:a]"),
        Operand::Intermediate(i) => format!("[a{i}]"),
    }
}

fn xfade(step: &BlendStep) -> String {
    let offset = step
        .offset_secs
        .map(|offset| format!(":offset={offset:.3}"))
        .unwrap_or_default();
    format!(
        "{}{}xfade=transition=fade:duration={}{}{}",
        video_label(step.left),
        video_label(Operand::Clip(step.right)),
        step.duration_secs,
        offset,
        video_label(step.output),
    )
}

fn acrossfade(step: &BlendStep) -> String {
    format!(
        "{}{}acrossfade=d={}{}",
        audio_label(step.left),
        audio_label(Operand::Clip(step.right)),
        step.duration_secs,
        audio_label(step.output),
    )
}

/// Full `-filter_complex` value: the video chain, then the audio chain.
pub fn filter_complex(plan: &TransitionPlan) -> String {
    plan.video
        .iter()
        .map(xfade)
        .chain(plan.audio.iter().map(acrossfade))
        .collect::<Vec<_>>()
        .join(";")
}
