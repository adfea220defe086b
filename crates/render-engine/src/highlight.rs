//! Highlight reel rendering.
//!
//! Cuts every window out of the source recording, then either copies the
//! single clip to the output or stitches all clips with crossfades. The
//! temporary clips directory is removed afterwards whether or not the run
//! succeeded. A failed run also removes the reel and its plan report.

use std::path::{Path, PathBuf};

use fragreel_common::error::{FragreelError, FragreelResult};
use fragreel_event_model::demo::{require_file, DemoPaths};
use fragreel_event_model::interval::Interval;
use fragreel_event_model::transition::StitchPlan;
use fragreel_processing_core::transitions::plan_stitch;

use crate::engine::{MediaEngine, ProgressCallback, RenderProgress, RenderStage};

/// A highlight render ready to run.
#[derive(Debug, Clone)]
pub struct HighlightJob {
    /// Source recording.
    pub video: PathBuf,

    /// Merged clip windows, ordered by start.
    pub windows: Vec<Interval>,

    /// Scratch directory for cut clips.
    pub clips_dir: PathBuf,

    /// Final reel path.
    pub output: PathBuf,

    /// Crossfade duration between clips.
    pub transition_secs: f64,
}

impl HighlightJob {
    pub fn for_demo(paths: &DemoPaths, windows: Vec<Interval>, transition_secs: f64) -> Self {
        Self {
            video: paths.video.clone(),
            windows,
            clips_dir: paths.clips_dir.clone(),
            output: paths.highlight.clone(),
            transition_secs,
        }
    }

    /// Path of the `index`-th clip in the scratch directory.
    pub fn clip_path(&self, index: usize) -> PathBuf {
        self.clips_dir.join(format!("clip_{index:03}.mp4"))
    }

    /// JSON report of the stitch plan, written next to the reel.
    pub fn plan_report_path(&self) -> PathBuf {
        self.output.with_extension("plan.json")
    }
}

/// Render the highlight reel described by `job`.
pub fn render_highlight(
    job: &HighlightJob,
    engine: &mut dyn MediaEngine,
    progress: Option<ProgressCallback>,
) -> FragreelResult<PathBuf> {
    tracing::info!(
        video = %job.video.display(),
        output = %job.output.display(),
        clips = job.windows.len(),
        engine = engine.name(),
        "Starting highlight render"
    );

    require_file(&job.video)?;
    if job.windows.is_empty() {
        return Err(FragreelError::empty_input("no clip windows to render"));
    }

    report(&progress, RenderProgress::at(RenderStage::Preparing, 0.0));

    std::fs::create_dir_all(&job.clips_dir)?;
    if let Some(parent) = job.output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let result = cut_and_stitch(job, engine, &progress);
    remove_clips_dir(&job.clips_dir);

    match &result {
        Ok(_) => report(&progress, RenderProgress::at(RenderStage::Complete, 1.0)),
        Err(err) => {
            tracing::error!(error = %err, "Highlight render failed");
            remove_partial_output(&job.output);
            remove_partial_output(&job.plan_report_path());
            report(&progress, RenderProgress::at(RenderStage::Failed, 0.0));
        }
    }

    result.map(|_| job.output.clone())
}

fn cut_and_stitch(
    job: &HighlightJob,
    engine: &mut dyn MediaEngine,
    progress: &Option<ProgressCallback>,
) -> FragreelResult<()> {
    let total = job.windows.len();
    let mut clips = Vec::with_capacity(total);

    for (index, window) in job.windows.iter().enumerate() {
        let clip = job.clip_path(index);
        tracing::info!(
            clip = index + 1,
            start_secs = window.start,
            end_secs = window.end,
            duration_secs = window.duration(),
            "Cutting clip"
        );
        engine.trim(&job.video, window, &clip)?;
        clips.push(clip);
        report(
            progress,
            RenderProgress::at(RenderStage::Cutting, (index + 1) as f64 / total as f64),
        );
    }

    let durations: Vec<f64> = job.windows.iter().map(Interval::duration).collect();
    let plan = plan_stitch(&durations, job.transition_secs)?;
    write_plan_report(job, &plan);

    match plan {
        StitchPlan::PassThrough => {
            tracing::info!("Single clip, copying to output");
            std::fs::copy(&clips[0], &job.output)?;
        }
        StitchPlan::Crossfade(plan) => {
            tracing::info!(
                clips = clips.len(),
                transition_secs = job.transition_secs,
                "Concatenating clips with crossfade transitions"
            );
            engine.stitch(&clips, &plan, &job.output, progress.as_ref())?;
        }
    }

    Ok(())
}

fn report(progress: &Option<ProgressCallback>, update: RenderProgress) {
    if let Some(cb) = progress {
        cb(update);
    }
}

fn write_plan_report(job: &HighlightJob, plan: &StitchPlan) {
    let report_path = job.plan_report_path();
    let report = serde_json::json!({
        "video": job.video,
        "output": job.output,
        "transition_secs": job.transition_secs,
        "windows": job.windows,
        "plan": plan,
    });

    let written = serde_json::to_string_pretty(&report)
        .map_err(FragreelError::from)
        .and_then(|json| std::fs::write(&report_path, json).map_err(FragreelError::from));
    match written {
        Ok(()) => tracing::debug!(path = %report_path.display(), "Wrote stitch plan report"),
        Err(err) => {
            tracing::warn!(error = %err, path = %report_path.display(), "Failed to write stitch plan report")
        }
    }
}

fn remove_partial_output(path: &Path) {
    if !path.exists() {
        return;
    }
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed partial output"),
        Err(err) => {
            tracing::warn!(error = %err, path = %path.display(), "Failed to remove partial output")
        }
    }
}

fn remove_clips_dir(dir: &Path) {
    if let Err(err) = std::fs::remove_dir_all(dir) {
        tracing::warn!(error = %err, path = %dir.display(), "Failed to remove clips directory");
    }
}
