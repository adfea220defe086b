//! Cut and stitch a highlight reel from the event table.

use fragreel_common::config::AppConfig;
use fragreel_common::error::FragreelError;
use fragreel_event_model::demo::DemoPaths;
use fragreel_event_model::event::read_event_table;
use fragreel_processing_core::windows::{anchored_times, compute_windows, ClipPadding};
use fragreel_render_engine::engine::{
    FfmpegEngine, MediaEngine, ProgressCallback, RenderProgress, RenderStage,
};
use fragreel_render_engine::highlight::{render_highlight, HighlightJob};

pub fn run(config: &AppConfig, demo: &str) -> anyhow::Result<()> {
    let paths = DemoPaths::new(&config.project_root, demo);
    paths.require_clip_inputs()?;

    println!("Cutting highlights for: {}", paths.name);

    let records = read_event_table(&paths.event_table)?;
    let times = anchored_times(&records)?;
    let padding = ClipPadding::from_config(&config.clips)?;
    let windows = compute_windows(&times, padding)?;

    println!("Merged {} kills into {} clips", times.len(), windows.len());
    for (i, window) in windows.iter().enumerate() {
        println!(
            "  Clip {}: {:.2}s - {:.2}s ({:.2}s)",
            i + 1,
            window.start,
            window.end,
            window.duration()
        );
    }

    let mut engine = FfmpegEngine::new(config.encode.clone());
    if !engine.is_available() {
        return Err(FragreelError::external_engine(
            "No supported media engine found (expected ffmpeg in PATH)",
        )
        .into());
    }

    let job = HighlightJob::for_demo(&paths, windows, config.clips.transition_secs);

    let progress_cb: ProgressCallback = Box::new(|p: RenderProgress| match p.stage {
        RenderStage::Cutting => print!("\r  Cutting: {:.0}%  ", p.progress * 100.0),
        RenderStage::Stitching => print!(
            "\r  Stitching: {:.1}% (ETA: {:.0}s)  ",
            p.progress * 100.0,
            p.eta_secs
        ),
        _ => {}
    });

    let output = render_highlight(&job, &mut engine, Some(progress_cb))?;
    println!("\nDone! Highlight video: {}", output.display());

    Ok(())
}
