//! Media engines and the ffmpeg implementation.

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use fragreel_common::config::EncodeConfig;
use fragreel_common::error::{FragreelError, FragreelResult};
use fragreel_event_model::interval::Interval;
use fragreel_event_model::transition::TransitionPlan;

use crate::filter::{audio_label, filter_complex, video_label};

/// Progress callback for highlight rendering.
pub type ProgressCallback = Box<dyn Fn(RenderProgress) + Send>;

/// Render progress report.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    /// Progress within the current stage [0.0, 1.0].
    pub progress: f64,

    /// Estimated time remaining in the current stage, in seconds.
    pub eta_secs: f64,

    /// Current stage.
    pub stage: RenderStage,
}

/// Stages of a highlight render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Preparing,
    Cutting,
    Stitching,
    Finalizing,
    Complete,
    Failed,
}

impl RenderProgress {
    pub fn at(stage: RenderStage, progress: f64) -> Self {
        Self {
            progress: progress.clamp(0.0, 1.0),
            eta_secs: 0.0,
            stage,
        }
    }
}

/// Trait for media engines (ffmpeg, test doubles).
///
/// Both operations are blocking and all-or-nothing: on error the output file
/// must be treated as garbage.
pub trait MediaEngine: Send {
    /// Copy `window` of `source` into `output` without re-encoding.
    fn trim(&mut self, source: &Path, window: &Interval, output: &Path) -> FragreelResult<()>;

    /// Join `clips` along `plan` into `output`, re-encoding.
    fn stitch(
        &mut self,
        clips: &[PathBuf],
        plan: &TransitionPlan,
        output: &Path,
        progress: Option<&ProgressCallback>,
    ) -> FragreelResult<()>;

    /// Check if this engine is available on the system.
    fn is_available(&self) -> bool;

    /// Engine name.
    fn name(&self) -> &str;
}

/// Engine driving the `ffmpeg` binary.
pub struct FfmpegEngine {
    encode: EncodeConfig,
}

impl FfmpegEngine {
    pub fn new(encode: EncodeConfig) -> Self {
        Self { encode }
    }

    /// First line of `ffmpeg -version`, if ffmpeg runs.
    pub fn version(&self) -> Option<String> {
        let output = Command::new("ffmpeg").arg("-version").output().ok()?;
        if !output.status.success() {
            return None;
        }
        let raw = String::from_utf8(output.stdout).ok()?;
        raw.lines().next().map(|line| line.trim().to_string())
    }

    fn trim_args(source: &Path, window: &Interval, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-ss".to_string(),
            format!("{:.3}", window.start),
            "-i".to_string(),
            source.display().to_string(),
            "-t".to_string(),
            format!("{:.3}", window.duration()),
            "-c".to_string(),
            "copy".to_string(),
            output.display().to_string(),
        ]
    }

    fn stitch_args(&self, clips: &[PathBuf], plan: &TransitionPlan, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-nostats".to_string(),
            "-progress".to_string(),
            "pipe:1".to_string(),
        ];

        for clip in clips {
            args.push("-i".to_string());
            args.push(clip.display().to_string());
        }

        args.push("-filter_complex".to_string());
        args.push(filter_complex(plan));
        args.push("-map".to_string());
        args.push(video_label(plan.final_video));
        args.push("-map".to_string());
        args.push(audio_label(plan.final_audio));

        let mut codec_args = codec_args_for_config(&self.encode);
        args.append(&mut codec_args);

        args.push(output.display().to_string());
        args
    }

    fn run_ffmpeg(
        &self,
        args: &[String],
        expected_duration_secs: f64,
        progress: Option<&ProgressCallback>,
    ) -> FragreelResult<()> {
        tracing::debug!(args = ?args, "Running ffmpeg");
        let mut cmd = Command::new("ffmpeg");
        cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());

        let start = std::time::Instant::now();
        let mut child = cmd
            .spawn()
            .map_err(|e| FragreelError::external_engine(format!("Failed to start ffmpeg: {e}")))?;

        tracing::info!(
            pid = child.id(),
            args_len = args.len(),
            expected_duration_secs,
            "ffmpeg process started"
        );

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| FragreelError::external_engine("Failed to capture ffmpeg stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| FragreelError::external_engine("Failed to capture ffmpeg stderr"))?;

        // Drain stderr concurrently to avoid ffmpeg blocking on a full stderr pipe.
        let stderr_task = std::thread::spawn(move || -> String {
            let mut reader = BufReader::new(stderr);
            let mut output = String::new();
            match reader.read_to_string(&mut output) {
                Ok(_) => output,
                Err(err) => format!("<failed to read ffmpeg stderr: {err}>"),
            }
        });

        if let Err(err) = read_progress(
            BufReader::new(stdout),
            expected_duration_secs,
            start,
            progress,
        ) {
            if let Err(kill_err) = child.kill() {
                tracing::warn!(error = %kill_err, "Failed to kill ffmpeg");
            }
            let _ = child.wait();
            let _ = stderr_task.join();
            return Err(FragreelError::external_engine(format!(
                "Failed reading ffmpeg progress: {err}"
            )));
        }

        let status = child
            .wait()
            .map_err(|e| FragreelError::external_engine(format!("Failed to wait on ffmpeg: {e}")))?;

        let stderr_output = stderr_task
            .join()
            .unwrap_or_else(|_| "<failed to join stderr reader>".to_string());

        if !status.success() {
            return Err(FragreelError::external_engine(format!(
                "ffmpeg failed (status {}): {}",
                status,
                stderr_output.trim()
            )));
        }

        tracing::debug!(elapsed_secs = start.elapsed().as_secs_f64(), "ffmpeg finished");
        Ok(())
    }
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new(EncodeConfig::default())
    }
}

impl MediaEngine for FfmpegEngine {
    fn trim(&mut self, source: &Path, window: &Interval, output: &Path) -> FragreelResult<()> {
        let args = Self::trim_args(source, window, output);
        self.run_ffmpeg(&args, window.duration(), None)
    }

    fn stitch(
        &mut self,
        clips: &[PathBuf],
        plan: &TransitionPlan,
        output: &Path,
        progress: Option<&ProgressCallback>,
    ) -> FragreelResult<()> {
        if clips.len() != plan.clip_count() {
            return Err(FragreelError::external_engine(format!(
                "transition plan expects {} clips, got {}",
                plan.clip_count(),
                clips.len()
            )));
        }

        let args = self.stitch_args(clips, plan, output);
        tracing::info!(
            clips = clips.len(),
            total_duration_secs = plan.total_duration_secs,
            "Stitching clips"
        );
        self.run_ffmpeg(&args, plan.total_duration_secs, progress)
    }

    fn is_available(&self) -> bool {
        command_exists("ffmpeg")
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

fn codec_args_for_config(config: &EncodeConfig) -> Vec<String> {
    vec![
        "-c:v".to_string(),
        config.video_codec.clone(),
        "-preset".to_string(),
        config.preset.clone(),
        "-crf".to_string(),
        config.crf.to_string(),
        "-c:a".to_string(),
        config.audio_codec.clone(),
        "-b:a".to_string(),
        format!("{}k", config.audio_bitrate_kbps),
    ]
}

fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Consume `-progress pipe:1` output, reporting at each `progress=` line.
fn read_progress<R: BufRead>(
    mut reader: R,
    expected_duration_secs: f64,
    start: std::time::Instant,
    progress: Option<&ProgressCallback>,
) -> std::io::Result<()> {
    let mut line = String::new();
    let mut latest_progress = ProgressState::default();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }

        if let Some((key, value)) = line.trim().split_once('=') {
            latest_progress.update(key, value);
            if key == "progress" {
                if let Some(cb) = progress {
                    cb(progress_report(
                        &latest_progress,
                        expected_duration_secs,
                        start.elapsed().as_secs_f64(),
                    ));
                }
            }
        }
    }
}

#[derive(Debug, Default)]
struct ProgressState {
    out_time_secs: f64,
    complete: bool,
}

impl ProgressState {
    fn update(&mut self, key: &str, value: &str) {
        match key {
            // ffmpeg reports out_time_ms in microseconds as well.
            "out_time_ms" | "out_time_us" => {
                if let Ok(us) = value.parse::<f64>() {
                    self.out_time_secs = us / 1_000_000.0;
                }
            }
            "progress" => {
                self.complete = value == "end";
            }
            _ => {}
        }
    }
}

fn progress_report(
    state: &ProgressState,
    expected_duration_secs: f64,
    elapsed_secs: f64,
) -> RenderProgress {
    let progress = if expected_duration_secs <= 0.0 {
        0.0
    } else {
        (state.out_time_secs / expected_duration_secs).clamp(0.0, 1.0)
    };

    let eta_secs = if progress > 0.0 {
        (elapsed_secs / progress) - elapsed_secs
    } else {
        0.0
    }
    .max(0.0);

    RenderProgress {
        progress: if state.complete { 1.0 } else { progress },
        eta_secs,
        stage: if state.complete {
            RenderStage::Finalizing
        } else {
            RenderStage::Stitching
        },
    }
}
