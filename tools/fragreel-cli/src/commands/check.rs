//! Check system capabilities.

use fragreel_common::config::{config_file_path, AppConfig};
use fragreel_render_engine::engine::{FfmpegEngine, MediaEngine};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("fragreel System Check");
    println!("{}", "=".repeat(50));

    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config: {}", config_path.display());
    } else {
        println!("[OK] Config: defaults ({} not found)", config_path.display());
    }

    if config.project_root.join("inputs").is_dir() {
        println!("[OK] Project root: {}", config.project_root.display());
    } else {
        println!(
            "[WARN] Project root has no inputs/ directory: {}",
            config.project_root.display()
        );
    }

    let engine = FfmpegEngine::new(config.encode.clone());
    let available = engine.is_available();
    if available {
        match engine.version() {
            Some(version) => println!("[OK] Media engine: {version}"),
            None => println!("[OK] Media engine: {}", engine.name()),
        }
    } else {
        println!("[FAIL] Media engine: {} not found in PATH", engine.name());
    }

    println!();
    if available {
        println!("All required capabilities are available. fragreel is ready.");
    } else {
        println!("Install ffmpeg to cut highlight reels.");
    }

    Ok(())
}
