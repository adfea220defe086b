//! fragreel CLI: command-line interface for kill location and highlight cutting.
//!
//! Usage:
//!   fragreel locate <DEMO>    Find kill events and write the event table
//!   fragreel clips <DEMO>     Cut and stitch the highlight reel
//!   fragreel run <DEMO>       Locate, then cut
//!   fragreel check            Check that the media engine is available
//!
//! Paths follow the demo naming convention under the configured project root.
//! Set `RUST_LOG` to change verbosity.

use clap::{Parser, Subcommand};
use fragreel_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "fragreel",
    about = "Cut kill highlights out of gameplay recordings",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find kill events in a demo log and write the event table
    Locate {
        /// Demo name (e.g. ctf_20251223_141052)
        demo: String,
    },

    /// Cut clips around located kills and stitch them into a highlight reel
    Clips {
        /// Demo name (e.g. ctf_20251223_141052)
        demo: String,
    },

    /// Locate kills, then cut the highlight reel
    Run {
        /// Demo name (e.g. ctf_20251223_141052)
        demo: String,
    },

    /// Check system capabilities
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load();
    fragreel_common::logging::init_logging(&config.logging);
    tracing::debug!(project_root = %config.project_root.display(), "Loaded configuration");

    match cli.command {
        Commands::Locate { demo } => commands::locate::run(&config, &demo),
        Commands::Clips { demo } => commands::clips::run(&config, &demo),
        Commands::Run { demo } => {
            commands::locate::run(&config, &demo)?;
            commands::clips::run(&config, &demo)
        }
        Commands::Check => commands::check::run(&config),
    }
}
