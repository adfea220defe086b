//! Locate kill events in a demo log.

use fragreel_common::clock::FrameClock;
use fragreel_common::config::AppConfig;
use fragreel_event_model::demo::{require_file, DemoPaths};
use fragreel_event_model::event::{write_event_table, EventRecord};
use fragreel_processing_core::locator::{EventLocator, LocatorPatterns};

pub fn run(config: &AppConfig, demo: &str) -> anyhow::Result<()> {
    let paths = DemoPaths::new(&config.project_root, demo);
    require_file(&paths.log)?;

    println!("Scanning demo log for {}: {}", paths.name, paths.log.display());

    // Demo dumps may carry stray non-UTF-8 bytes from player names.
    let raw = std::fs::read(&paths.log)?;
    let content = String::from_utf8_lossy(&raw);

    let locator = EventLocator::new(LocatorPatterns::from_config(&config.locator)?);
    let clock = FrameClock::new(config.locator.frame_rate)?;

    let events = locator.locate_text(&content);
    tracing::info!(
        events = events.len(),
        frame_rate = clock.rate(),
        "Located kill events"
    );
    let records: Vec<EventRecord> = events.iter().map(|event| event.to_record(&clock)).collect();
    write_event_table(&paths.event_table, &records)?;

    let unanchored = records.iter().filter(|r| r.frame.is_none()).count();
    if unanchored > 0 {
        println!("  {unanchored} kill(s) appear before the first frame marker and have no time");
    }
    println!(
        "Extracted {} rail kills → {}",
        records.len(),
        paths.event_table.display()
    );

    Ok(())
}
