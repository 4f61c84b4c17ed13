// Main entry point - Dependency injection and display wiring
mod application;
mod constants;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod testing;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

use crate::application::map_view::MapTrackView;
use crate::application::schematic_view::SchematicTrackView;
use crate::infrastructure::config::load_display_config;
use crate::infrastructure::headless_basemap::HeadlessBasemap;
use crate::infrastructure::memory_point_log::InMemoryPointLog;
use crate::infrastructure::track_file::load_track;
use crate::presentation::display_loop::DisplayLoop;
use crate::presentation::replay::TrackReplay;
use crate::presentation::schematic_surface::SchematicSurface;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_display_config()?;
    let resources = config.resources.to_resources()?;
    let map_style = config.map_style()?;
    let entries = load_track(&config.replay.track_file)?;
    tracing::info!(
        "Loaded {} track entries from {}",
        entries.len(),
        config.replay.track_file.display()
    );

    // Create point log (infrastructure layer)
    let log = Arc::new(InMemoryPointLog::new());

    // Create views (application layer)
    let mut schematic = SchematicTrackView::new(log.clone(), resources.clone());
    schematic.on_size_changed(config.schematic.width, config.schematic.height);
    let mut surface = SchematicSurface::new(schematic, config.schematic.output.clone());
    surface.repaint()?;

    let mut map = MapTrackView::new(log.clone(), HeadlessBasemap::new(), map_style);
    map.on_create();
    map.on_resume();

    // Start the recorder replay
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let replay = TrackReplay::new(
        log.clone(),
        resources.metres_label.clone(),
        command_tx,
        Duration::from_millis(config.replay.interval_ms),
    );
    let recorder = tokio::spawn(replay.run(entries, shutdown_tx));

    // Run the display loop (presentation layer)
    let mut display_loop =
        DisplayLoop::new(vec![Box::new(surface), Box::new(map)]).with_commands(command_rx);
    display_loop.run(shutdown_rx).await;

    let recorded = recorder.await?;
    tracing::info!(
        "Recorded {} trackpoints, {} display refreshes, {} subscriptions left",
        recorded,
        display_loop.dispatched(),
        log.subscriber_count()
    );

    Ok(())
}
