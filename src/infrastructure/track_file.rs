// Track file loading - recorded GPS fixes and recorder events replayed into the point log
use crate::application::map_view::MapCommand;
use crate::domain::trackpoint::Trackpoint;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// One recorded fix, as stored in a track file.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackFix {
    pub time: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub accuracy: Option<f32>,
    #[serde(default)]
    pub satellites: Option<usize>,
}

impl TrackFix {
    pub fn trackpoint(&self) -> Result<Trackpoint> {
        let time = chrono::DateTime::parse_from_rfc3339(&self.time)
            .with_context(|| format!("Invalid fix time: {}", self.time))?;

        Ok(Trackpoint::new(self.lon, self.lat, time.timestamp_millis()))
    }
}

/// Location provider and GPS engine notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEvent {
    FirstFix,
    ProviderEnabled,
    ProviderDisabled,
    Available,
    OutOfService,
    TemporarilyUnavailable,
}

/// A track file record: a fix, a status notification, a map control press or
/// a recorder broadcast named by its symbolic key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TrackEntry {
    Fix(TrackFix),
    Status { status: StatusEvent },
    Command { command: MapCommand },
    Broadcast { broadcast: String },
}

pub fn parse_track(json: &str) -> Result<Vec<TrackEntry>> {
    serde_json::from_str(json).context("Failed to parse track file")
}

pub fn load_track(path: &Path) -> Result<Vec<TrackEntry>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read track file {}", path.display()))?;
    parse_track(&json)
}
