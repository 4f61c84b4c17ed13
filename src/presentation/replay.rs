// Track replay - feeds recorded fixes and recorder events in as a live recorder would
use crate::application::map_view::MapCommand;
use crate::constants::{self, intents};
use crate::domain::gps_status::{GpsEvent, GpsStatusIndicator, GpsTransition, ProviderStatus};
use crate::infrastructure::memory_point_log::InMemoryPointLog;
use crate::infrastructure::track_file::{StatusEvent, TrackEntry, TrackFix};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

pub struct TrackReplay {
    log: Arc<InMemoryPointLog>,
    status: GpsStatusIndicator,
    commands: mpsc::UnboundedSender<MapCommand>,
    interval: Duration,
    appended: usize,
}

impl TrackReplay {
    pub fn new(
        log: Arc<InMemoryPointLog>,
        metres_label: impl Into<String>,
        commands: mpsc::UnboundedSender<MapCommand>,
        interval: Duration,
    ) -> Self {
        Self {
            log,
            status: GpsStatusIndicator::new(metres_label),
            commands,
            interval: interval.max(Duration::from_millis(1)),
            appended: 0,
        }
    }

    /// Plays `entries` in order, one fix per interval, then signals
    /// `shutdown`. Returns the number of trackpoints committed.
    pub async fn run(mut self, entries: Vec<TrackEntry>, shutdown: watch::Sender<bool>) -> usize {
        let mut ticker = tokio::time::interval(self.interval);

        for entry in entries {
            match entry {
                TrackEntry::Fix(fix) => {
                    ticker.tick().await;
                    self.record(&fix);
                }
                TrackEntry::Status { status } => self.on_status(status),
                TrackEntry::Command { command } => {
                    if self.commands.send(command).is_err() {
                        tracing::debug!("No display listens for {:?}", command);
                    }
                }
                TrackEntry::Broadcast { broadcast } => self.on_broadcast(&broadcast),
            }
        }

        tracing::info!("Replay finished, {} trackpoints", self.appended);
        let _ = shutdown.send(true);
        self.appended
    }

    fn record(&mut self, fix: &TrackFix) {
        if let Some(satellites) = fix.satellites {
            self.status.on_gps_event(GpsEvent::SatelliteStatus(satellites));
        }
        let transition = self.status.on_location(fix.accuracy);
        self.report(transition);

        let trackpoint = match fix.trackpoint() {
            Ok(trackpoint) => trackpoint,
            Err(e) => {
                tracing::warn!("Skipping fix: {:#}", e);
                return;
            }
        };

        match self.log.append(trackpoint) {
            Ok(len) => {
                self.appended += 1;
                tracing::debug!(
                    "Recorded trackpoint {} (GPS active {}, accuracy {:?}, indicator {:?})",
                    len,
                    self.status.is_active(),
                    self.status.accuracy_label(),
                    self.status.indicator()
                );
            }
            Err(e) => tracing::warn!("Skipping fix: {}", e),
        }
    }

    fn on_status(&mut self, event: StatusEvent) {
        let transition = match event {
            StatusEvent::FirstFix => {
                self.status.on_gps_event(GpsEvent::FirstFix);
                None
            }
            StatusEvent::ProviderEnabled => {
                self.status.on_provider_enabled();
                None
            }
            StatusEvent::ProviderDisabled => self.status.on_provider_disabled(),
            StatusEvent::Available => self.status.on_status_changed(ProviderStatus::Available),
            StatusEvent::OutOfService => {
                self.status.on_status_changed(ProviderStatus::OutOfService)
            }
            StatusEvent::TemporarilyUnavailable => {
                self.status
                    .on_status_changed(ProviderStatus::TemporarilyUnavailable)
            }
        };
        self.report(transition);
    }

    fn on_broadcast(&mut self, key: &str) {
        let Some(intent) = constants::lookup(key) else {
            tracing::warn!("Ignoring unknown broadcast {}", key);
            return;
        };

        tracing::info!(intent, "Recorder broadcast");
        match intent {
            intents::START_TRACKING => self.status.on_gps_event(GpsEvent::Started),
            intents::STOP_TRACKING => self.status.on_gps_event(GpsEvent::Stopped),
            _ => {}
        }
    }

    fn report(&self, transition: Option<GpsTransition>) {
        match transition {
            Some(GpsTransition::Enabled) => {
                tracing::info!("GPS fix acquired, recording controls enabled")
            }
            Some(GpsTransition::Disabled) => {
                tracing::warn!("GPS lost, recording controls disabled")
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gps_status::SatIndicator;
    use crate::infrastructure::track_file::parse_track;

    fn replay() -> (TrackReplay, mpsc::UnboundedReceiver<MapCommand>) {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let replay = TrackReplay::new(
            Arc::new(InMemoryPointLog::new()),
            "m",
            commands,
            Duration::from_millis(1),
        );
        (replay, command_rx)
    }

    #[tokio::test]
    async fn test_replay_skips_bad_fixes_and_signals_shutdown() {
        let entries = parse_track(
            r#"[
                {"broadcast": "intent.start_tracking"},
                {"time": "2024-05-01T08:00:00Z", "lat": 48.0, "lon": 2.0, "accuracy": 5.0, "satellites": 6},
                {"command": "zoom_in"},
                {"time": "2024-05-01T08:00:02Z", "lat": 48.001, "lon": 2.001},
                {"time": "2024-05-01T08:00:01Z", "lat": 48.002, "lon": 2.002},
                {"time": "not a time", "lat": 48.003, "lon": 2.003},
                {"command": "zoom_out"},
                {"time": "2024-05-01T08:00:03Z", "lat": 48.004, "lon": 2.004},
                {"broadcast": "intent.stop_tracking"}
            ]"#,
        )
        .unwrap();

        let (replay, mut command_rx) = replay();
        let log = replay.log.clone();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let appended = replay.run(entries, shutdown_tx).await;

        assert_eq!(appended, 3);
        assert_eq!(log.len(), 3);
        assert_eq!(command_rx.recv().await, Some(MapCommand::ZoomIn));
        assert_eq!(command_rx.recv().await, Some(MapCommand::ZoomOut));
        assert_eq!(command_rx.recv().await, None);
        assert!(*shutdown_rx.borrow_and_update());
    }

    #[test]
    fn test_status_events_drive_the_indicator() {
        let (mut replay, _command_rx) = replay();

        replay.on_broadcast("intent.start_tracking");
        assert_eq!(replay.status.indicator(), SatIndicator::Unknown);
        replay.on_status(StatusEvent::FirstFix);
        assert_eq!(replay.status.indicator(), SatIndicator::Bars(0));

        replay.status.on_location(Some(3.0));
        assert!(replay.status.is_active());
        replay.on_status(StatusEvent::Available);
        assert!(replay.status.is_active());
        replay.on_status(StatusEvent::TemporarilyUnavailable);
        assert!(!replay.status.is_active());
        assert_eq!(replay.status.indicator(), SatIndicator::Unknown);

        replay.status.on_location(Some(3.0));
        replay.on_status(StatusEvent::OutOfService);
        assert!(!replay.status.is_active());
        assert_eq!(replay.status.indicator(), SatIndicator::Off);

        replay.on_status(StatusEvent::ProviderEnabled);
        assert_eq!(replay.status.indicator(), SatIndicator::Unknown);
        replay.on_status(StatusEvent::ProviderDisabled);
        assert_eq!(replay.status.indicator(), SatIndicator::Off);
    }

    #[test]
    fn test_broadcasts_resolve_through_the_name_table() {
        let (mut replay, _command_rx) = replay();

        replay.on_broadcast("intent.start_tracking");
        assert_eq!(replay.status.indicator(), SatIndicator::Unknown);
        replay.on_broadcast("intent.track_wp");
        assert_eq!(replay.status.indicator(), SatIndicator::Unknown);
        replay.on_broadcast("intent.no_such_thing");
        assert_eq!(replay.status.indicator(), SatIndicator::Unknown);
        replay.on_broadcast("intent.stop_tracking");
        assert_eq!(replay.status.indicator(), SatIndicator::Off);
    }
}
