// Display loop - delivers point log changes and map commands to the track displays
use crate::application::basemap::Basemap;
use crate::application::map_view::{MapCommand, MapTrackView};
use crate::application::point_log::Subscription;
use futures::FutureExt;
use futures::future::select_all;
use tokio::sync::{mpsc, watch};

/// A view driven by point log change notifications.
pub trait TrackDisplay {
    fn name(&self) -> &'static str;

    fn subscription_mut(&mut self) -> Option<&mut Subscription>;

    /// Handles one (possibly coalesced) change. Runs to completion before the
    /// loop looks at the next notification.
    fn on_store_changed(&mut self);

    fn on_command(&mut self, _command: MapCommand) {}

    /// Releases the subscription. Must be idempotent.
    fn detach(&mut self);

    /// One-line state summary for the shutdown log.
    fn describe(&self) -> String;
}

impl<B: Basemap> TrackDisplay for MapTrackView<B> {
    fn name(&self) -> &'static str {
        "map"
    }

    fn subscription_mut(&mut self) -> Option<&mut Subscription> {
        MapTrackView::subscription_mut(self)
    }

    fn on_store_changed(&mut self) {
        MapTrackView::on_store_changed(self);
    }

    fn on_command(&mut self, command: MapCommand) {
        self.apply(command);
    }

    fn detach(&mut self) {
        self.finish();
        self.on_pause();
    }

    fn describe(&self) -> String {
        format!(
            "{} path points{}",
            self.basemap().path_point_count(),
            if self.is_finishing() { ", finishing" } else { "" }
        )
    }
}

enum LoopEvent {
    Shutdown,
    Idle,
    Changed { index: usize, alive: bool },
    Command(MapCommand),
    CommandsClosed,
}

/// Single-threaded dispatch loop owning every display.
pub struct DisplayLoop {
    displays: Vec<Box<dyn TrackDisplay>>,
    commands: Option<mpsc::UnboundedReceiver<MapCommand>>,
    dispatched: usize,
}

impl DisplayLoop {
    pub fn new(displays: Vec<Box<dyn TrackDisplay>>) -> Self {
        Self {
            displays,
            commands: None,
            dispatched: 0,
        }
    }

    /// Also delivers map commands received on `commands` to every display.
    pub fn with_commands(mut self, commands: mpsc::UnboundedReceiver<MapCommand>) -> Self {
        self.commands = Some(commands);
        self
    }

    /// Number of change notifications handed to displays so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Runs until `shutdown` changes (or its sender goes away) or no display
    /// is subscribed any more. Pending changes are delivered and every
    /// display is detached before returning.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("Display loop started with {} displays", self.displays.len());

        loop {
            match next_event(&mut self.displays, &mut self.commands, &mut shutdown).await {
                LoopEvent::Shutdown => break,
                LoopEvent::Idle => {
                    tracing::debug!("No display is subscribed");
                    break;
                }
                LoopEvent::Changed { index, alive: true } => self.dispatch(index),
                LoopEvent::Changed { index, alive: false } => {
                    let target = &mut self.displays[index];
                    tracing::warn!("Point log released the {} display", target.name());
                    target.detach();
                }
                LoopEvent::Command(command) => {
                    tracing::debug!("Delivering {:?}", command);
                    for target in &mut self.displays {
                        target.on_command(command);
                    }
                }
                LoopEvent::CommandsClosed => self.commands = None,
            }
        }

        self.flush_pending();
        for target in &mut self.displays {
            target.detach();
            tracing::info!("{} display stopped: {}", target.name(), target.describe());
        }

        tracing::info!("Display loop stopped after {} dispatches", self.dispatched);
    }

    fn dispatch(&mut self, index: usize) {
        let target = &mut self.displays[index];
        tracing::debug!("Point log changed, refreshing {} display", target.name());
        target.on_store_changed();
        self.dispatched += 1;
    }

    fn flush_pending(&mut self) {
        for index in 0..self.displays.len() {
            let pending = match self.displays[index].subscription_mut() {
                Some(subscription) if subscription.has_pending() => {
                    subscription.mark_seen();
                    true
                }
                _ => false,
            };

            if pending {
                self.dispatch(index);
            }
        }
    }
}

async fn next_command(
    commands: &mut Option<mpsc::UnboundedReceiver<MapCommand>>,
) -> Option<MapCommand> {
    match commands {
        Some(commands) => commands.recv().await,
        None => std::future::pending().await,
    }
}

async fn next_event(
    displays: &mut [Box<dyn TrackDisplay>],
    commands: &mut Option<mpsc::UnboundedReceiver<MapCommand>>,
    shutdown: &mut watch::Receiver<bool>,
) -> LoopEvent {
    let waits: Vec<_> = displays
        .iter_mut()
        .enumerate()
        .filter_map(|(index, target)| {
            target
                .subscription_mut()
                .map(|subscription| async move { (index, subscription.changed().await) }.boxed_local())
        })
        .collect();

    if waits.is_empty() {
        return LoopEvent::Idle;
    }

    tokio::select! {
        biased;
        _ = shutdown.changed() => LoopEvent::Shutdown,
        command = next_command(commands) => match command {
            Some(command) => LoopEvent::Command(command),
            None => LoopEvent::CommandsClosed,
        },
        ((index, alive), _, _) = select_all(waits) => LoopEvent::Changed { index, alive },
    }
}
