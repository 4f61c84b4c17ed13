// Map track view - the recorded track drawn over a tiled basemap
use crate::application::basemap::Basemap;
use crate::application::point_log::{PointLog, Subscription};
use crate::application::resources::Bitmap;
use crate::domain::colour::Colour;
use crate::domain::trackpoint::GeoPoint;
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_ZOOM: u8 = 16;

/// Map control pressed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapCommand {
    ZoomIn,
    ZoomOut,
}

#[derive(Debug, Clone)]
pub struct MapStyle {
    pub default_zoom: u8,
    pub path_colour: Colour,
    pub marker: Bitmap,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            path_colour: Colour::BLUE,
            marker: Bitmap::new("marker", 16, 16),
        }
    }
}

pub struct MapTrackView<B: Basemap> {
    log: Arc<dyn PointLog>,
    basemap: B,
    style: MapStyle,
    subscription: Option<Subscription>,
    finishing: bool,
}

impl<B: Basemap> MapTrackView<B> {
    pub fn new(log: Arc<dyn PointLog>, basemap: B, style: MapStyle) -> Self {
        Self {
            log,
            basemap,
            style,
            subscription: None,
            finishing: false,
        }
    }

    pub fn on_create(&mut self) {
        self.basemap.set_zoom(self.style.default_zoom);
        self.basemap
            .attach_overlays(self.style.path_colour, &self.style.marker);
    }

    pub fn on_resume(&mut self) {
        if self.subscription.is_none() {
            let subscription = self.log.subscribe();
            tracing::debug!("Map view subscribed as {:?}", subscription.id());
            self.subscription = Some(subscription);
        }

        self.path_changed();
    }

    pub fn on_pause(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.log.unsubscribe(subscription.id());
            tracing::debug!("Map view released {:?}", subscription.id());
        }

        self.basemap.clear_path();
    }

    pub fn on_store_changed(&mut self) {
        if self.subscription.is_some() {
            self.path_changed();
        }
    }

    /// Enters the finishing state; later path updates are dropped.
    pub fn finish(&mut self) {
        self.finishing = true;
    }

    pub fn is_finishing(&self) -> bool {
        self.finishing
    }

    pub fn zoom_in(&mut self) {
        self.basemap.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.basemap.zoom_out();
    }

    pub fn apply(&mut self, command: MapCommand) {
        match command {
            MapCommand::ZoomIn => self.zoom_in(),
            MapCommand::ZoomOut => self.zoom_out(),
        }
    }

    pub fn basemap(&self) -> &B {
        &self.basemap
    }

    pub fn subscription_mut(&mut self) -> Option<&mut Subscription> {
        self.subscription.as_mut()
    }

    /// Appends only the points the path overlay has not seen yet, then moves
    /// the location marker and the map centre to the latest one.
    fn path_changed(&mut self) {
        if self.finishing {
            return;
        }

        let coords = match self.log.snapshot() {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!("Point log unavailable, keeping current path: {}", e);
                return;
            }
        };

        let existing = self.basemap.path_point_count();
        let Some(last) = coords.last() else {
            return;
        };
        if coords.len() <= existing {
            return;
        }

        for coordinate in &coords[existing..] {
            self.basemap.add_path_point(GeoPoint::from(*coordinate));
        }

        let current = GeoPoint::from(*last);
        self.basemap.set_location(current);
        self.basemap.set_center(current);
        self.basemap.invalidate();

        tracing::debug!(
            "Appended {} points to the path, now {}",
            coords.len() - existing,
            coords.len()
        );
    }
}
