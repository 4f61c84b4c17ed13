// Headless basemap - keeps overlay and camera state in memory
use crate::application::basemap::{Basemap, LocationOverlay, MapController, PathOverlay};
use crate::application::resources::Bitmap;
use crate::domain::colour::Colour;
use crate::domain::trackpoint::GeoPoint;

pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 18;

/// Basemap without tiles. Repaints are reported through tracing.
#[derive(Debug, Default)]
pub struct HeadlessBasemap {
    path: Vec<GeoPoint>,
    path_colour: Option<Colour>,
    marker: Option<Bitmap>,
    location: Option<GeoPoint>,
    centre: Option<GeoPoint>,
    zoom: u8,
    invalidations: usize,
}

impl HeadlessBasemap {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl HeadlessBasemap {
    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    pub fn path_colour(&self) -> Option<Colour> {
        self.path_colour
    }

    pub fn marker(&self) -> Option<&Bitmap> {
        self.marker.as_ref()
    }

    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    pub fn centre(&self) -> Option<GeoPoint> {
        self.centre
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations
    }
}

impl PathOverlay for HeadlessBasemap {
    fn add_path_point(&mut self, point: GeoPoint) {
        self.path.push(point);
    }

    fn clear_path(&mut self) {
        self.path.clear();
    }

    fn path_point_count(&self) -> usize {
        self.path.len()
    }
}

impl LocationOverlay for HeadlessBasemap {
    fn set_location(&mut self, point: GeoPoint) {
        self.location = Some(point);
    }
}

impl MapController for HeadlessBasemap {
    fn set_zoom(&mut self, level: u8) {
        self.zoom = level.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn set_center(&mut self, point: GeoPoint) {
        self.centre = Some(point);
    }

    fn zoom_in(&mut self) {
        self.set_zoom(self.zoom.saturating_add(1));
    }

    fn zoom_out(&mut self) {
        self.set_zoom(self.zoom.saturating_sub(1));
    }
}

impl Basemap for HeadlessBasemap {
    fn attach_overlays(&mut self, path_colour: Colour, marker: &Bitmap) {
        self.path_colour = Some(path_colour);
        self.marker = Some(marker.clone());
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;

        let colour = self.path_colour.map(|c| c.to_string()).unwrap_or_default();
        let marker = self.marker.as_ref().map(|m| m.name.as_str()).unwrap_or("none");
        match (self.location, self.centre) {
            (Some(location), Some(centre)) => tracing::info!(
                "Map repaint #{}: {} {} path points, {} at ({:.6}, {:.6}), centred on ({:.6}, {:.6}) at zoom {}",
                self.invalidations,
                self.path.len(),
                colour,
                marker,
                location.latitude(),
                location.longitude(),
                centre.latitude(),
                centre.longitude(),
                self.zoom
            ),
            _ => tracing::info!(
                "Map repaint #{}: {} {} path points at zoom {}",
                self.invalidations,
                self.path.len(),
                colour,
                self.zoom
            ),
        }
    }
}
