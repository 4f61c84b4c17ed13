// Basemap port: the external tiled street map and its overlays
use crate::application::resources::Bitmap;
use crate::domain::colour::Colour;
use crate::domain::trackpoint::GeoPoint;

pub trait PathOverlay {
    fn add_path_point(&mut self, point: GeoPoint);

    fn clear_path(&mut self);

    fn path_point_count(&self) -> usize;
}

pub trait LocationOverlay {
    fn set_location(&mut self, point: GeoPoint);
}

pub trait MapController {
    fn set_zoom(&mut self, level: u8);

    fn set_center(&mut self, point: GeoPoint);

    fn zoom_in(&mut self);

    fn zoom_out(&mut self);
}

pub trait Basemap: PathOverlay + LocationOverlay + MapController {
    /// Adds the path overlay and the single-location overlay to the map.
    fn attach_overlays(&mut self, path_colour: Colour, marker: &Bitmap);

    /// Requests a repaint.
    fn invalidate(&mut self);
}
