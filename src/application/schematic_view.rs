// Schematic track view - self-drawn preview of the whole recorded track
use crate::application::canvas::Canvas;
use crate::application::point_log::{PointLog, Subscription};
use crate::application::resources::DisplayResources;
use crate::domain::bounds::BoundingBox;
use crate::domain::projection::{MercatorProjection, PixelPoint};
use crate::domain::trackpoint::Coordinate;
use std::sync::Arc;

/// Padding around the track so it never touches the borders, in pixels.
pub const PADDING: i32 = 5;

/// Width of the scale bar, in pixels.
pub const SCALE_WIDTH: i32 = 50;

/// Height of the ticks delimiting the scale bar, in pixels.
pub const SCALE_DELIM_HEIGHT: i32 = 10;

const NORTH_LABEL_GAP: i32 = 5;

/// Ground distance covered by a bar of `bar_width` pixels, e.g. `37m`.
pub fn scale_label(metres_per_pixel: f64, bar_width: i32, metres_label: &str) -> String {
    let metres = (metres_per_pixel * f64::from(bar_width)).round() as i64;
    format!("{}{}", metres, metres_label)
}

pub struct SchematicTrackView {
    log: Arc<dyn PointLog>,
    subscription: Option<Subscription>,
    resources: DisplayResources,
    width: i32,
    height: i32,
    coords: Vec<Coordinate>,
    pixels: Vec<PixelPoint>,
    projection: Option<MercatorProjection>,
    invalidated: bool,
}

impl SchematicTrackView {
    pub fn new(log: Arc<dyn PointLog>, resources: DisplayResources) -> Self {
        let subscription = log.subscribe();
        tracing::debug!("Schematic view subscribed as {:?}", subscription.id());

        Self {
            log,
            subscription: Some(subscription),
            resources,
            width: 0,
            height: 0,
            coords: Vec::new(),
            pixels: Vec::new(),
            projection: None,
            invalidated: false,
        }
    }

    pub fn on_size_changed(&mut self, width: i32, height: i32) {
        if self.subscription.is_none() {
            return;
        }

        tracing::debug!(
            "Schematic view resized to {}x{} (was {}x{})",
            width,
            height,
            self.width,
            self.height
        );
        self.width = width;
        self.height = height;

        self.populate_coords();
        self.project_data();
        self.invalidated = true;
    }

    pub fn on_store_changed(&mut self) {
        if self.subscription.is_none() {
            return;
        }

        // Not measured yet; the first size change will project everything.
        if self.width > 0 && self.height > 0 {
            self.populate_coords();
            self.project_data();
            self.invalidated = true;
        }
    }

    pub fn on_detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.log.unsubscribe(subscription.id());
            tracing::debug!("Schematic view released {:?}", subscription.id());
        }
    }

    pub fn on_draw(&self, canvas: &mut dyn Canvas) {
        if let Some(last) = self.pixels.last() {
            let track_paint = self.resources.track_paint();
            for segment in self.pixels.windows(2) {
                canvas.draw_line(
                    segment[0].offset(PADDING, PADDING),
                    segment[1].offset(PADDING, PADDING),
                    &track_paint,
                );
            }

            // Current position
            let marker = &self.resources.marker;
            canvas.draw_bitmap(
                marker,
                last.offset(PADDING - marker.width / 2, PADDING - marker.height / 2),
            );

            self.draw_scale(canvas);
        }

        self.draw_static(canvas);
    }

    /// Consumes a pending repaint request.
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    pub fn subscription_mut(&mut self) -> Option<&mut Subscription> {
        self.subscription.as_mut()
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[PixelPoint] {
        &self.pixels
    }

    pub fn projection(&self) -> Option<&MercatorProjection> {
        self.projection.as_ref()
    }

    fn draw_scale(&self, canvas: &mut dyn Canvas) {
        let Some(scale) = self.projection.as_ref().and_then(MercatorProjection::scale) else {
            return;
        };
        tracing::trace!("Scale is {} m/px", scale);

        let paint = self.resources.text_paint();
        let left = self.width - PADDING - SCALE_WIDTH;
        let right = self.width - PADDING;
        let middle = PADDING + SCALE_DELIM_HEIGHT / 2;

        canvas.draw_line(
            PixelPoint::new(left, middle),
            PixelPoint::new(right, middle),
            &paint,
        );
        for x in [left, right] {
            canvas.draw_line(
                PixelPoint::new(x, PADDING),
                PixelPoint::new(x, PADDING + SCALE_DELIM_HEIGHT),
                &paint,
            );
        }

        let label = scale_label(scale, SCALE_WIDTH, &self.resources.metres_label);
        let baseline = PADDING + SCALE_DELIM_HEIGHT + paint.text_size.round() as i32;
        canvas.draw_text(
            &label,
            PixelPoint::new(right - SCALE_WIDTH / 2, baseline),
            &paint,
        );
    }

    fn draw_static(&self, canvas: &mut dyn Canvas) {
        let compass = &self.resources.compass;
        let compass_top = self.height - PADDING - compass.height;
        canvas.draw_bitmap(compass, PixelPoint::new(PADDING, compass_top));
        canvas.draw_text(
            &self.resources.north_label,
            PixelPoint::new(PADDING + compass.width / 2, compass_top - NORTH_LABEL_GAP),
            &self.resources.text_paint(),
        );
    }

    fn populate_coords(&mut self) {
        match self.log.snapshot() {
            Ok(coords) => {
                tracing::debug!("Extracted {} points from the point log", coords.len());
                self.coords = coords;
            }
            Err(e) => {
                tracing::warn!("Point log unavailable, drawing an empty track: {}", e);
                self.coords.clear();
            }
        }
    }

    fn project_data(&mut self) {
        let bounds = match BoundingBox::enclosing(&self.coords) {
            Ok(Some(bounds)) => bounds,
            Ok(None) => {
                self.pixels.clear();
                self.projection = None;
                return;
            }
            Err(e) => {
                tracing::warn!("Keeping previous frame: {}", e);
                return;
            }
        };

        match MercatorProjection::new(bounds, self.width - PADDING * 2, self.height - PADDING * 2)
        {
            Ok(projection) => {
                self.pixels = self
                    .coords
                    .iter()
                    .map(|c| projection.project(c.longitude, c.latitude))
                    .collect();
                tracing::debug!(
                    "Projected {} points from {:?} onto {:?}",
                    self.pixels.len(),
                    projection.bounds(),
                    projection.viewport()
                );
                self.projection = Some(projection);
            }
            Err(e) => {
                tracing::warn!("Keeping previous frame: {}", e);
            }
        }
    }
}
