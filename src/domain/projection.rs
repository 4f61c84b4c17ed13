// Mercator projection of geographic coordinates onto a pixel viewport
use crate::domain::bounds::BoundingBox;
use crate::domain::error::{Result, TrackError};
use std::f64::consts::{FRAC_PI_4, PI};

/// Mean earth radius, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Latitude beyond which the spherical Mercator transform is clamped.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Spherical Mercator ordinate of a latitude given in degrees.
pub fn mercator_y(latitude: f64) -> f64 {
    let phi = latitude.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    (FRAC_PI_4 + phi / 2.0).tan().ln()
}

/// Ground distance covered by one degree of longitude at `latitude`.
pub fn metres_per_degree_longitude(latitude: f64) -> f64 {
    PI * EARTH_RADIUS_M * latitude.to_radians().cos() / 180.0
}

/// Pixel coordinate; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Maps a bounding box onto a `width` x `height` viewport.
///
/// Longitude is fitted linearly and latitude through the Mercator ordinate,
/// each axis independently. An axis with zero extent projects everything to
/// the viewport centre on that axis.
#[derive(Debug, Clone, PartialEq)]
pub struct MercatorProjection {
    bounds: BoundingBox,
    width: i32,
    height: i32,
    merc_min: f64,
    merc_max: f64,
    scale: Option<f64>,
}

impl MercatorProjection {
    pub fn new(bounds: BoundingBox, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(TrackError::InvalidViewport { width, height });
        }

        let lon_extent = bounds.lon_extent();
        let scale = if lon_extent > 0.0 {
            let pixels_per_degree = f64::from(width) / lon_extent;
            Some(metres_per_degree_longitude(bounds.centre_lat()) / pixels_per_degree)
        } else {
            None
        };

        Ok(Self {
            merc_min: mercator_y(bounds.min_lat),
            merc_max: mercator_y(bounds.max_lat),
            bounds,
            width,
            height,
            scale,
        })
    }

    pub fn project(&self, longitude: f64, latitude: f64) -> PixelPoint {
        let width = f64::from(self.width);
        let height = f64::from(self.height);

        let lon_extent = self.bounds.lon_extent();
        let x = if lon_extent > 0.0 {
            (longitude - self.bounds.min_lon) / lon_extent * width
        } else {
            width / 2.0
        };

        let merc_extent = self.merc_max - self.merc_min;
        let y = if merc_extent > 0.0 {
            (self.merc_max - mercator_y(latitude)) / merc_extent * height
        } else {
            height / 2.0
        };

        PixelPoint::new(x.round() as i32, y.round() as i32)
    }

    /// Metres per pixel at the centre latitude; `None` when the box has no
    /// longitude extent.
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn viewport(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn projection(bounds: (f64, f64, f64, f64), width: i32, height: i32) -> MercatorProjection {
        let (min_lat, min_lon, max_lat, max_lon) = bounds;
        let bounds = BoundingBox::new(min_lat, min_lon, max_lat, max_lon).unwrap();
        MercatorProjection::new(bounds, width, height).unwrap()
    }

    #[test]
    fn test_corners_map_to_viewport_corners() {
        let p = projection((47.9, 1.9, 48.1, 2.3), 320, 240);
        assert_eq!(p.project(1.9, 48.1), PixelPoint::new(0, 0));
        assert_eq!(p.project(2.3, 47.9), PixelPoint::new(320, 240));
    }

    #[test]
    fn test_mercator_stretches_northern_half() {
        // Equal degree steps cover more Mercator distance further north.
        let p = projection((60.0, 0.0, 70.0, 10.0), 100, 1000);
        let mid = p.project(5.0, 65.0);
        assert!(mid.y > 500, "midpoint latitude projected at y={}", mid.y);
    }

    #[test]
    fn test_zero_latitude_extent_centres_vertically() {
        let p = projection((48.0, 2.0, 48.0, 2.01), 190, 190);
        assert_eq!(p.project(2.0, 48.0), PixelPoint::new(0, 95));
        assert_eq!(p.project(2.005, 48.0), PixelPoint::new(95, 95));
        assert_eq!(p.project(2.01, 48.0), PixelPoint::new(190, 95));
    }

    #[test]
    fn test_degenerate_box_projects_to_centre() {
        let p = projection((0.0, 0.0, 0.0, 0.0), 90, 90);
        assert_eq!(p.project(0.0, 0.0), PixelPoint::new(45, 45));
        assert_eq!(p.project(10.0, -3.0), PixelPoint::new(45, 45));
        assert_eq!(p.scale(), None);
    }

    #[test]
    fn test_reject_non_positive_viewport() {
        let bounds = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(
            MercatorProjection::new(bounds, 0, 10),
            Err(TrackError::InvalidViewport {
                width: 0,
                height: 10
            })
        );
        assert!(MercatorProjection::new(bounds, 10, -1).is_err());
    }

    #[test]
    fn test_scale_at_centre_latitude() {
        let p = projection((47.99, 2.0, 48.01, 2.01), 1000, 1000);
        let expected = metres_per_degree_longitude(48.0) * 0.01 / 1000.0;
        let scale = p.scale().unwrap();
        assert!((scale - expected).abs() / expected < 1e-9);
        // About 0.74 m per pixel at 48 degrees north.
        assert!((scale - 0.744).abs() < 0.001);
    }

    #[test]
    fn test_metres_per_degree_at_equator() {
        let metres = metres_per_degree_longitude(0.0);
        assert!((metres - 111_194.93).abs() < 0.1);
    }

    #[test]
    fn test_poles_stay_finite() {
        assert!(mercator_y(90.0).is_finite());
        assert!(mercator_y(-90.0).is_finite());
        let p = projection((80.0, 0.0, 90.0, 1.0), 100, 100);
        assert_eq!(p.project(0.0, 90.0).y, 0);
    }

    proptest! {
        #[test]
        fn projection_stays_in_viewport(
            min_lat in -80.0f64..79.0,
            lat_span in 1e-4f64..1.0,
            min_lon in -179.0f64..178.0,
            lon_span in 1e-4f64..1.0,
            width in 1i32..4000,
            height in 1i32..4000,
            fx in 0.0f64..=1.0,
            fy in 0.0f64..=1.0,
        ) {
            let p = projection((min_lat, min_lon, min_lat + lat_span, min_lon + lon_span), width, height);
            let bounds = *p.bounds();
            let lon = (bounds.min_lon + fx * lon_span).min(bounds.max_lon);
            let lat = (bounds.min_lat + fy * lat_span).min(bounds.max_lat);
            let pixel = p.project(lon, lat);
            prop_assert!((0..=width).contains(&pixel.x), "x={} width={}", pixel.x, width);
            prop_assert!((0..=height).contains(&pixel.y), "y={} height={}", pixel.y, height);
        }

        #[test]
        fn corners_map_to_origin_and_extent(
            min_lat in -80.0f64..79.0,
            lat_span in 1e-4f64..1.0,
            min_lon in -179.0f64..178.0,
            lon_span in 1e-4f64..1.0,
            width in 1i32..4000,
            height in 1i32..4000,
        ) {
            let p = projection((min_lat, min_lon, min_lat + lat_span, min_lon + lon_span), width, height);
            let bounds = *p.bounds();
            prop_assert_eq!(p.project(bounds.min_lon, bounds.max_lat), PixelPoint::new(0, 0));
            prop_assert_eq!(p.project(bounds.max_lon, bounds.min_lat), PixelPoint::new(width, height));
        }

        #[test]
        fn x_is_monotonic_in_longitude(
            lat in -60.0f64..60.0,
            lon_span in 1e-4f64..5.0,
            width in 1i32..4000,
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
        ) {
            let p = projection((lat - 1.0, 10.0, lat + 1.0, 10.0 + lon_span), width, 500);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let left = p.project(10.0 + lo * lon_span, lat);
            let right = p.project(10.0 + hi * lon_span, lat);
            prop_assert!(left.x <= right.x);
        }
    }
}
