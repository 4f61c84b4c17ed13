// Bounding box and coordinate reducers
use crate::domain::error::{Result, TrackError};
use crate::domain::trackpoint::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl Axis {
    fn of(&self, coordinate: &Coordinate) -> f64 {
        match self {
            Axis::Longitude => coordinate.longitude,
            Axis::Latitude => coordinate.latitude,
        }
    }
}

/// Smallest value on `axis`, `None` for an empty slice.
pub fn find_min(coords: &[Coordinate], axis: Axis) -> Option<f64> {
    coords.iter().map(|c| axis.of(c)).reduce(f64::min)
}

/// Largest value on `axis`, `None` for an empty slice.
pub fn find_max(coords: &[Coordinate], axis: Axis) -> Option<f64> {
    coords.iter().map(|c| axis.of(c)).reduce(f64::max)
}

/// Axis-aligned latitude/longitude rectangle, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Result<Self> {
        let finite = [min_lat, min_lon, max_lat, max_lon]
            .iter()
            .all(|v| v.is_finite());
        if !finite || min_lat > max_lat || min_lon > max_lon {
            return Err(TrackError::InvalidBounds {
                min_lat,
                min_lon,
                max_lat,
                max_lon,
            });
        }

        Ok(Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        })
    }

    /// Minimum box containing every coordinate, `None` when there are none.
    pub fn enclosing(coords: &[Coordinate]) -> Result<Option<Self>> {
        let (Some(min_lat), Some(min_lon), Some(max_lat), Some(max_lon)) = (
            find_min(coords, Axis::Latitude),
            find_min(coords, Axis::Longitude),
            find_max(coords, Axis::Latitude),
            find_max(coords, Axis::Longitude),
        ) else {
            return Ok(None);
        };

        Self::new(min_lat, min_lon, max_lat, max_lon).map(Some)
    }

    pub fn lon_extent(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn centre_lat(&self) -> f64 {
        (self.min_lat + self.max_lat) / 2.0
    }
}
