// Trackpoint domain models

/// A timestamped geographic sample, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trackpoint {
    pub longitude: f64,
    pub latitude: f64,
    pub timestamp: i64,
}

impl Trackpoint {
    pub fn new(longitude: f64, latitude: f64, timestamp: i64) -> Self {
        Self {
            longitude,
            latitude,
            timestamp,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }
}

/// A (longitude, latitude) pair as returned by point log snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Geographic point in the basemap's integer micro-degree unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoPoint {
    pub latitude_e6: i32,
    pub longitude_e6: i32,
}

impl GeoPoint {
    pub fn new(latitude_e6: i32, longitude_e6: i32) -> Self {
        Self {
            latitude_e6,
            longitude_e6,
        }
    }

    /// Converts decimal degrees to micro-degrees, truncating toward zero.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new((latitude * 1e6) as i32, (longitude * 1e6) as i32)
    }

    pub fn latitude(&self) -> f64 {
        f64::from(self.latitude_e6) / 1e6
    }

    pub fn longitude(&self) -> f64 {
        f64::from(self.longitude_e6) / 1e6
    }
}

impl From<Coordinate> for GeoPoint {
    fn from(coordinate: Coordinate) -> Self {
        Self::from_degrees(coordinate.latitude, coordinate.longitude)
    }
}
