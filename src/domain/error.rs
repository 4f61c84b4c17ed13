// Domain errors for track display
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("Invalid viewport: {width}x{height} pixels")]
    InvalidViewport { width: i32, height: i32 },

    #[error("Invalid bounding box: lat [{min_lat}, {max_lat}], lon [{min_lon}, {max_lon}]")]
    InvalidBounds {
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    },

    #[error("Trackpoint out of order: timestamp {timestamp} after {previous}")]
    OutOfOrder { previous: i64, timestamp: i64 },

    #[error("Invalid colour: {0}")]
    InvalidColour(String),
}
