// Domain layer - Track geometry and status models
pub mod bounds;
pub mod colour;
pub mod error;
pub mod gps_status;
pub mod projection;
pub mod trackpoint;
