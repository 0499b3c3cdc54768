//! Geodesic distance utilities.

pub mod distance;

pub use distance::{EARTH_RADIUS_M, distance_between, distance_meters};
