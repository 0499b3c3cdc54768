//! Great-circle distance between WGS-84 coordinates.
//!
//! Uses the Haversine formula on a sphere of radius 6,371,000 m. At campus scale
//! (a few kilometres at most) the spherical error is far below GPS noise, so no
//! special handling exists for antipodal points or pole wraparound.

use geo::Point;

/// Earth mean radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between `(lat1, lon1)` and `(lat2, lon2)`, in degrees.
///
/// Inputs are not range checked; identical points yield exactly `0.0`.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let sin_dphi = (delta_phi / 2.0).sin();
    let sin_dlambda = (delta_lambda / 2.0).sin();
    let a = sin_dphi * sin_dphi + phi1.cos() * phi2.cos() * sin_dlambda * sin_dlambda;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Haversine distance in meters between two `geo` points (x = longitude, y = latitude)
pub fn distance_between(p1: Point, p2: Point) -> f64 {
    distance_meters(p1.y(), p1.x(), p2.y(), p2.x())
}
