//! Geographic calculations

use crate::types::Coordinates;

/// Mean earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle (Haversine) distance between two points in meters
pub fn haversine_distance_m(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Sum of consecutive great-circle legs along `points`, in meters.
/// Zero for fewer than two points.
pub fn path_distance_m(points: &[Coordinates]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance_m(&pair[0], &pair[1]))
        .sum()
}

/// Seconds needed to cover `distance_m` at `speed_mps`
pub fn travel_time_secs(distance_m: f64, speed_mps: f64) -> f64 {
    distance_m / speed_mps
}
