//! Stop sequencer: greedy nearest-neighbor ordering.
//!
//! The first input stop is always visited first; it is not chosen
//! geographically. From there the closest unvisited stop (great-circle
//! distance) is appended until none remain. Ties go to the stop that comes
//! first in the remaining list.
//!
//! This is a heuristic, not an optimal tour. A worker's day has at most a
//! few dozen stops, so the O(n²) distance evaluations are cheap.

use crate::services::geo::haversine_distance_m;
use crate::types::Stop;

/// Order `stops` by the nearest-neighbor heuristic.
pub fn sequence_stops(stops: Vec<Stop>) -> Vec<Stop> {
    let mut remaining = stops;
    if remaining.len() < 2 {
        return remaining;
    }

    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(remaining.remove(0));

    while !remaining.is_empty() {
        let current = match ordered.last() {
            Some(stop) => stop.coordinates,
            None => break,
        };

        let mut best_idx = 0;
        let mut best_dist = f64::MAX;

        for (i, candidate) in remaining.iter().enumerate() {
            let dist = haversine_distance_m(&current, &candidate.coordinates);
            // Strict comparison keeps the earliest stop on ties
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        ordered.push(remaining.remove(best_idx));
    }

    ordered
}
