//! Conflict detection over a sequenced, timed route
//!
//! Every consecutive stop pair is checked for two independent problems:
//! a time overlap and a walk that cannot fit in the travel allowance. A pair
//! can yield zero, one or two conflicts. The route is never modified.

use chrono::Duration;
use uuid::Uuid;

use crate::config::ScheduleSettings;
use crate::services::geo::{haversine_distance_m, travel_time_secs};
use crate::types::{Conflict, ConflictKind, Route, Severity, Stop};

pub const OVERLAP_RESOLUTION: &str = "reschedule one task or assign to another worker";
pub const TRAVEL_RESOLUTION: &str = "allow more time between locations or reorder stops";

/// Checks consecutive stops for overlaps and infeasible travel
#[derive(Debug, Clone, Copy)]
pub struct ConflictDetector {
    /// Assumed travel speed, meters per second
    pub speed_mps: f64,
    /// Longest travel time that still counts as feasible
    pub travel_allowance: Duration,
}

impl ConflictDetector {
    pub fn new(speed_mps: f64, travel_allowance: Duration) -> Self {
        Self { speed_mps, travel_allowance }
    }

    pub fn from_settings(settings: &ScheduleSettings) -> Self {
        Self::new(settings.walking_speed_mps, settings.travel_buffer)
    }

    /// Scan `route` pair by pair and collect conflicts in route order.
    pub fn detect(&self, route: &Route) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for pair in route.stops().windows(2) {
            let (from, to) = (&pair[0], &pair[1]);

            if let Some(conflict) = Self::overlap(from, to) {
                conflicts.push(conflict);
            }
            if let Some(conflict) = self.travel(from, to) {
                conflicts.push(conflict);
            }
        }

        conflicts
    }

    fn overlap(from: &Stop, to: &Stop) -> Option<Conflict> {
        let departure = from.departure_time?;
        let arrival = to.arrival_time?;
        if departure <= arrival {
            return None;
        }

        let overlap_minutes = (departure - arrival).num_minutes();
        Some(Conflict {
            id: Uuid::new_v4(),
            kind: ConflictKind::Overlap,
            description: format!(
                "Visit at {} ends at {} but visit at {} starts at {} ({} min overlap)",
                from.building_name,
                departure.format("%H:%M"),
                to.building_name,
                arrival.format("%H:%M"),
                overlap_minutes
            ),
            severity: Severity::High,
            suggested_resolution: OVERLAP_RESOLUTION.to_string(),
        })
    }

    fn travel(&self, from: &Stop, to: &Stop) -> Option<Conflict> {
        let distance_m = haversine_distance_m(&from.coordinates, &to.coordinates);
        let needed_secs = travel_time_secs(distance_m, self.speed_mps);
        let allowed_secs = self.travel_allowance.num_seconds() as f64;
        if needed_secs <= allowed_secs {
            return None;
        }

        Some(Conflict {
            id: Uuid::new_v4(),
            kind: ConflictKind::TravelInfeasible,
            description: format!(
                "Travel from {} to {} covers {:.0} m and needs about {:.0} min, only {:.0} min allowed",
                from.building_name,
                to.building_name,
                distance_m,
                needed_secs / 60.0,
                allowed_secs / 60.0
            ),
            severity: Severity::Medium,
            suggested_resolution: TRAVEL_RESOLUTION.to_string(),
        })
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::from_settings(&ScheduleSettings::default())
    }
}
