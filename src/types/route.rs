//! Route types

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BuildingMetadata, Conflict, Coordinates, OptimizationSuggestion, Task};
use crate::services::geo;

/// A single building visit aggregating all of a worker's tasks there for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: Uuid,
    pub building_id: String,
    pub building_name: String,
    pub coordinates: Coordinates,
    pub tasks: Vec<Task>,
    /// Always `tasks.len() * per-task duration`
    pub estimated_duration_secs: i64,
    pub arrival_time: Option<NaiveDateTime>,
    pub departure_time: Option<NaiveDateTime>,
}

impl Stop {
    /// Build an untimed stop for `building` covering `tasks`.
    pub fn new(building: BuildingMetadata, tasks: Vec<Task>, per_task: Duration) -> Self {
        let estimated_duration_secs = tasks.len() as i64 * per_task.num_seconds();
        Self {
            id: Uuid::new_v4(),
            building_id: building.id,
            building_name: building.name,
            coordinates: building.coordinates,
            tasks,
            estimated_duration_secs,
            arrival_time: None,
            departure_time: None,
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn estimated_duration(&self) -> Duration {
        Duration::seconds(self.estimated_duration_secs)
    }

    pub fn is_timed(&self) -> bool {
        self.arrival_time.is_some() && self.departure_time.is_some()
    }
}

/// Cache key: worker plus the date value exactly as the caller supplied it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteKey {
    pub worker_id: Uuid,
    pub date: NaiveDateTime,
}

impl RouteKey {
    pub const fn new(worker_id: Uuid, date: NaiveDateTime) -> Self {
        Self { worker_id, date }
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.worker_id, self.date)
    }
}

/// Ordered itinerary for one worker on one date.
///
/// Stop order is visiting order. `total_distance_m` and
/// `estimated_duration_secs` are derived and recomputed on every
/// change of the stop list, so the stops are only reachable through
/// accessors. Deserialized totals are ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RouteRecord")]
pub struct Route {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub date: NaiveDateTime,
    stops: Vec<Stop>,
    total_distance_m: f64,
    estimated_duration_secs: i64,
}

/// Wire shape of a route without its derived totals
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteRecord {
    id: Uuid,
    worker_id: Uuid,
    date: NaiveDateTime,
    stops: Vec<Stop>,
}

impl From<RouteRecord> for Route {
    fn from(record: RouteRecord) -> Self {
        let mut route = Route::new(record.worker_id, record.date, record.stops);
        route.id = record.id;
        route
    }
}

impl Route {
    pub fn new(worker_id: Uuid, date: NaiveDateTime, stops: Vec<Stop>) -> Self {
        let mut route = Self {
            id: Uuid::new_v4(),
            worker_id,
            date,
            stops: Vec::new(),
            total_distance_m: 0.0,
            estimated_duration_secs: 0,
        };
        route.set_stops(stops);
        route
    }

    pub fn key(&self) -> RouteKey {
        RouteKey::new(self.worker_id, self.date)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Replace the stop sequence and recompute the derived totals.
    pub fn set_stops(&mut self, stops: Vec<Stop>) {
        self.stops = stops;
        let points: Vec<Coordinates> = self.stops.iter().map(|s| s.coordinates).collect();
        self.total_distance_m = geo::path_distance_m(&points);
        self.estimated_duration_secs = Self::span_secs(&self.stops);
    }

    /// Sum of great-circle legs along the stop sequence, in meters
    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    pub fn estimated_duration_secs(&self) -> i64 {
        self.estimated_duration_secs
    }

    pub fn estimated_duration(&self) -> Duration {
        Duration::seconds(self.estimated_duration_secs)
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.stops.iter().map(Stop::task_count).sum()
    }

    // First arrival to last departure once timed, plain service time otherwise.
    fn span_secs(stops: &[Stop]) -> i64 {
        let first = stops.first().and_then(|s| s.arrival_time);
        let last = stops.last().and_then(|s| s.departure_time);
        match (first, last) {
            (Some(start), Some(end)) => (end - start).num_seconds(),
            _ => stops.iter().map(|s| s.estimated_duration_secs).sum(),
        }
    }
}

/// A route together with its on-demand analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteReport {
    pub route: Route,
    pub conflicts: Vec<Conflict>,
    pub suggestions: Vec<OptimizationSuggestion>,
}
