//! Routine summary types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task counts per recurrence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceCounts {
    pub daily: usize,
    pub weekly: usize,
    pub monthly: usize,
    pub one_time: usize,
}

/// Multi-day workload overview for one worker. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineSummary {
    pub worker_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub days_ahead: u32,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub recurrence_counts: RecurrenceCounts,
    pub unique_buildings: usize,
    pub estimated_daily_hours: f64,
    pub estimated_weekly_hours: f64,
    pub estimated_distance_m: f64,
    pub estimated_duration_secs: i64,
}
