//! Routine summary: coarse multi-day workload figures for a worker.
//!
//! Independent of the per-day route pipeline and never cached.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::types::{Recurrence, RecurrenceCounts, RoutineSummary, Task};

const DAILY_TASK_HOURS: f64 = 0.5;
const WEEKLY_TASK_HOURS: f64 = 1.0;
const WORKDAYS_PER_WEEK: f64 = 5.0;
const METERS_PER_BUILDING: f64 = 1000.0;

/// Aggregate `tasks` (already fetched for `days_ahead` days) into a summary.
///
/// `per_task` is the same service-time budget the route pipeline uses.
pub fn summarize_routine(worker_id: Uuid, days_ahead: u32, per_task: Duration, tasks: &[Task]) -> RoutineSummary {
    let mut counts = RecurrenceCounts::default();
    for task in tasks {
        match task.recurrence {
            Recurrence::Daily => counts.daily += 1,
            Recurrence::Weekly => counts.weekly += 1,
            Recurrence::Monthly => counts.monthly += 1,
            Recurrence::OneTime => counts.one_time += 1,
        }
    }

    let unique_buildings = tasks
        .iter()
        .map(|t| t.building_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let daily_hours = counts.daily as f64 * DAILY_TASK_HOURS;
    let weekly_hours = counts.weekly as f64 * WEEKLY_TASK_HOURS + daily_hours * WORKDAYS_PER_WEEK;

    RoutineSummary {
        worker_id,
        computed_at: Utc::now(),
        days_ahead,
        total_tasks: tasks.len(),
        completed_tasks: tasks.iter().filter(|t| t.is_complete).count(),
        recurrence_counts: counts,
        unique_buildings,
        estimated_daily_hours: daily_hours,
        estimated_weekly_hours: weekly_hours,
        estimated_distance_m: unique_buildings as f64 * METERS_PER_BUILDING,
        estimated_duration_secs: tasks.len() as i64 * per_task.num_seconds(),
    }
}
