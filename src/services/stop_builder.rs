//! Stop builder: turns a worker's tasks for a day into one stop per building.
//!
//! Tasks are grouped by building id and the groups are visited in ascending
//! building id order, so the sequencer always sees the same input for the
//! same provider responses. Buildings the directory cannot resolve are left
//! out of the route entirely; they are reported back, not treated as errors.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ProviderError;
use crate::services::providers::{BuildingDirectory, TaskProvider};
use crate::types::{Stop, Task};

/// Result of building stops for one day
#[derive(Debug, Clone, Default)]
pub struct BuiltStops {
    /// Untimed stops in ascending building id order
    pub stops: Vec<Stop>,
    /// Building ids whose tasks were dropped because they did not resolve
    pub skipped_buildings: Vec<String>,
}

/// Group tasks by building id, ascending. Task order inside a group follows
/// the provider's order.
pub fn group_by_building(tasks: Vec<Task>) -> BTreeMap<String, Vec<Task>> {
    let mut groups: BTreeMap<String, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.building_id.clone()).or_default().push(task);
    }
    groups
}

/// Fetch the day's tasks and build one stop per resolvable building.
pub async fn build_stops(
    tasks: &dyn TaskProvider,
    directory: &dyn BuildingDirectory,
    worker_id: Uuid,
    date: NaiveDateTime,
    per_task: Duration,
) -> Result<BuiltStops, ProviderError> {
    let day_tasks = tasks.tasks_for_day(worker_id, date).await?;
    debug!("Fetched {} tasks for worker {} on {}", day_tasks.len(), worker_id, date);

    let mut built = BuiltStops::default();

    for (building_id, group) in group_by_building(day_tasks) {
        match directory.resolve(&building_id).await {
            Some(building) => built.stops.push(Stop::new(building, group, per_task)),
            None => {
                warn!(
                    "Building {} could not be resolved, skipping {} task(s)",
                    building_id,
                    group.len()
                );
                built.skipped_buildings.push(building_id);
            }
        }
    }

    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::{InMemoryBuildingDirectory, InMemoryTaskProvider};
    use crate::types::{BuildingMetadata, Coordinates, Recurrence, TaskCategory, Urgency};
    use chrono::NaiveDate;

    fn day() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn task(building_id: &str) -> Task {
        Task {
            id: Uuid::new_v4(),
            building_id: building_id.to_string(),
            category: TaskCategory::Maintenance,
            urgency: Urgency::Medium,
            recurrence: Recurrence::Weekly,
            due_date: day(),
            is_complete: false,
        }
    }

    fn building(id: &str) -> BuildingMetadata {
        BuildingMetadata {
            id: id.to_string(),
            name: format!("Building {}", id),
            coordinates: Coordinates::new(50.0, 14.0),
        }
    }

    #[test]
    fn group_by_building_is_ascending_and_keeps_task_order() {
        let tasks = vec![task("C"), task("A"), task("C"), task("B")];
        let first_c = tasks[0].id;

        let groups = group_by_building(tasks);

        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
        assert_eq!(groups["C"].len(), 2);
        assert_eq!(groups["C"][0].id, first_c);
    }

    #[tokio::test]
    async fn build_stops_one_stop_per_building_with_durations() {
        let worker = Uuid::new_v4();
        let provider = InMemoryTaskProvider::new()
            .with_tasks(worker, vec![task("B"), task("A"), task("B"), task("A"), task("B")]);
        let directory = InMemoryBuildingDirectory::new(vec![building("A"), building("B")]);

        let built = build_stops(&provider, &directory, worker, day(), Duration::seconds(1800))
            .await
            .unwrap();

        assert_eq!(built.stops.len(), 2);
        assert_eq!(built.stops[0].building_id, "A");
        assert_eq!(built.stops[0].estimated_duration_secs, 3600);
        assert_eq!(built.stops[1].building_id, "B");
        assert_eq!(built.stops[1].estimated_duration_secs, 5400);
        assert!(built.stops.iter().all(|s| s.arrival_time.is_none()));
        assert!(built.skipped_buildings.is_empty());
    }

    #[tokio::test]
    async fn build_stops_skips_unresolvable_buildings() {
        let worker = Uuid::new_v4();
        let provider = InMemoryTaskProvider::new()
            .with_tasks(worker, vec![task("A"), task("GHOST"), task("GHOST")]);
        let directory = InMemoryBuildingDirectory::new(vec![building("A")]);

        let built = build_stops(&provider, &directory, worker, day(), Duration::seconds(1800))
            .await
            .unwrap();

        assert_eq!(built.stops.len(), 1);
        assert_eq!(built.stops[0].building_id, "A");
        assert_eq!(built.skipped_buildings, vec!["GHOST".to_string()]);
    }

    #[tokio::test]
    async fn build_stops_propagates_provider_failure() {
        let provider = InMemoryTaskProvider::new();
        provider.set_failing(true);
        let directory = InMemoryBuildingDirectory::default();

        let result = build_stops(&provider, &directory, Uuid::new_v4(), day(), Duration::seconds(1800)).await;

        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn build_stops_no_tasks_yields_no_stops() {
        let provider = InMemoryTaskProvider::new();
        let directory = InMemoryBuildingDirectory::new(vec![building("A")]);

        let built = build_stops(&provider, &directory, Uuid::new_v4(), day(), Duration::seconds(1800))
            .await
            .unwrap();

        assert!(built.stops.is_empty());
    }
}
