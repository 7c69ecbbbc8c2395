//! Collaborator abstractions: where tasks and building metadata come from
//!
//! The engine depends only on the two traits. In-memory implementations are
//! used by tests and by the binary (loaded from a JSON fixture).

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProviderError;
use crate::types::{BuildingMetadata, Task};

/// Source of a worker's tasks
#[async_trait]
pub trait TaskProvider: Send + Sync {
    /// Tasks assigned to `worker_id` for the day of `date`
    async fn tasks_for_day(&self, worker_id: Uuid, date: NaiveDateTime) -> Result<Vec<Task>, ProviderError>;

    /// Tasks assigned to `worker_id` due within the next `days_ahead` days
    async fn tasks_ahead(&self, worker_id: Uuid, days_ahead: u32) -> Result<Vec<Task>, ProviderError>;
}

/// Resolves building identifiers to display name and location
#[async_trait]
pub trait BuildingDirectory: Send + Sync {
    /// Returns None if the building is unknown
    async fn resolve(&self, building_id: &str) -> Option<BuildingMetadata>;
}

// ==========================================================================
// In-memory implementations
// ==========================================================================

/// Task provider backed by a fixed task list per worker.
///
/// Counts calls so callers can verify caching, and can be switched into a
/// failing mode to exercise error propagation.
#[derive(Default)]
pub struct InMemoryTaskProvider {
    tasks: HashMap<Uuid, Vec<Task>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryTaskProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(mut self, worker_id: Uuid, tasks: Vec<Task>) -> Self {
        self.tasks.entry(worker_id).or_default().extend(tasks);
        self
    }

    /// Number of fetches served so far (both kinds)
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn begin_call(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable("in-memory provider set to fail".to_string()));
        }
        Ok(())
    }

    fn worker_tasks(&self, worker_id: Uuid) -> impl Iterator<Item = &Task> {
        self.tasks.get(&worker_id).into_iter().flatten()
    }
}

#[async_trait]
impl TaskProvider for InMemoryTaskProvider {
    async fn tasks_for_day(&self, worker_id: Uuid, date: NaiveDateTime) -> Result<Vec<Task>, ProviderError> {
        self.begin_call()?;
        let day = date.date();
        Ok(self
            .worker_tasks(worker_id)
            .filter(|t| t.due_date.date() == day)
            .cloned()
            .collect())
    }

    async fn tasks_ahead(&self, worker_id: Uuid, days_ahead: u32) -> Result<Vec<Task>, ProviderError> {
        self.begin_call()?;
        let from = Utc::now().naive_utc().date();
        let until = from + Duration::days(i64::from(days_ahead));
        Ok(self
            .worker_tasks(worker_id)
            .filter(|t| {
                let due = t.due_date.date();
                due >= from && due < until
            })
            .cloned()
            .collect())
    }
}

/// Building directory backed by a map
#[derive(Debug, Default, Clone)]
pub struct InMemoryBuildingDirectory {
    buildings: HashMap<String, BuildingMetadata>,
}

impl InMemoryBuildingDirectory {
    pub fn new(buildings: impl IntoIterator<Item = BuildingMetadata>) -> Self {
        Self {
            buildings: buildings.into_iter().map(|b| (b.id.clone(), b)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

#[async_trait]
impl BuildingDirectory for InMemoryBuildingDirectory {
    async fn resolve(&self, building_id: &str) -> Option<BuildingMetadata> {
        self.buildings.get(building_id).cloned()
    }
}

// ==========================================================================
// Fixture files
// ==========================================================================

/// Tasks of one worker inside a fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerTasks {
    pub worker_id: Uuid,
    pub tasks: Vec<Task>,
}

/// JSON snapshot of both collaborators
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub buildings: Vec<BuildingMetadata>,
    #[serde(default)]
    pub workers: Vec<WorkerTasks>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid fixture JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn into_collaborators(self) -> (InMemoryTaskProvider, InMemoryBuildingDirectory) {
        let directory = InMemoryBuildingDirectory::new(self.buildings);
        let provider = self
            .workers
            .into_iter()
            .fold(InMemoryTaskProvider::new(), |p, w| p.with_tasks(w.worker_id, w.tasks));
        (provider, directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, Recurrence, TaskCategory, Urgency};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn task(building_id: &str, due: NaiveDateTime) -> Task {
        Task {
            id: Uuid::new_v4(),
            building_id: building_id.to_string(),
            category: TaskCategory::Repair,
            urgency: Urgency::High,
            recurrence: Recurrence::OneTime,
            due_date: due,
            is_complete: false,
        }
    }

    #[tokio::test]
    async fn in_memory_provider_filters_by_calendar_day() {
        let worker = Uuid::new_v4();
        let provider = InMemoryTaskProvider::new().with_tasks(
            worker,
            vec![task("A", at(2026, 3, 2, 9)), task("B", at(2026, 3, 2, 17)), task("C", at(2026, 3, 3, 9))],
        );

        let tasks = provider.tasks_for_day(worker, at(2026, 3, 2, 12)).await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.building_id != "C"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn in_memory_provider_unknown_worker_has_no_tasks() {
        let provider = InMemoryTaskProvider::new();
        let tasks = provider.tasks_for_day(Uuid::new_v4(), at(2026, 3, 2, 8)).await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn in_memory_provider_tasks_ahead_uses_horizon() {
        let worker = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let provider = InMemoryTaskProvider::new().with_tasks(
            worker,
            vec![
                task("A", now),
                task("B", now + Duration::days(10)),
                task("C", now + Duration::days(45)),
                task("D", now - Duration::days(3)),
            ],
        );

        let tasks = provider.tasks_ahead(worker, 30).await.unwrap();

        let ids: Vec<&str> = tasks.iter().map(|t| t.building_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn in_memory_provider_failing_mode_returns_error() {
        let provider = InMemoryTaskProvider::new();
        provider.set_failing(true);

        let result = provider.tasks_for_day(Uuid::new_v4(), at(2026, 3, 2, 8)).await;

        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn in_memory_directory_resolves_known_buildings_only() {
        let directory = InMemoryBuildingDirectory::new(vec![BuildingMetadata {
            id: "A".to_string(),
            name: "Alpha Tower".to_string(),
            coordinates: Coordinates::new(50.0, 14.0),
        }]);

        assert_eq!(directory.resolve("A").await.unwrap().name, "Alpha Tower");
        assert!(directory.resolve("Z").await.is_none());
    }

    #[test]
    fn fixture_parses_and_builds_collaborators() {
        let json = r#"{
            "buildings": [
                { "id": "A", "name": "Alpha", "coordinates": { "lat": 0.0, "lng": 0.0 } }
            ],
            "workers": [
                {
                    "workerId": "00000000-0000-0000-0000-000000000007",
                    "tasks": [
                        {
                            "id": "00000000-0000-0000-0000-000000000001",
                            "buildingId": "A",
                            "category": "sanitation",
                            "recurrence": "daily",
                            "dueDate": "2026-03-02T08:00:00"
                        }
                    ]
                }
            ]
        }"#;

        let fixture = Fixture::from_json(json).unwrap();
        assert_eq!(fixture.workers[0].tasks.len(), 1);

        let (provider, directory) = fixture.into_collaborators();
        assert_eq!(directory.len(), 1);
        let worker = Uuid::from_u128(7);
        let tasks = tokio_test::block_on(provider.tasks_for_day(worker, at(2026, 3, 2, 0))).unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn fixture_rejects_malformed_json() {
        assert!(Fixture::from_json("{ not json").is_err());
    }
}
