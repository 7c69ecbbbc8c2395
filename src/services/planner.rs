//! Route planner: the service callers talk to.
//!
//! Owns the route cache and wires the pipeline together:
//! cache lookup → stop builder → sequencer → timing → cache store.
//! Conflict detection and optimization advice run on demand against a
//! finished route and never touch the cache.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ScheduleSettings;
use crate::error::ProviderError;
use crate::services::advisor::suggest_optimizations;
use crate::services::conflicts::ConflictDetector;
use crate::services::events::{EventSink, NoopEventSink, RouteEvent};
use crate::services::providers::{BuildingDirectory, TaskProvider};
use crate::services::route_cache::{CacheOutcome, RouteCache};
use crate::services::sequencer::sequence_stops;
use crate::services::sequential_schedule::{compute_sequential_schedule, ScheduleInput};
use crate::services::stop_builder::build_stops;
use crate::services::summary::summarize_routine;
use crate::types::{Conflict, OptimizationSuggestion, Route, RouteKey, RouteReport, RoutineSummary};

/// Route generation and scheduling service for one routine manager.
///
/// Collaborators are injected; all state lives in the instance.
pub struct RoutePlanner {
    tasks: Arc<dyn TaskProvider>,
    buildings: Arc<dyn BuildingDirectory>,
    settings: ScheduleSettings,
    cache: RouteCache,
    events: Arc<dyn EventSink>,
}

impl RoutePlanner {
    pub fn new(
        tasks: Arc<dyn TaskProvider>,
        buildings: Arc<dyn BuildingDirectory>,
        settings: ScheduleSettings,
    ) -> Self {
        Self {
            tasks,
            buildings,
            settings,
            cache: RouteCache::new(),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn settings(&self) -> &ScheduleSettings {
        &self.settings
    }

    /// Route for `worker_id` on `date`, served from the cache when present.
    ///
    /// The key is the literal `date` value: two timestamps on the same
    /// calendar day are separate cache entries.
    pub async fn generate(&self, worker_id: Uuid, date: NaiveDateTime) -> Result<Route, ProviderError> {
        let key = RouteKey::new(worker_id, date);

        let outcome = self.cache.get_or_compute(key, || self.compute_route(key)).await?;

        match &outcome {
            CacheOutcome::Hit(_) => {
                debug!("Route cache hit for {}", key);
                self.events.publish(RouteEvent::RouteServedFromCache { key });
            }
            CacheOutcome::Computed(route) => self.report_generated(key, route),
        }

        Ok(outcome.into_route())
    }

    /// Recompute the route for `worker_id` on `date` and overwrite the cache.
    pub async fn regenerate(&self, worker_id: Uuid, date: NaiveDateTime) -> Result<Route, ProviderError> {
        let key = RouteKey::new(worker_id, date);

        let route = self.cache.recompute(key, || self.compute_route(key)).await?;
        self.report_generated(key, &route);

        Ok(route)
    }

    /// Cached route, if any, without computing one
    pub async fn cached(&self, worker_id: Uuid, date: NaiveDateTime) -> Option<Route> {
        self.cache.get(&RouteKey::new(worker_id, date)).await
    }

    /// Drop the cached route for one key. Returns whether one existed.
    pub async fn invalidate(&self, worker_id: Uuid, date: NaiveDateTime) -> bool {
        let key = RouteKey::new(worker_id, date);
        let dropped = self.cache.invalidate(&key).await;
        if dropped {
            debug!("Invalidated cached route {}", key);
            self.events.publish(RouteEvent::RouteInvalidated { key });
        }
        dropped
    }

    /// Drop every cached route of a worker. Returns how many were dropped.
    pub async fn invalidate_worker(&self, worker_id: Uuid) -> usize {
        let dropped = self.cache.invalidate_worker(worker_id).await;
        debug!(
            "Invalidated {} cached route(s) for worker {}, {} route(s) still cached",
            dropped,
            worker_id,
            self.cache.len().await
        );
        dropped
    }

    /// Overlap and travel conflicts between consecutive stops of `route`
    pub fn detect_conflicts(&self, route: &Route) -> Vec<Conflict> {
        let conflicts = ConflictDetector::from_settings(&self.settings).detect(route);
        if !conflicts.is_empty() {
            info!("Route {} has {} conflict(s)", route.id, conflicts.len());
            self.events.publish(RouteEvent::ConflictsDetected {
                route_id: route.id,
                count: conflicts.len(),
            });
        }
        conflicts
    }

    /// Advisory suggestions for `route`; never applied
    pub fn suggest_optimizations(&self, route: &Route) -> Vec<OptimizationSuggestion> {
        suggest_optimizations(route)
    }

    /// Generate (or fetch) the route and analyze it in one go
    pub async fn analyze(&self, worker_id: Uuid, date: NaiveDateTime) -> Result<RouteReport, ProviderError> {
        let route = self.generate(worker_id, date).await?;
        let conflicts = self.detect_conflicts(&route);
        let suggestions = self.suggest_optimizations(&route);
        Ok(RouteReport { route, conflicts, suggestions })
    }

    /// Workload summary over the configured horizon. Always fetched fresh.
    pub async fn routine_summary(&self, worker_id: Uuid) -> Result<RoutineSummary, ProviderError> {
        let days_ahead = self.settings.summary_days_ahead;
        let tasks = self.tasks.tasks_ahead(worker_id, days_ahead).await?;

        let summary = summarize_routine(worker_id, days_ahead, self.settings.per_task_duration, &tasks);
        info!(
            "Routine summary for worker {}: {} tasks in {} buildings over {} days",
            worker_id, summary.total_tasks, summary.unique_buildings, days_ahead
        );
        Ok(summary)
    }

    async fn compute_route(&self, key: RouteKey) -> Result<Route, ProviderError> {
        let built = build_stops(
            self.tasks.as_ref(),
            self.buildings.as_ref(),
            key.worker_id,
            key.date,
            self.settings.per_task_duration,
        )
        .await?;

        for building_id in built.skipped_buildings {
            self.events.publish(RouteEvent::BuildingSkipped { key, building_id });
        }

        let sequenced = sequence_stops(built.stops);
        let timed = compute_sequential_schedule(
            &ScheduleInput {
                date: key.date,
                day_start: self.settings.day_start,
                travel_buffer: self.settings.travel_buffer,
            },
            sequenced,
        );

        Ok(Route::new(key.worker_id, key.date, timed))
    }

    fn report_generated(&self, key: RouteKey, route: &Route) {
        info!(
            "Generated route {} with {} stops, {:.0} m, {} min",
            key,
            route.stops().len(),
            route.total_distance_m(),
            route.estimated_duration().num_minutes()
        );
        self.events.publish(RouteEvent::RouteGenerated {
            key,
            stop_count: route.stops().len(),
        });
    }
}
