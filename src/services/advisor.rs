//! Optimization advisor: heuristic, non-binding suggestions for a route.
//!
//! Each rule is independent and contributes at most one suggestion.
//! Nothing here changes the route.

use uuid::Uuid;

use crate::types::{OptimizationSuggestion, Route, SuggestionKind, TaskCategory, Urgency};

/// More stops than this triggers a reorder hint
const REORDER_MIN_STOPS: usize = 3;
const REORDER_SAVING_SECS: i64 = 15 * 60;

/// More low-urgency tasks than this triggers a defer hint
const DEFER_MIN_LOW_TASKS: usize = 2;
const DEFER_SAVING_PER_TASK_SECS: i64 = 10 * 60;

/// More stops with cleaning work than this triggers a batching hint
const BATCH_MIN_CLEANING_STOPS: usize = 2;
const BATCH_SAVING_SECS: i64 = 20 * 60;

/// Produce suggestions for `route`, in rule order: reorder, defer, batch.
pub fn suggest_optimizations(route: &Route) -> Vec<OptimizationSuggestion> {
    let mut suggestions = Vec::new();
    let stops = route.stops();

    if stops.len() > REORDER_MIN_STOPS {
        suggestions.push(suggestion(
            SuggestionKind::Reorder,
            format!("Reorder {} stops by geographic proximity", stops.len()),
            REORDER_SAVING_SECS,
        ));
    }

    let low_priority = stops
        .iter()
        .flat_map(|s| s.tasks.iter())
        .filter(|t| t.urgency == Urgency::Low)
        .count();
    if low_priority > DEFER_MIN_LOW_TASKS {
        suggestions.push(suggestion(
            SuggestionKind::Skip,
            format!("Defer {} low priority tasks", low_priority),
            low_priority as i64 * DEFER_SAVING_PER_TASK_SECS,
        ));
    }

    let cleaning_stops = stops
        .iter()
        .filter(|s| s.tasks.iter().any(|t| t.category == TaskCategory::Cleaning))
        .count();
    if cleaning_stops > BATCH_MIN_CLEANING_STOPS {
        suggestions.push(suggestion(
            SuggestionKind::Combine,
            format!("Batch all cleaning tasks together ({} stops have cleaning work)", cleaning_stops),
            BATCH_SAVING_SECS,
        ));
    }

    suggestions
}

fn suggestion(kind: SuggestionKind, description: String, saving_secs: i64) -> OptimizationSuggestion {
    OptimizationSuggestion {
        id: Uuid::new_v4(),
        kind,
        description,
        estimated_time_saving_secs: saving_secs,
    }
}
