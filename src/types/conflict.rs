//! Conflict and optimization suggestion types
//!
//! Both are produced per analysis call and never persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of scheduling problem between two consecutive stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Departure from one stop is later than arrival at the next
    Overlap,
    /// Walking between the two stops takes longer than the travel buffer
    TravelInfeasible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub id: Uuid,
    pub kind: ConflictKind,
    pub description: String,
    pub severity: Severity,
    pub suggested_resolution: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Reorder,
    Skip,
    Combine,
}

/// Advisory, never applied automatically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSuggestion {
    pub id: Uuid,
    pub kind: SuggestionKind,
    pub description: String,
    pub estimated_time_saving_secs: i64,
}
