//! Task types
//!
//! Tasks are owned by the task provider. The engine only ever reads them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of work a task represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Cleaning,
    Inspection,
    Maintenance,
    Repair,
    Sanitation,
}

/// Task urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Medium
    }
}

/// How often a task repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    OneTime,
}

impl Recurrence {
    pub const fn as_str(self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::OneTime => "oneTime",
        }
    }
}

/// A unit of work at a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub building_id: String,
    pub category: TaskCategory,
    #[serde(default)]
    pub urgency: Urgency,
    pub recurrence: Recurrence,
    pub due_date: NaiveDateTime,
    #[serde(default)]
    pub is_complete: bool,
}
