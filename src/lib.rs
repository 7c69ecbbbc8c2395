//! Crewroute - route generation and scheduling for building-maintenance crews
//!
//! Given a worker and a date, groups the worker's tasks into building stops,
//! orders them with a nearest-neighbor heuristic, assigns arrival/departure
//! times and caches the result. Conflict detection, optimization advice and
//! multi-day workload summaries are available on demand.
//!
//! Entry point is [`services::RoutePlanner`], built from a [`TaskProvider`]
//! and a [`BuildingDirectory`].

pub mod config;
pub mod defaults;
pub mod error;
pub mod services;
pub mod types;

pub use config::ScheduleSettings;
pub use error::ProviderError;
pub use services::providers::{BuildingDirectory, TaskProvider};
pub use services::RoutePlanner;
