//! Business logic services

pub mod advisor;
pub mod conflicts;
pub mod events;
pub mod geo;
pub mod planner;
pub mod providers;
pub mod route_cache;
pub mod sequencer;
pub mod sequential_schedule;
pub mod stop_builder;
pub mod summary;

pub use planner::RoutePlanner;
