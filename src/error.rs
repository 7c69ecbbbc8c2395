//! Error types

use thiserror::Error;

/// Failure reported by the task provider.
///
/// The planner never recovers from these; they reach the caller unchanged
/// and the route cache is left untouched.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("task provider unavailable: {0}")]
    Unavailable(String),

    #[error("task provider failed: {0}")]
    Backend(#[from] anyhow::Error),
}
