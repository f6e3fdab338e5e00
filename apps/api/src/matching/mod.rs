// Application matching: criteria evaluation, cache-aside job snapshots and
// concurrent batch evaluation of applications against one job.

pub mod coordinator;
pub mod criteria;
pub mod evaluator;
pub mod handlers;
pub mod job_cache;

use thiserror::Error;

use crate::cache::CacheError;

/// Batch-level failures. Individual applications never produce one of these;
/// an application that fails or cannot be evaluated is simply left out.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("job {0} not found")]
    NotFound(i64),

    #[error("failed to load job: {0}")]
    LoadFailure(String),

    #[error("job cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("matching cancelled before all applications were evaluated")]
    Cancelled,
}

impl From<CacheError> for MatchError {
    fn from(err: CacheError) -> Self {
        MatchError::CacheUnavailable(err.to_string())
    }
}
