use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::matching::criteria::{Applicant, Application, JobCriteria};
use crate::matching::evaluator::{breakdown, Evaluation};
use crate::matching::job_cache::JobCache;
use crate::matching::MatchError;

/// Evaluates a batch of applications against one job concurrently.
///
/// The job snapshot is resolved once per batch and shared read-only by every
/// evaluation task. Output order follows task completion, not input order.
pub struct BatchMatcher {
    jobs: JobCache,
    max_concurrency: Option<usize>,
}

impl BatchMatcher {
    pub fn new(jobs: JobCache) -> Self {
        Self {
            jobs,
            max_concurrency: None,
        }
    }

    /// Caps how many evaluations run at once. `None` spawns them all immediately.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.map(|n| n.max(1));
        self
    }

    pub fn jobs(&self) -> &JobCache {
        &self.jobs
    }

    #[instrument(skip(self, applications, cancel), fields(applications = applications.len()))]
    pub async fn apply_batch(
        &self,
        job_id: i64,
        applications: Vec<Application>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Applicant>, MatchError> {
        let job = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(MatchError::Cancelled),
            job = self.jobs.get_or_load(job_id) => Arc::new(job?),
        };

        let limiter = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let mut tasks = JoinSet::new();
        for application in applications {
            let job = Arc::clone(&job);
            let limiter = limiter.clone();
            tasks.spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };
                evaluate_logged(&application, &job)
            });
        }

        let mut matched = Vec::new();
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tasks.abort_all();
                    warn!("Batch for job {job_id} cancelled with {} evaluations outstanding", tasks.len());
                    return Err(MatchError::Cancelled);
                }
                next = tasks.join_next() => match next {
                    Some(Ok(evaluation)) => {
                        if evaluation.matched {
                            matched.push(evaluation.applicant);
                        }
                    }
                    // The applicant is dropped from the result, the batch carries on.
                    Some(Err(e)) => error!("Evaluation task for job {job_id} failed: {e}"),
                    None => break,
                },
            }
        }

        info!("Job {job_id}: {} applicants matched", matched.len());
        Ok(matched)
    }
}

fn evaluate_logged(application: &Application, job: &JobCriteria) -> Evaluation {
    let report = breakdown(application, job);
    debug!(
        email = %application.email,
        failed_gate = report.failed_gate.map(|g| g.as_str()),
        points = report.points(),
        overlapping = %report.overlapping_names(),
        matched = report.matched(),
        "application evaluated"
    );
    Evaluation::from_breakdown(application, &report)
}
