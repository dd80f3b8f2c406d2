//! The job lifecycle client.
//!
//! ```text
//!   solve() = submit() ──→ get_status()* ──→ get_result()
//!                            (poll loop bounded by timeout)
//! ```
//!
//! A `Timeout` from [`JobClient::solve`] or [`JobClient::wait`] only ends
//! the local loop. The remote job keeps running and can still be queried
//! with [`JobClient::get_status`] and collected later.

use std::sync::Arc;
use std::time::Duration;

use aim_problem::{Precision, Problem};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};

use crate::config::SessionConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::job::{JobId, JobStatus};
use crate::solution::Solution;
use crate::wire::JobRequest;
use crate::workspace::Workspace;

/// Submits problems and follows their jobs through a [`Workspace`].
///
/// The client holds only the workspace handle and immutable session
/// configuration, so it is cheap to clone and safe to share between tasks
/// waiting on different jobs.
#[derive(Clone)]
pub struct JobClient {
    workspace: Arc<dyn Workspace>,
    config: SessionConfig,
}

impl std::fmt::Debug for JobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobClient")
            .field("workspace", &self.workspace.name())
            .field("config", &self.config)
            .finish()
    }
}

impl JobClient {
    /// Create a client for a workspace and session configuration.
    pub fn new(workspace: Arc<dyn Workspace>, config: SessionConfig) -> Self {
        Self { workspace, config }
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Precision attached to every submission.
    pub fn precision(&self) -> Precision {
        self.config.precision
    }

    /// The underlying workspace.
    pub fn workspace(&self) -> &dyn Workspace {
        self.workspace.as_ref()
    }

    /// Submit a problem with a solver time budget.
    ///
    /// Any failure to hand the job over is reported as
    /// [`ServiceError::Submission`]. Nothing is retried.
    #[instrument(skip(self, problem), fields(workspace = self.workspace.name()))]
    pub async fn submit(&self, problem: &Problem, timeout: Duration) -> ServiceResult<JobId> {
        if timeout.is_zero() {
            return Err(ServiceError::Submission(
                "timeout must be greater than zero".into(),
            ));
        }

        let request = JobRequest::new(problem, timeout, self.config.precision);
        debug!(
            "Encoded {} problem: {} variables, {} quadratic entries",
            problem.kind(),
            request.problem.dimension,
            request.problem.quadratic.len()
        );

        let job_id = self
            .workspace
            .submit(&request)
            .await
            .map_err(|e| match e {
                ServiceError::Submission(_) | ServiceError::Problem(_) => e,
                other => ServiceError::Submission(other.to_string()),
            })?;

        info!(
            "Submitted {} problem ({} variables, {}, {}s) as job {}",
            problem.kind(),
            problem.dimension(),
            self.config.precision,
            request.timeout_secs,
            job_id
        );
        Ok(job_id)
    }

    /// Query the current status of a job.
    pub async fn get_status(&self, job_id: &JobId) -> ServiceResult<JobStatus> {
        self.workspace.status(job_id).await
    }

    /// Retrieve the solution of a job.
    ///
    /// Fails with `NotReady` while the job is pending, `SolveFailed` or
    /// `Cancelled` when it ended without a solution.
    #[instrument(skip(self))]
    pub async fn get_result(&self, job_id: &JobId) -> ServiceResult<Solution> {
        match self.workspace.status(job_id).await? {
            JobStatus::Completed => {}
            JobStatus::Failed(reason) => {
                return Err(ServiceError::SolveFailed {
                    id: job_id.clone(),
                    reason,
                });
            }
            JobStatus::Cancelled => return Err(ServiceError::Cancelled(job_id.clone())),
            status @ (JobStatus::Submitted | JobStatus::Running) => {
                return Err(ServiceError::NotReady {
                    id: job_id.clone(),
                    status,
                });
            }
        }

        let solution = self.workspace.result(job_id).await?;
        if solution.job_id != *job_id {
            return Err(ServiceError::MalformedResponse(format!(
                "requested result of job {job_id} but received job {}",
                solution.job_id
            )));
        }
        if !solution.is_complete() {
            return Err(ServiceError::MalformedResponse(format!(
                "job {job_id} is completed but its solution has no output"
            )));
        }
        Ok(solution)
    }

    /// Submit a problem and wait for its solution.
    ///
    /// The same `timeout` is the solver's time budget and the bound on the
    /// local poll loop.
    pub async fn solve(&self, problem: &Problem, timeout: Duration) -> ServiceResult<Solution> {
        let job_id = self.submit(problem, timeout).await?;
        self.wait(&job_id, timeout).await
    }

    /// Poll a job until it is terminal or `timeout` elapses.
    pub async fn wait(&self, job_id: &JobId, timeout: Duration) -> ServiceResult<Solution> {
        self.wait_with(job_id, timeout, |_| {}).await
    }

    /// Like [`wait`](Self::wait), reporting every observed status to
    /// `on_status`.
    ///
    /// Dropping the returned future stops polling; the job itself is not
    /// affected.
    pub async fn wait_with<F>(
        &self,
        job_id: &JobId,
        timeout: Duration,
        mut on_status: F,
    ) -> ServiceResult<Solution>
    where
        F: FnMut(&JobStatus) + Send,
    {
        let start = Instant::now();
        // `None` when the timeout reaches past what the clock can represent.
        let deadline = start.checked_add(timeout);
        let mut interval = self.config.poll.initial_interval();

        loop {
            let status = self.get_status(job_id).await?;
            on_status(&status);

            if status.is_terminal() {
                debug!("Job {} reached {} after {:?}", job_id, status, start.elapsed());
                return self.get_result(job_id).await;
            }

            let now = Instant::now();
            if deadline.is_some_and(|deadline| now >= deadline) {
                warn!(
                    "Gave up waiting for job {} after {:?}; it may still be running",
                    job_id,
                    now - start
                );
                return Err(ServiceError::Timeout {
                    id: job_id.clone(),
                    waited: now - start,
                    last_status: status,
                });
            }

            let nap = match deadline {
                Some(deadline) => interval.min(deadline - now),
                None => interval,
            };
            debug!("Job {} status: {}, polling again in {:?}", job_id, status, nap);
            sleep(nap).await;
            interval = self.config.poll.next_interval(interval);
        }
    }
}
