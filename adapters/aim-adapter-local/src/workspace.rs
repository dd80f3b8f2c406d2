//! In-process workspace implementation.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use aim_service::{
    JobId, JobRequest, JobStatus, Precision, ServiceError, ServiceResult, SessionConfig, Solution,
    Workspace,
};
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::search::{SearchOutcome, local_search};

/// Default time a job spends in `Submitted`.
pub const DEFAULT_QUEUE_DELAY: Duration = Duration::from_millis(100);

/// Default time a job spends in `Running`.
pub const DEFAULT_RUN_TIME: Duration = Duration::from_millis(500);

/// Default largest accepted problem.
pub const DEFAULT_MAX_VARIABLES: usize = 4096;

/// Service-side override of a job's fate.
#[derive(Debug, Clone)]
enum Override {
    Failed(String),
    Cancelled,
}

/// Job data for the local workspace.
struct LocalJob {
    submitted_at: Instant,
    run_time: Duration,
    outcome: SearchOutcome,
    precision: Precision,
    overridden: Option<Override>,
}

impl LocalJob {
    fn status(&self, queue_delay: Duration) -> JobStatus {
        match &self.overridden {
            Some(Override::Failed(reason)) => return JobStatus::Failed(reason.clone()),
            Some(Override::Cancelled) => return JobStatus::Cancelled,
            None => {}
        }

        let elapsed = self.submitted_at.elapsed();
        if elapsed < queue_delay {
            JobStatus::Submitted
        } else if elapsed < queue_delay + self.run_time {
            JobStatus::Running
        } else {
            JobStatus::Completed
        }
    }
}

/// A workspace that solves jobs in-process.
///
/// Jobs are solved eagerly on submission with a greedy local search. Their
/// observable status follows the clock: `Submitted` for the queue delay,
/// `Running` for the run time (capped by the job's time budget), then
/// `Completed`.
pub struct LocalWorkspace {
    name: String,
    jobs: Arc<Mutex<FxHashMap<String, LocalJob>>>,
    queue_delay: Duration,
    run_time: Duration,
    max_variables: usize,
}

impl LocalWorkspace {
    /// Create a local workspace with default timings.
    pub fn new() -> Self {
        Self {
            name: "local".into(),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            queue_delay: DEFAULT_QUEUE_DELAY,
            run_time: DEFAULT_RUN_TIME,
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }

    /// Create a local workspace from a session configuration.
    pub fn from_config(config: &SessionConfig) -> ServiceResult<Self> {
        Ok(Self {
            name: config.workspace.clone(),
            ..Self::new()
        })
    }

    /// Set how long jobs stay `Submitted` and then `Running`.
    pub fn with_timings(mut self, queue_delay: Duration, run_time: Duration) -> Self {
        self.queue_delay = queue_delay;
        self.run_time = run_time;
        self
    }

    /// Set the largest accepted problem.
    pub fn with_max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = max_variables;
        self
    }

    /// Mark a job as failed, as the service would on a solver error.
    ///
    /// Returns `false` if the job had already reached a terminal state.
    pub fn fail_job(&self, job_id: &JobId, reason: impl Into<String>) -> ServiceResult<bool> {
        self.set_override(job_id, Override::Failed(reason.into()))
    }

    /// Cancel a job on the service side.
    ///
    /// Returns `false` if the job had already reached a terminal state.
    pub fn cancel_job(&self, job_id: &JobId) -> ServiceResult<bool> {
        self.set_override(job_id, Override::Cancelled)
    }

    /// Number of jobs this workspace has accepted.
    pub fn job_count(&self) -> usize {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn set_override(&self, job_id: &JobId, fate: Override) -> ServiceResult<bool> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let job = jobs
            .get_mut(job_id.as_str())
            .ok_or_else(|| ServiceError::UnknownJob(job_id.clone()))?;
        if job.status(self.queue_delay).is_terminal() {
            return Ok(false);
        }
        debug!("Job {} overridden: {:?}", job_id, fate);
        job.overridden = Some(fate);
        Ok(true)
    }
}

impl Default for LocalWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Workspace for LocalWorkspace {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, request), fields(timeout_secs = request.timeout_secs))]
    async fn submit(&self, request: &JobRequest) -> ServiceResult<JobId> {
        let dimension = request.problem.dimension;
        if dimension > self.max_variables {
            return Err(ServiceError::Submission(format!(
                "problem has {} variables but the local workspace accepts at most {}",
                dimension, self.max_variables
            )));
        }
        let problem = request.decode_problem()?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let outcome = local_search(&problem);
        let job = LocalJob {
            submitted_at: Instant::now(),
            run_time: self.run_time.min(request.timeout()),
            outcome,
            precision: request.precision,
            overridden: None,
        };

        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(job_id.0.clone(), job);

        debug!(
            "Accepted job {} ({} variables, {})",
            job_id,
            problem.dimension(),
            request.precision
        );
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> ServiceResult<JobStatus> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get(job_id.as_str())
            .map(|job| job.status(self.queue_delay))
            .ok_or_else(|| ServiceError::UnknownJob(job_id.clone()))
    }

    async fn result(&self, job_id: &JobId) -> ServiceResult<Solution> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let job = jobs
            .get(job_id.as_str())
            .ok_or_else(|| ServiceError::UnknownJob(job_id.clone()))?;

        match job.status(self.queue_delay) {
            JobStatus::Completed => Ok(Solution::new(job_id.clone(), job.outcome.output.clone())
                .with_objective(job.outcome.objective)
                .with_metadata("solver", "local-search".into())
                .with_metadata("sweeps", job.outcome.sweeps.into())
                .with_metadata("precision", job.precision.as_str().into())),
            JobStatus::Failed(reason) => Err(ServiceError::SolveFailed {
                id: job_id.clone(),
                reason,
            }),
            JobStatus::Cancelled => Err(ServiceError::Cancelled(job_id.clone())),
            status => Err(ServiceError::NotReady {
                id: job_id.clone(),
                status,
            }),
        }
    }
}
