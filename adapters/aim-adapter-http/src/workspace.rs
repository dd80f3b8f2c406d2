//! HTTP workspace implementation.

use std::sync::Arc;

use aim_service::{
    JobId, JobRequest, JobStatus, ServiceError, ServiceResult, SessionConfig, Solution, Workspace,
};
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::api::AimApiClient;
use crate::error::HttpError;

/// Maximum number of cached terminal statuses before the cache is reset.
const MAX_CACHED_JOBS: usize = 10_000;

/// A workspace backed by the remote optimization service.
///
/// # Authentication
///
/// ```bash
/// export AIM_ENDPOINT="https://aim.example.com/api"
/// export AIM_TOKEN="your-token"
/// ```
pub struct HttpWorkspace {
    /// Workspace name.
    name: String,
    /// API client.
    client: AimApiClient,
    /// Terminal statuses already observed; these never change.
    finished: Arc<Mutex<FxHashMap<String, JobStatus>>>,
}

impl HttpWorkspace {
    /// Create a workspace for an endpoint and optional token.
    pub fn new(endpoint: &str, token: Option<String>) -> ServiceResult<Self> {
        Ok(Self {
            name: "http".into(),
            client: AimApiClient::new(endpoint, token)?,
            finished: Arc::new(Mutex::new(FxHashMap::default())),
        })
    }

    /// Create a workspace from a session configuration.
    pub fn from_config(config: &SessionConfig) -> ServiceResult<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or(HttpError::MissingEndpoint)?;
        let mut workspace = Self::new(endpoint, config.token.clone())?;
        workspace.name = config.workspace.clone();
        Ok(workspace)
    }

    /// The service base URL.
    pub fn endpoint(&self) -> &str {
        self.client.base_url()
    }

    async fn remember(&self, job_id: &JobId, status: &JobStatus) {
        if !status.is_terminal() {
            return;
        }
        let mut finished = self.finished.lock().await;
        if finished.len() >= MAX_CACHED_JOBS {
            debug!("Status cache full, clearing {} entries", finished.len());
            finished.clear();
        }
        finished.insert(job_id.0.clone(), status.clone());
    }
}

#[async_trait]
impl Workspace for HttpWorkspace {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, request), fields(endpoint = self.client.base_url()))]
    async fn submit(&self, request: &JobRequest) -> ServiceResult<JobId> {
        let response = self
            .client
            .create_job(request)
            .await
            .map_err(|e| ServiceError::Submission(e.to_string()))?;

        if response.id.is_empty() {
            return Err(ServiceError::Submission(
                "service returned an empty job id".into(),
            ));
        }

        info!(
            "Service accepted job {} ({} variables, {})",
            response.id, request.problem.dimension, request.precision
        );
        Ok(JobId::new(response.id))
    }

    async fn status(&self, job_id: &JobId) -> ServiceResult<JobStatus> {
        if let Some(status) = self.finished.lock().await.get(job_id.as_str()) {
            return Ok(status.clone());
        }

        let response = self
            .client
            .get_job(job_id.as_str())
            .await
            .map_err(|e| e.for_job(job_id))?;
        if response.id != job_id.as_str() {
            return Err(ServiceError::MalformedResponse(format!(
                "asked for job {job_id} but the service answered for {}",
                response.id
            )));
        }

        let status = response.job_status()?;
        if let Some(age) = response.age() {
            debug!("Job {} is {} ({}s old)", job_id, status, age.num_seconds());
        }
        self.remember(job_id, &status).await;
        Ok(status)
    }

    async fn result(&self, job_id: &JobId) -> ServiceResult<Solution> {
        let solution = self
            .client
            .get_result(job_id.as_str())
            .await
            .map_err(|e| e.for_job(job_id))?;

        match &solution.status {
            JobStatus::Completed => Ok(solution),
            JobStatus::Failed(reason) => Err(ServiceError::SolveFailed {
                id: job_id.clone(),
                reason: reason.clone(),
            }),
            JobStatus::Cancelled => Err(ServiceError::Cancelled(job_id.clone())),
            status => Err(ServiceError::NotReady {
                id: job_id.clone(),
                status: status.clone(),
            }),
        }
    }
}
