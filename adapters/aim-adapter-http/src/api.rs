//! REST client for the optimization service.
//!
//! ## Protocol
//!
//! 1. `POST {endpoint}/jobs` with a [`JobRequest`] body → `{ "id" }`
//! 2. Poll `GET {endpoint}/jobs/{id}` until the status is terminal
//! 3. `GET {endpoint}/jobs/{id}/result` → [`Solution`]
//!
//! Requests carry `Authorization: Bearer <token>` when a token is set.

use std::time::Duration;

use aim_service::{JobRequest, JobStatus, Solution};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{HttpError, HttpResult};

/// User agent string for submissions.
const USER_AGENT: &str = concat!("aim-adapter-http/", env!("CARGO_PKG_VERSION"));

/// Overall request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Optimization service API client.
#[derive(Clone)]
pub struct AimApiClient {
    /// HTTP client.
    client: Client,
    /// Service base URL, without trailing slash.
    base_url: String,
    /// Bearer token.
    token: Option<String>,
}

impl std::fmt::Debug for AimApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AimApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AimApiClient {
    /// Create a client for a service endpoint.
    pub fn new(endpoint: &str, token: Option<String>) -> HttpResult<Self> {
        let base_url = endpoint.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(HttpError::MissingEndpoint);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(HttpError::InvalidEndpoint(base_url));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// The service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Submit a job.
    #[instrument(skip(self, request))]
    pub async fn create_job(&self, request: &JobRequest) -> HttpResult<CreateJobResponse> {
        let url = self.url("/jobs");
        debug!("Creating job at {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get job status.
    #[instrument(skip(self))]
    pub async fn get_job(&self, job_id: &str) -> HttpResult<JobResponse> {
        let url = self.url(&format!("/jobs/{job_id}"));
        debug!("Getting job from {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Get the solution of a job.
    #[instrument(skip(self))]
    pub async fn get_result(&self, job_id: &str) -> HttpResult<Solution> {
        let url = self.url(&format!("/jobs/{job_id}/result"));
        debug!("Getting job result from {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Handle HTTP response, extracting JSON or returning an error.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> HttpResult<T> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            let message = response.text().await.unwrap_or_default();

            match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    Err(HttpError::AuthFailed(message))
                }
                StatusCode::NOT_FOUND => Err(HttpError::NotFound(message)),
                _ => Err(HttpError::ApiError {
                    status: status.as_u16(),
                    message,
                }),
            }
        }
    }
}

// ─── Response types ─────────────────────────────────────────────────

/// Job creation response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobResponse {
    /// Job ID.
    pub id: String,
}

/// Job status response.
#[derive(Debug, Clone, Deserialize)]
pub struct JobResponse {
    /// Job ID.
    pub id: String,
    /// Job status: submitted, queued, running, completed, failed, cancelled.
    pub status: String,
    /// Progress or error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl JobResponse {
    /// Map the service status string onto a [`JobStatus`].
    pub fn job_status(&self) -> HttpResult<JobStatus> {
        match self.status.to_lowercase().as_str() {
            "submitted" | "queued" | "waiting" => Ok(JobStatus::Submitted),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "failed" | "error" => Ok(JobStatus::Failed(
                self.message
                    .clone()
                    .unwrap_or_else(|| "no reason given".into()),
            )),
            "cancelled" | "canceled" | "cancelling" => Ok(JobStatus::Cancelled),
            _ => Err(HttpError::UnexpectedStatus(self.status.clone())),
        }
    }

    /// Time since the job was created, if the service reports it.
    pub fn age(&self) -> Option<chrono::Duration> {
        let created = self.created_at?;
        Some(self.updated_at.unwrap_or_else(Utc::now) - created)
    }
}
