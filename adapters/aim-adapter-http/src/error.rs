//! Error types for the HTTP adapter.

use aim_service::{JobId, ServiceError};
use thiserror::Error;

/// Result type for HTTP adapter operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors that can occur when talking to the service over HTTP.
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// No endpoint configured.
    #[error("Missing service endpoint (set AIM_ENDPOINT)")]
    MissingEndpoint,

    /// Endpoint is not an http(s) URL.
    #[error("Invalid service endpoint: {0}")]
    InvalidEndpoint(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service reported a status this adapter does not know.
    #[error("Unexpected job status: {0}")]
    UnexpectedStatus(String),

    /// API error response.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
}

impl HttpError {
    /// Convert into a [`ServiceError`], reading `NotFound` as an unknown
    /// job.
    pub fn for_job(self, job_id: &JobId) -> ServiceError {
        match self {
            HttpError::NotFound(_) => ServiceError::UnknownJob(job_id.clone()),
            other => other.into(),
        }
    }
}

impl From<HttpError> for ServiceError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::MissingEndpoint | HttpError::InvalidEndpoint(_) => {
                ServiceError::Configuration(e.to_string())
            }
            HttpError::Http(ref inner) if inner.is_decode() => {
                ServiceError::MalformedResponse(e.to_string())
            }
            HttpError::Json(_) | HttpError::UnexpectedStatus(_) => {
                ServiceError::MalformedResponse(e.to_string())
            }
            // Outside a job-scoped call a 404 means the route itself is missing.
            HttpError::NotFound(_) => ServiceError::Configuration(format!(
                "{e}; check that the service endpoint is correct"
            )),
            _ => ServiceError::Transport(e.to_string()),
        }
    }
}
