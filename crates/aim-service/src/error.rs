//! Error types for the service client.

use std::time::Duration;

use aim_problem::ProblemError;
use thiserror::Error;

use crate::job::{JobId, JobStatus};

/// Coarse classification of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller's input is wrong; fix it before trying again.
    Input,
    /// Network, service or timing condition; retrying may help.
    Transient,
    /// The job itself ended without a solution.
    Job,
}

/// Errors that can occur while talking to the solving service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// Job submission failed (transport or authentication).
    #[error("Job submission failed: {0}")]
    Submission(String),

    /// The service does not know this job.
    #[error("Unknown job: {0}")]
    UnknownJob(JobId),

    /// The job has not reached a terminal state.
    #[error("Job {id} is not ready (status: {status})")]
    NotReady {
        /// The job queried.
        id: JobId,
        /// Its current status.
        status: JobStatus,
    },

    /// The job failed on the service.
    #[error("Job {id} failed: {reason}")]
    SolveFailed {
        /// The failed job.
        id: JobId,
        /// Reason reported by the service.
        reason: String,
    },

    /// The job was cancelled on the service.
    #[error("Job {0} was cancelled")]
    Cancelled(JobId),

    /// The local poll loop gave up. The remote job may still be running.
    #[error("Timed out after {waited:?} waiting for job {id} (last status: {last_status})")]
    Timeout {
        /// The job waited on.
        id: JobId,
        /// How long the loop waited.
        waited: Duration,
        /// Status seen on the final poll.
        last_status: JobStatus,
    },

    /// Network failure on a status or result query.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with something that cannot be used.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The session cannot be set up (unknown workspace, missing endpoint).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The problem could not be encoded or decoded.
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

impl ServiceError {
    /// Classify the error for retry decisions.
    pub fn class(&self) -> ErrorClass {
        match self {
            ServiceError::Problem(_)
            | ServiceError::UnknownJob(_)
            | ServiceError::Configuration(_) => ErrorClass::Input,
            ServiceError::SolveFailed { .. } | ServiceError::Cancelled(_) => ErrorClass::Job,
            ServiceError::Submission(_)
            | ServiceError::NotReady { .. }
            | ServiceError::Timeout { .. }
            | ServiceError::Transport(_)
            | ServiceError::MalformedResponse(_)
            | ServiceError::Codec(_) => ErrorClass::Transient,
        }
    }

    /// Check if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Transient
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
