//! Job lifecycle types.
//!
//! The job state machine, as observed by polling:
//!
//! ```text
//!   submit() ──→ Submitted ──→ Running ──→ Completed
//!                   │            │
//!                   │            ├──→ Failed(reason)
//!                   │            │
//!                   └────────────┴──→ Cancelled
//! ```
//!
//! **Invariants:**
//! - A freshly submitted job is `Submitted`.
//! - Transitions are driven by the service; the client only observes them.
//! - Terminal states (`Completed`, `Failed`, `Cancelled`) are permanent.
//! - A result exists only for `Completed` jobs.

use serde::{Deserialize, Serialize};

/// Opaque identifier the service assigns to a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepted by the service, not yet started.
    Submitted,
    /// Currently being solved.
    Running,
    /// Finished; a solution is available.
    Completed,
    /// The service gave up on the job.
    Failed(String),
    /// The job was cancelled on the service side.
    Cancelled,
}

impl JobStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed(_) | JobStatus::Cancelled
        )
    }

    /// Check if the job is still pending (submitted or running).
    pub fn is_pending(&self) -> bool {
        matches!(self, JobStatus::Submitted | JobStatus::Running)
    }

    /// Check if the job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Submitted => write!(f, "Submitted"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Failed(msg) => write!(f, "Failed: {msg}"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_terminal() {
        assert!(!JobStatus::Submitted.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed("error".into()).is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_job_status_pending() {
        assert!(JobStatus::Submitted.is_pending());
        assert!(JobStatus::Running.is_pending());
        assert!(!JobStatus::Cancelled.is_pending());
    }

    #[test]
    fn test_job_status_wire_form() {
        let json = serde_json::to_value(JobStatus::Running).unwrap();
        assert_eq!(json, serde_json::json!({"state": "running"}));

        let json = serde_json::to_value(JobStatus::Failed("diverged".into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"state": "failed", "reason": "diverged"})
        );
    }

    #[test]
    fn test_job_id_transparent() {
        let id = JobId::new("8d2f");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"8d2f\"");
        assert_eq!(id.to_string(), "8d2f");
    }
}
