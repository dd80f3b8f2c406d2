//! The workspace trait: the client's handle on a solving service.
//!
//! ```text
//!   submit() ──→ status() ──→ result()
//!    (async)     (async)      (async)
//! ```
//!
//! | Method | Kind | Returns |
//! |--------|------|---------|
//! | `name()` | sync | `&str` |
//! | `submit()` | async | `ServiceResult<JobId>` |
//! | `status()` | async | `ServiceResult<JobStatus>` |
//! | `result()` | async | `ServiceResult<Solution>` |
//!
//! There is no `cancel()`: once submitted, a job runs until the service
//! finishes or drops it.

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::job::{JobId, JobStatus};
use crate::solution::Solution;
use crate::wire::JobRequest;

/// Transport-level access to a solving service.
///
/// Implementations own authentication and connection handling; the
/// [`JobClient`](crate::JobClient) builds on top of this trait and adds
/// validation and the poll loop.
///
/// # Contract
///
/// - `submit()` returns an id whose first observable status is `Submitted`
///   (or any later state, if the service is quick).
/// - `status()` is side-effect free and fails with `UnknownJob` for ids
///   the service never issued.
/// - `result()` returns a [`Solution`] once the job is `Completed`; for any
///   other state it reports the status through the matching error.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Get the name of this workspace.
    fn name(&self) -> &str;

    /// Submit an encoded job.
    async fn submit(&self, request: &JobRequest) -> ServiceResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> ServiceResult<JobStatus>;

    /// Get the solution of a completed job.
    async fn result(&self, job_id: &JobId) -> ServiceResult<Solution>;
}
