//! AIM adapter for the remote optimization service
//!
//! This crate provides a [`Workspace`](aim_service::Workspace) that talks to
//! the optimization service over its JSON REST API.
//!
//! # Architecture
//!
//! 1. **Submit**: the encoded problem, time budget and precision are posted
//!    as one job
//! 2. **Poll**: the job status is queried until it is terminal
//! 3. **Collect**: the solution is fetched from the result endpoint
//!
//! Terminal statuses are cached; pending ones are always fetched.
//!
//! # Authentication
//!
//! ```bash
//! export AIM_ENDPOINT="https://aim.example.com/api"
//! export AIM_TOKEN="your-token"
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use aim_adapter_http::HttpWorkspace;
//! use aim_service::{JobClient, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SessionConfig::from_env("http")?;
//!     let workspace = HttpWorkspace::from_config(&config)?;
//!     let client = JobClient::new(Arc::new(workspace), config);
//!
//!     let job_id = client.submit(&problem, Duration::from_secs(60)).await?;
//!     let solution = client.wait(&job_id, Duration::from_secs(60)).await?;
//!     println!("Output: {:?}", solution.output);
//!     Ok(())
//! }
//! ```

mod api;
mod error;
mod workspace;

pub use api::{AimApiClient, CreateJobResponse, JobResponse};
pub use error::{HttpError, HttpResult};
pub use workspace::HttpWorkspace;
