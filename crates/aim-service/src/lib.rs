//! AIM service client
//!
//! This crate submits optimization problems built with [`aim_problem`] to a
//! solving service and follows the resulting jobs to completion.
//!
//! # Overview
//!
//! - A [`Workspace`] trait for transport-level access to a service
//! - A [`JobClient`] adding validation, precision and the poll loop
//! - [`SessionConfig`] carrying endpoint, credentials and precision
//! - A [`WorkspaceRegistry`] for choosing a workspace by name
//!
//! # Workspaces
//!
//! | Workspace | Crate | Authentication |
//! |-----------|-------|----------------|
//! | In-process | `aim-adapter-local` | None |
//! | HTTP service | `aim-adapter-http` | `AIM_TOKEN` env var |
//!
//! # Example: Solving a Problem
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use aim_problem::{Precision, QumoBuilder};
//! use aim_service::{JobClient, SessionConfig};
//! use aim_adapter_local::LocalWorkspace;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut builder = QumoBuilder::new();
//!     builder.add(-22.0 / 9.0, 0, Some(1))?;
//!     builder.add(26.0 / 9.0, 0, None)?;
//!     let problem = builder.build()?;
//!
//!     let config = SessionConfig::new("local").with_precision(Precision::Float32);
//!     let client = JobClient::new(Arc::new(LocalWorkspace::new()), config);
//!
//!     let solution = client.solve(&problem, Duration::from_secs(10)).await?;
//!     println!("Output: {:?}", solution.output);
//!     Ok(())
//! }
//! ```
//!
//! # Implementing a Custom Workspace
//!
//! ```ignore
//! use aim_service::{JobId, JobRequest, JobStatus, ServiceResult, Solution, Workspace};
//! use async_trait::async_trait;
//!
//! struct MyWorkspace;
//!
//! #[async_trait]
//! impl Workspace for MyWorkspace {
//!     fn name(&self) -> &str { "mine" }
//!
//!     async fn submit(&self, request: &JobRequest) -> ServiceResult<JobId> {
//!         // Hand the encoded problem to the service
//!         # todo!()
//!     }
//!
//!     async fn status(&self, job_id: &JobId) -> ServiceResult<JobStatus> {
//!         # todo!()
//!     }
//!
//!     async fn result(&self, job_id: &JobId) -> ServiceResult<Solution> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod job;
pub mod poll;
pub mod registry;
pub mod solution;
pub mod wire;
pub mod workspace;

pub use aim_problem::Precision;
pub use client::JobClient;
pub use config::{ENV_ENDPOINT, ENV_PRECISION, ENV_TOKEN, SessionConfig};
pub use error::{ErrorClass, ServiceError, ServiceResult};
pub use job::{JobId, JobStatus};
pub use poll::PollPolicy;
pub use registry::WorkspaceRegistry;
pub use solution::Solution;
pub use wire::{JobRequest, WireProblem};
pub use workspace::Workspace;
