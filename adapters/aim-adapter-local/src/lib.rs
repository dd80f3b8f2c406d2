//! AIM local workspace
//!
//! This crate provides an in-process [`Workspace`](aim_service::Workspace)
//! for testing, development and small experiments. Jobs go through the same
//! `Submitted → Running → Completed` lifecycle as on the remote service,
//! driven by the tokio clock, so client code can be exercised without a
//! network.
//!
//! # Solver
//!
//! Problems are solved with a deterministic greedy coordinate descent:
//!
//! | Problem | Domain |
//! |---------|--------|
//! | MaxCut | spins `±1` |
//! | QUMO, binary variable | `{0, 1}` |
//! | QUMO, continuous variable | `[0, 1]` |
//!
//! The result is a local minimum of `xᵀQx + fᵀx`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use aim_adapter_local::LocalWorkspace;
//! use aim_problem::GraphProblemAdapter;
//! use aim_service::{JobClient, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let problem = GraphProblemAdapter::from_graph(&graph)?;
//!     let client = JobClient::new(Arc::new(LocalWorkspace::new()), SessionConfig::new("local"));
//!
//!     let solution = client.solve(&problem, Duration::from_secs(5)).await?;
//!     println!("Partition: {:?}", solution.partition());
//!     Ok(())
//! }
//! ```

mod search;
mod workspace;

pub use search::{SearchOutcome, local_search};
pub use workspace::{
    DEFAULT_MAX_VARIABLES, DEFAULT_QUEUE_DELAY, DEFAULT_RUN_TIME, LocalWorkspace,
};
