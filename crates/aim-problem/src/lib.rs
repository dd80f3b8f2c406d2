//! AIM Problem Construction
//!
//! This crate builds the quadratic optimization problems submitted to the
//! AIM optimization service.
//!
//! # Overview
//!
//! A problem minimises `xᵀQx + fᵀx` over a mix of binary and continuous
//! (box-constrained) variables. Problems are built once and never mutated:
//!
//! - [`TermAccumulator`] collects quadratic and linear coefficients, summing
//!   repeated contributions to the same (unordered) index pair
//! - [`ContinuousVariableSet`] tracks which variables are continuous
//! - [`QumoBuilder`] composes both and freezes them into a [`Problem`]
//! - [`GraphProblemAdapter`] turns a weighted graph into a MaxCut problem
//! - [`EdgeList`] parses the edge-list files the console tools consume
//! - [`Precision`] selects the numeric width the service solves with
//!
//! # Example: MaxCut on a Cycle
//!
//! ```rust
//! use aim_problem::{GraphProblemAdapter, ProblemKind};
//! use petgraph::graph::UnGraph;
//!
//! let graph = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
//! let problem = GraphProblemAdapter::from_graph(&graph).unwrap();
//!
//! assert_eq!(problem.kind(), ProblemKind::MaxCut);
//! assert_eq!(problem.dimension(), 4);
//! assert_eq!(problem.quadratic()[[0, 1]], problem.quadratic()[[1, 0]]);
//! ```

pub mod builder;
pub mod continuous;
pub mod edgelist;
pub mod error;
pub mod graph;
pub mod precision;
pub mod problem;
pub mod term;

pub use builder::QumoBuilder;
pub use continuous::ContinuousVariableSet;
pub use edgelist::EdgeList;
pub use error::{ProblemError, ProblemResult};
pub use graph::{DEFAULT_EDGE_WEIGHT, EdgeWeight, GraphProblemAdapter, cut_value};
pub use precision::Precision;
pub use problem::{Problem, ProblemKind};
pub use term::{MAX_VARIABLES, Term, TermAccumulator};
