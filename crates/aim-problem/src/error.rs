//! Error types for problem construction.

use thiserror::Error;

/// Errors raised while constructing a problem.
///
/// All of these are local and synchronous: the caller fixes its input and
/// builds again. Nothing here is ever retried automatically.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ProblemError {
    /// A term, index or dense input is invalid.
    #[error("Invalid term: {0}")]
    InvalidTerm(String),

    /// No terms, no continuity markers and no declared dimension.
    #[error("Problem is empty: no terms or variables were added")]
    EmptyProblem,

    /// The input graph cannot be converted.
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// Unrecognized precision name.
    #[error("Invalid precision '{0}' (expected one of Float16, BFloat16, Float32, Float64)")]
    InvalidPrecision(String),
}

/// Result type for problem construction.
pub type ProblemResult<T> = Result<T, ProblemError>;
