//! Wire encoding of problems and job requests.
//!
//! The quadratic matrix travels as its upper-triangular non-zero entries;
//! decoding mirrors them back, so a decoded problem is symmetric by
//! construction and equal to the one encoded.

use std::time::Duration;

use aim_problem::{Precision, Problem, ProblemError, ProblemKind, QumoBuilder};
use serde::{Deserialize, Serialize};

/// Serialized form of a [`Problem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireProblem {
    /// Target solver.
    pub kind: ProblemKind,
    /// Number of variables.
    pub dimension: usize,
    /// Non-zero entries `(i, j, value)` with `i <= j`.
    pub quadratic: Vec<(usize, usize, f64)>,
    /// Dense field vector of length `dimension`.
    pub field: Vec<f64>,
    /// Continuous variable indices, ascending.
    #[serde(default)]
    pub continuous: Vec<usize>,
}

impl From<&Problem> for WireProblem {
    fn from(problem: &Problem) -> Self {
        let quadratic = problem
            .quadratic()
            .indexed_iter()
            .filter(|&((i, j), &v)| i <= j && v != 0.0)
            .map(|((i, j), &v)| (i, j, v))
            .collect();

        Self {
            kind: problem.kind(),
            dimension: problem.dimension(),
            quadratic,
            field: problem.field().to_vec(),
            continuous: problem.continuous().iter().copied().collect(),
        }
    }
}

impl TryFrom<WireProblem> for Problem {
    type Error = ProblemError;

    fn try_from(wire: WireProblem) -> Result<Self, Self::Error> {
        if wire.field.len() != wire.dimension {
            return Err(ProblemError::InvalidTerm(format!(
                "field has length {} but dimension is {}",
                wire.field.len(),
                wire.dimension
            )));
        }

        let mut builder = QumoBuilder::with_dimension(wire.dimension).kind(wire.kind);
        for (i, j, v) in wire.quadratic {
            if i > j {
                return Err(ProblemError::InvalidTerm(format!(
                    "quadratic entry ({i}, {j}) is below the diagonal"
                )));
            }
            builder.add(v, i, Some(j))?;
        }
        for (i, v) in wire.field.into_iter().enumerate() {
            if v != 0.0 {
                builder.add(v, i, None)?;
            }
        }
        for i in wire.continuous {
            builder.set_continuous(i);
        }
        builder.build()
    }
}

/// Everything the service needs to run a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    /// The encoded problem.
    pub problem: WireProblem,
    /// Solver time budget in whole seconds.
    pub timeout_secs: u64,
    /// Numeric precision for the solve.
    pub precision: Precision,
}

impl JobRequest {
    /// Encode a problem with its time budget and precision.
    ///
    /// Sub-second budgets round up to the next whole second, saturating at
    /// `u64::MAX`.
    pub fn new(problem: &Problem, timeout: Duration, precision: Precision) -> Self {
        let secs = timeout
            .as_secs()
            .saturating_add(u64::from(timeout.subsec_nanos() > 0));
        Self {
            problem: WireProblem::from(problem),
            timeout_secs: secs,
            precision,
        }
    }

    /// Time budget as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Decode the carried problem.
    pub fn decode_problem(&self) -> Result<Problem, ProblemError> {
        Problem::try_from(self.problem.clone())
    }
}
