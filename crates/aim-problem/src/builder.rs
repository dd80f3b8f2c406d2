//! Incremental QUMO construction.
//!
//! ```rust
//! use aim_problem::QumoBuilder;
//!
//! let mut builder = QumoBuilder::new();
//! builder.add(-22.0 / 9.0, 0, Some(1)).unwrap();
//! builder.add(-5.0 / 2.0, 3, Some(3)).unwrap();
//! builder.add(26.0 / 9.0, 0, None).unwrap();
//! builder.set_continuous(3);
//!
//! let problem = builder.build().unwrap();
//! assert_eq!(problem.dimension(), 4);
//! assert_eq!(problem.quadratic()[[1, 0]], -22.0 / 9.0);
//! ```

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::continuous::ContinuousVariableSet;
use crate::error::{ProblemError, ProblemResult};
use crate::problem::{Problem, ProblemKind, check_continuous};
use crate::term::{MAX_VARIABLES, Term, TermAccumulator};

/// Accumulates terms and continuity markers, then freezes them into a
/// [`Problem`].
///
/// The dimension is inferred at [`build`](Self::build) time as one past the
/// highest referenced index, unless fixed up front with
/// [`with_dimension`](Self::with_dimension).
#[derive(Debug, Clone, Default)]
pub struct QumoBuilder {
    terms: TermAccumulator,
    continuous: ContinuousVariableSet,
    dimension: Option<usize>,
    kind: ProblemKind,
}

impl QumoBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a fixed number of variables.
    ///
    /// Terms and markers beyond `dimension` are rejected at build time.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: Some(dimension),
            ..Self::default()
        }
    }

    /// Tag the built problem with a solver kind.
    pub fn kind(mut self, kind: ProblemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a coefficient: quadratic on `(i, j)` or linear on `i` when `j` is
    /// `None`. Repeated calls on the same (unordered) indices sum.
    pub fn add(&mut self, coefficient: f64, i: usize, j: Option<usize>) -> ProblemResult<&mut Self> {
        self.terms.add(coefficient, i, j)?;
        Ok(self)
    }

    /// Add a [`Term`].
    pub fn push(&mut self, term: Term) -> ProblemResult<&mut Self> {
        self.terms.push(term)?;
        Ok(self)
    }

    /// Add every term from an iterator, stopping at the first invalid one.
    pub fn extend<I>(&mut self, terms: I) -> ProblemResult<&mut Self>
    where
        I: IntoIterator<Item = Term>,
    {
        for term in terms {
            self.terms.push(term)?;
        }
        Ok(self)
    }

    /// Mark variable `i` as continuous (box-constrained).
    pub fn set_continuous(&mut self, i: usize) -> &mut Self {
        self.continuous.insert(i);
        self
    }

    /// Terms recorded so far.
    pub fn terms(&self) -> &TermAccumulator {
        &self.terms
    }

    /// Continuity markers recorded so far.
    pub fn continuous(&self) -> &ContinuousVariableSet {
        &self.continuous
    }

    /// Dimension the built problem will have, if it can be known yet.
    pub fn dimension(&self) -> usize {
        self.dimension.unwrap_or_else(|| {
            self.terms
                .max_index()
                .max(self.continuous.max_index())
                .map_or(0, |max| max + 1)
        })
    }

    /// Freeze the accumulated state into an immutable [`Problem`].
    pub fn build(self) -> ProblemResult<Problem> {
        let n = self.dimension();
        if n == 0 {
            return Err(ProblemError::EmptyProblem);
        }
        if n > MAX_VARIABLES {
            return Err(ProblemError::InvalidTerm(format!(
                "dimension {n} exceeds the maximum of {MAX_VARIABLES} variables"
            )));
        }
        if let Some(max) = self.terms.max_index() {
            if max >= n {
                return Err(ProblemError::InvalidTerm(format!(
                    "index {max} is out of range for dimension {n}"
                )));
            }
        }

        let continuous = self.continuous.into_inner();
        check_continuous(&continuous, n)?;

        let mut quadratic = Array2::<f64>::zeros((n, n));
        for ((i, j), coefficient) in self.terms.quadratic_entries() {
            quadratic[[i, j]] = coefficient;
            if i != j {
                quadratic[[j, i]] = coefficient;
            }
        }

        let mut field = Array1::<f64>::zeros(n);
        for (i, coefficient) in self.terms.linear_entries() {
            field[i] += coefficient;
        }

        debug!(
            "Built {} problem: {} variables, {} entries, {} continuous",
            self.kind,
            n,
            self.terms.len(),
            continuous.len()
        );

        Ok(Problem::from_parts(self.kind, quadratic, field, continuous))
    }
}
