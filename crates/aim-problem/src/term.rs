//! Coefficient terms and their accumulator.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ProblemError, ProblemResult};

/// Largest number of variables a dense problem may declare.
///
/// The quadratic matrix is stored densely, so an index is also an
/// allocation request of `index²` entries. At this bound the matrix takes
/// 2 GiB of `f64`.
pub const MAX_VARIABLES: usize = 1 << 14;

/// A single coefficient contribution.
///
/// `j == None` makes the term linear (field vector at `i`); otherwise it is
/// quadratic and affects the matrix at `(i, j)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Coefficient value.
    pub coefficient: f64,
    /// First variable index.
    pub i: usize,
    /// Second variable index for quadratic terms.
    pub j: Option<usize>,
}

impl Term {
    /// A quadratic term on `(i, j)`.
    pub fn quadratic(coefficient: f64, i: usize, j: usize) -> Self {
        Self {
            coefficient,
            i,
            j: Some(j),
        }
    }

    /// A linear term on `i`.
    pub fn linear(coefficient: f64, i: usize) -> Self {
        Self {
            coefficient,
            i,
            j: None,
        }
    }

    /// Check if this term is linear.
    pub fn is_linear(&self) -> bool {
        self.j.is_none()
    }

    /// Highest index this term references.
    pub fn max_index(&self) -> usize {
        self.j.map_or(self.i, |j| self.i.max(j))
    }

    fn validate(&self) -> ProblemResult<()> {
        if !self.coefficient.is_finite() {
            return Err(ProblemError::InvalidTerm(format!(
                "coefficient {} on {self} is not finite",
                self.coefficient
            )));
        }
        if self.max_index() >= MAX_VARIABLES {
            return Err(ProblemError::InvalidTerm(format!(
                "index {} on {self} exceeds the maximum of {} variables",
                self.max_index(),
                MAX_VARIABLES
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.j {
            Some(j) => write!(f, "x{}·x{}", self.i, j),
            None => write!(f, "x{}", self.i),
        }
    }
}

/// Collects quadratic and linear contributions, summing duplicates.
///
/// Quadratic entries are keyed on the unordered pair
/// `(min(i, j), max(i, j))`, so `add(c, 1, 0)` and `add(c, 0, 1)` land on
/// the same coefficient.
#[derive(Debug, Clone, Default)]
pub struct TermAccumulator {
    quadratic: FxHashMap<(usize, usize), f64>,
    linear: FxHashMap<usize, f64>,
}

impl TermAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contribution, summing into any existing entry.
    pub fn add(&mut self, coefficient: f64, i: usize, j: Option<usize>) -> ProblemResult<()> {
        self.push(Term { coefficient, i, j })
    }

    /// Record a [`Term`].
    pub fn push(&mut self, term: Term) -> ProblemResult<()> {
        term.validate()?;
        match term.j {
            Some(j) => {
                let key = (term.i.min(j), term.i.max(j));
                *self.quadratic.entry(key).or_insert(0.0) += term.coefficient;
            }
            None => {
                *self.linear.entry(term.i).or_insert(0.0) += term.coefficient;
            }
        }
        Ok(())
    }

    /// Accumulated quadratic coefficient for the unordered pair `(i, j)`.
    pub fn quadratic(&self, i: usize, j: usize) -> Option<f64> {
        self.quadratic.get(&(i.min(j), i.max(j))).copied()
    }

    /// Accumulated linear coefficient for `i`.
    pub fn linear(&self, i: usize) -> Option<f64> {
        self.linear.get(&i).copied()
    }

    /// Iterate quadratic entries as `((i, j), coefficient)` with `i <= j`.
    pub fn quadratic_entries(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.quadratic.iter().map(|(&k, &v)| (k, v))
    }

    /// Iterate linear entries as `(i, coefficient)`.
    pub fn linear_entries(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.linear.iter().map(|(&k, &v)| (k, v))
    }

    /// Highest index referenced by any term.
    pub fn max_index(&self) -> Option<usize> {
        let q = self.quadratic.keys().map(|&(_, hi)| hi).max();
        let l = self.linear.keys().copied().max();
        q.max(l)
    }

    /// Number of distinct coefficient entries.
    pub fn len(&self) -> usize {
        self.quadratic.len() + self.linear.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.quadratic.is_empty() && self.linear.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_summed() {
        let mut acc = TermAccumulator::new();
        acc.add(1.5, 0, Some(1)).unwrap();
        acc.add(2.0, 1, Some(0)).unwrap();
        acc.add(-0.5, 0, Some(1)).unwrap();

        assert_eq!(acc.quadratic(0, 1), Some(3.0));
        assert_eq!(acc.quadratic(1, 0), Some(3.0));
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn test_linear_and_quadratic_are_separate() {
        let mut acc = TermAccumulator::new();
        acc.add(4.0, 2, None).unwrap();
        acc.add(1.0, 2, Some(2)).unwrap();

        assert_eq!(acc.linear(2), Some(4.0));
        assert_eq!(acc.quadratic(2, 2), Some(1.0));
        assert_eq!(acc.max_index(), Some(2));
    }

    #[test]
    fn test_non_finite_coefficient_rejected() {
        let mut acc = TermAccumulator::new();
        assert!(matches!(
            acc.add(f64::NAN, 0, None),
            Err(ProblemError::InvalidTerm(_))
        ));
        assert!(matches!(
            acc.add(f64::INFINITY, 0, Some(1)),
            Err(ProblemError::InvalidTerm(_))
        ));
        assert!(acc.is_empty());
    }

    #[test]
    fn test_index_limit() {
        let mut acc = TermAccumulator::new();
        let err = acc.add(1.0, 0, Some(MAX_VARIABLES)).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
        acc.add(1.0, 0, Some(MAX_VARIABLES - 1)).unwrap();
    }

    #[test]
    fn test_index_limit_bounds_dense_matrix() {
        let bytes = MAX_VARIABLES * MAX_VARIABLES * std::mem::size_of::<f64>();
        assert!(bytes <= 1 << 31);
    }

    #[test]
    fn test_term_display() {
        assert_eq!(Term::quadratic(1.0, 3, 4).to_string(), "x3·x4");
        assert_eq!(Term::linear(1.0, 7).to_string(), "x7");
        assert!(Term::linear(1.0, 7).is_linear());
    }
}
