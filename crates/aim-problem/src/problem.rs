//! The immutable problem representation.

use std::collections::BTreeSet;
use std::fmt;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{ProblemError, ProblemResult};
use crate::term::MAX_VARIABLES;

/// Which service solver a problem targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Quadratic unconstrained mixed optimization (binary + boxed variables).
    #[default]
    Qumo,
    /// Graph max-cut in the spin formulation.
    MaxCut,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemKind::Qumo => write!(f, "QUMO"),
            ProblemKind::MaxCut => write!(f, "MaxCut"),
        }
    }
}

/// A quadratic optimization problem.
///
/// Invariants, checked on every construction path:
/// - `quadratic` is `N×N` and symmetric,
/// - `field` has length `N`,
/// - every continuous index is `< N`,
/// - every entry is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    kind: ProblemKind,
    quadratic: Array2<f64>,
    field: Array1<f64>,
    continuous: BTreeSet<usize>,
}

impl Problem {
    /// Build a QUMO problem directly from dense arrays.
    ///
    /// Fails with [`ProblemError::InvalidTerm`] if the matrix is not square
    /// and symmetric, the field length differs, an entry is not finite, or a
    /// continuous index is out of range.
    pub fn new(
        quadratic: Array2<f64>,
        field: Option<Array1<f64>>,
        continuous: impl IntoIterator<Item = usize>,
    ) -> ProblemResult<Self> {
        let (rows, cols) = quadratic.dim();
        if rows != cols {
            return Err(ProblemError::InvalidTerm(format!(
                "quadratic matrix must be square, got {rows}×{cols}"
            )));
        }
        if rows == 0 {
            return Err(ProblemError::EmptyProblem);
        }
        if rows > MAX_VARIABLES {
            return Err(ProblemError::InvalidTerm(format!(
                "dimension {rows} exceeds the maximum of {MAX_VARIABLES} variables"
            )));
        }

        let field = field.unwrap_or_else(|| Array1::zeros(rows));
        if field.len() != rows {
            return Err(ProblemError::InvalidTerm(format!(
                "field has length {} but the matrix is {rows}×{rows}",
                field.len()
            )));
        }

        if let Some(((i, j), v)) = quadratic.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ProblemError::InvalidTerm(format!(
                "quadratic[{i}][{j}] = {v} is not finite"
            )));
        }
        if let Some((i, v)) = field.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ProblemError::InvalidTerm(format!(
                "field[{i}] = {v} is not finite"
            )));
        }

        for i in 0..rows {
            for j in (i + 1)..rows {
                if quadratic[[i, j]] != quadratic[[j, i]] {
                    return Err(ProblemError::InvalidTerm(format!(
                        "quadratic matrix is not symmetric at ({i}, {j}): {} != {}",
                        quadratic[[i, j]],
                        quadratic[[j, i]]
                    )));
                }
            }
        }

        let continuous: BTreeSet<usize> = continuous.into_iter().collect();
        check_continuous(&continuous, rows)?;

        Ok(Self {
            kind: ProblemKind::Qumo,
            quadratic,
            field,
            continuous,
        })
    }

    /// Assemble from parts already known to satisfy the invariants.
    pub(crate) fn from_parts(
        kind: ProblemKind,
        quadratic: Array2<f64>,
        field: Array1<f64>,
        continuous: BTreeSet<usize>,
    ) -> Self {
        debug_assert_eq!(quadratic.nrows(), field.len());
        Self {
            kind,
            quadratic,
            field,
            continuous,
        }
    }

    /// Return the same problem tagged with another kind.
    pub fn with_kind(mut self, kind: ProblemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Number of variables.
    pub fn dimension(&self) -> usize {
        self.field.len()
    }

    /// Target solver.
    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    /// The symmetric quadratic matrix.
    pub fn quadratic(&self) -> &Array2<f64> {
        &self.quadratic
    }

    /// The linear field vector.
    pub fn field(&self) -> &Array1<f64> {
        &self.field
    }

    /// Continuous variable indices.
    pub fn continuous(&self) -> &BTreeSet<usize> {
        &self.continuous
    }

    /// Check if variable `i` is continuous.
    pub fn is_continuous(&self, i: usize) -> bool {
        self.continuous.contains(&i)
    }

    /// Check if all variables are binary (the problem is a QUBO).
    pub fn is_qubo(&self) -> bool {
        self.continuous.is_empty()
    }

    /// Check if any linear coefficient is non-zero.
    pub fn has_field(&self) -> bool {
        self.field.iter().any(|&v| v != 0.0)
    }

    /// Number of non-zero entries on or above the diagonal.
    pub fn num_interactions(&self) -> usize {
        self.quadratic
            .indexed_iter()
            .filter(|((i, j), v)| i <= j && **v != 0.0)
            .count()
    }

    /// Evaluate `xᵀQx + fᵀx` for an assignment.
    pub fn objective(&self, x: &[f64]) -> ProblemResult<f64> {
        if x.len() != self.dimension() {
            return Err(ProblemError::InvalidTerm(format!(
                "assignment has {} values but the problem has {} variables",
                x.len(),
                self.dimension()
            )));
        }
        let x = Array1::from(x.to_vec());
        Ok(x.dot(&self.quadratic.dot(&x)) + self.field.dot(&x))
    }
}

pub(crate) fn check_continuous(continuous: &BTreeSet<usize>, dimension: usize) -> ProblemResult<()> {
    match continuous.last() {
        Some(&i) if i >= dimension => Err(ProblemError::InvalidTerm(format!(
            "continuous variable {i} is out of range for dimension {dimension}"
        ))),
        _ => Ok(()),
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} problem: {} variables ({} continuous), {} interactions",
            self.kind,
            self.dimension(),
            self.continuous.len(),
            self.num_interactions()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_from_dense() {
        let q = array![[0.0, 1.0], [1.0, -2.0]];
        let problem = Problem::new(q, Some(array![0.5, 0.0]), [1]).unwrap();

        assert_eq!(problem.dimension(), 2);
        assert_eq!(problem.kind(), ProblemKind::Qumo);
        assert!(problem.is_continuous(1));
        assert!(!problem.is_qubo());
        assert!(problem.has_field());
        assert_eq!(problem.num_interactions(), 2);
    }

    #[test]
    fn test_new_rejects_asymmetric() {
        let q = array![[0.0, 1.0], [2.0, 0.0]];
        let err = Problem::new(q, None, []).unwrap_err();
        assert!(err.to_string().contains("not symmetric"));
    }

    #[test]
    fn test_new_rejects_out_of_range_continuous() {
        let q = array![[0.0, 1.0], [1.0, 0.0]];
        let err = Problem::new(q, None, [2]).unwrap_err();
        assert!(matches!(err, ProblemError::InvalidTerm(_)));
    }

    #[test]
    fn test_new_rejects_bad_field_length() {
        let q = array![[0.0, 1.0], [1.0, 0.0]];
        assert!(Problem::new(q, Some(array![1.0]), []).is_err());
    }

    #[test]
    fn test_new_rejects_non_square() {
        let q = Array2::<f64>::zeros((2, 3));
        assert!(Problem::new(q, None, []).is_err());
    }

    #[test]
    fn test_new_empty() {
        let q = Array2::<f64>::zeros((0, 0));
        assert_eq!(Problem::new(q, None, []), Err(ProblemError::EmptyProblem));
    }

    #[test]
    fn test_objective() {
        let q = array![[1.0, 2.0], [2.0, 0.0]];
        let problem = Problem::new(q, Some(array![1.0, -1.0]), []).unwrap();

        // x = [1, 1]: 1 + 2 + 2 + 0 + 1 - 1
        assert_eq!(problem.objective(&[1.0, 1.0]).unwrap(), 5.0);
        assert_eq!(problem.objective(&[0.0, 0.0]).unwrap(), 0.0);
        assert!(problem.objective(&[1.0]).is_err());
    }
}
