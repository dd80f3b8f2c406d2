//! Greedy coordinate descent used as the local solver.

use aim_problem::{Problem, ProblemKind};
use ndarray::Array1;
use tracing::debug;

/// Upper bound on full passes over the variables.
const MAX_SWEEPS: usize = 64;

/// Moves smaller than this do not count as improvements.
const TOLERANCE: f64 = 1e-12;

/// Outcome of a local search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Final assignment.
    pub output: Vec<f64>,
    /// Objective value of `output`.
    pub objective: f64,
    /// Number of passes performed.
    pub sweeps: usize,
}

/// Minimize `xᵀQx + fᵀx` by single-variable moves until no move improves.
///
/// MaxCut problems are solved over spins `±1`. QUMO problems are solved
/// over `{0, 1}` for binary variables and `[0, 1]` for continuous ones.
/// The search is deterministic and finds a local minimum, not a global one.
pub fn local_search(problem: &Problem) -> SearchOutcome {
    let n = problem.dimension();
    let q = problem.quadratic();
    let f = problem.field();
    let spins = problem.kind() == ProblemKind::MaxCut;

    let mut x = if spins {
        Array1::from_elem(n, 1.0)
    } else {
        Array1::zeros(n)
    };
    // Cached Q·x, updated incrementally on every move.
    let mut qx = q.dot(&x);

    let mut sweeps = 0;
    while sweeps < MAX_SWEEPS {
        sweeps += 1;
        let mut improved = false;

        for i in 0..n {
            let qii = q[[i, i]];
            // Change in objective when x[i] moves by d:
            //   2·d·(Qx)_i + d²·Q_ii + d·f_i
            let delta = |d: f64| d * (2.0 * qx[i] + f[i]) + d * d * qii;

            let current = x[i];
            let target = if spins {
                -current
            } else {
                let mut candidates = vec![0.0, 1.0];
                if problem.is_continuous(i) && qii > 0.0 {
                    // Stationary point of the one-dimensional quadratic.
                    let linear = 2.0 * (qx[i] - qii * current) + f[i];
                    candidates.push((-linear / (2.0 * qii)).clamp(0.0, 1.0));
                }
                candidates
                    .into_iter()
                    .min_by(|a, b| delta(a - current).total_cmp(&delta(b - current)))
                    .unwrap_or(current)
            };

            let d = target - current;
            if d != 0.0 && delta(d) < -TOLERANCE {
                x[i] = target;
                qx.scaled_add(d, &q.column(i));
                improved = true;
            }
        }

        if !improved {
            break;
        }
    }

    let objective = x.dot(&qx) + f.dot(&x);
    debug!(
        "Local search finished after {} sweeps, objective {}",
        sweeps, objective
    );

    SearchOutcome {
        output: x.to_vec(),
        objective,
        sweeps,
    }
}
