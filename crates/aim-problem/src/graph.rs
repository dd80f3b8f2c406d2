//! Graph max-cut to quadratic problem conversion.
//!
//! For an undirected graph with edge weights `w`, the spin quadratic form
//! `sᵀQs` with `Q[u][v] = Q[v][u] = w(u, v)` and `s ∈ {−1, +1}ᴺ` is
//! minimised exactly when the cut weight `Σ w (1 − s_u s_v) / 2` is
//! maximised.

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::builder::QumoBuilder;
use crate::error::{ProblemError, ProblemResult};
use crate::problem::{Problem, ProblemKind};

/// Weight carried by a graph edge.
///
/// `None` means the edge is unweighted and counts as `1.0`.
pub trait EdgeWeight {
    /// The edge weight, if any.
    fn weight(&self) -> Option<f64>;
}

impl EdgeWeight for () {
    fn weight(&self) -> Option<f64> {
        None
    }
}

impl EdgeWeight for f64 {
    fn weight(&self) -> Option<f64> {
        Some(*self)
    }
}

impl EdgeWeight for f32 {
    fn weight(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl EdgeWeight for u32 {
    fn weight(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl EdgeWeight for i32 {
    fn weight(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl<W: EdgeWeight> EdgeWeight for Option<W> {
    fn weight(&self) -> Option<f64> {
        self.as_ref().and_then(EdgeWeight::weight)
    }
}

/// Default weight of an unweighted edge.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Converts weighted graphs into [`ProblemKind::MaxCut`] problems.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphProblemAdapter;

impl GraphProblemAdapter {
    /// Build the cut-formulation problem for `graph`.
    ///
    /// The dimension is the node count; parallel edges sum. Self-loops and
    /// non-finite weights fail with [`ProblemError::InvalidGraph`].
    pub fn from_graph<N, E: EdgeWeight>(graph: &UnGraph<N, E>) -> ProblemResult<Problem> {
        let n = graph.node_count();
        if n == 0 {
            return Err(ProblemError::EmptyProblem);
        }

        let mut builder = QumoBuilder::with_dimension(n).kind(ProblemKind::MaxCut);
        for edge in graph.edge_references() {
            let (u, v) = (edge.source().index(), edge.target().index());
            if u == v {
                return Err(ProblemError::InvalidGraph(format!(
                    "self-loop on node {u}"
                )));
            }
            let w = edge.weight().weight().unwrap_or(DEFAULT_EDGE_WEIGHT);
            if !w.is_finite() {
                return Err(ProblemError::InvalidGraph(format!(
                    "edge ({u}, {v}) has non-finite weight {w}"
                )));
            }
            builder.add(w, u, Some(v))?;
        }

        debug!(
            "Converted graph with {} nodes and {} edges to MaxCut",
            n,
            graph.edge_count()
        );
        builder.build()
    }
}

/// Cut weight of a partition.
///
/// `spins[i] >= 0` places node `i` on one side, negative values on the
/// other.
pub fn cut_value(problem: &Problem, spins: &[f64]) -> ProblemResult<f64> {
    let n = problem.dimension();
    if spins.len() != n {
        return Err(ProblemError::InvalidTerm(format!(
            "partition has {} entries but the problem has {} nodes",
            spins.len(),
            n
        )));
    }

    let q = problem.quadratic();
    let mut cut = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            if (spins[i] >= 0.0) != (spins[j] >= 0.0) {
                cut += q[[i, j]];
            }
        }
    }
    Ok(cut)
}
