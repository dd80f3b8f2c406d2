//! Weighted edge-list input.
//!
//! The format is the one the MaxCut console script reads:
//!
//! ```text
//! <header line, ignored>
//! 0 1 1.0
//! 1 2 0.5
//! 2 0
//! ```
//!
//! Each line after the header is `u v [weight]` with non-negative integer
//! node labels. Blank lines and lines starting with `#` are skipped.

use std::collections::BTreeSet;

use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::FxHashMap;

use crate::error::{ProblemError, ProblemResult};
use crate::graph::{DEFAULT_EDGE_WEIGHT, GraphProblemAdapter};
use crate::problem::Problem;

/// A parsed edge list with node labels mapped to contiguous indices.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeList {
    labels: Vec<u64>,
    edges: Vec<(usize, usize, f64)>,
}

impl EdgeList {
    /// Parse edge-list text, skipping the first (header) line.
    pub fn parse(text: &str) -> ProblemResult<Self> {
        let mut raw = Vec::new();
        for (lineno, line) in text.lines().enumerate().skip(1) {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            raw.push(parse_line(line, lineno + 1)?);
        }

        let labels: Vec<u64> = raw
            .iter()
            .flat_map(|&(u, v, _)| [u, v])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: FxHashMap<u64, usize> =
            labels.iter().enumerate().map(|(i, &l)| (l, i)).collect();

        let edges = raw
            .into_iter()
            .map(|(u, v, w)| (index[&u], index[&v], w))
            .collect();

        Ok(Self { labels, edges })
    }

    /// Node labels; position `i` holds the label of variable `i`.
    pub fn labels(&self) -> &[u64] {
        &self.labels
    }

    /// Edges as `(index, index, weight)`.
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Build an undirected petgraph graph; node weights are the labels.
    pub fn to_graph(&self) -> UnGraph<u64, f64> {
        let mut graph = UnGraph::with_capacity(self.labels.len(), self.edges.len());
        for &label in &self.labels {
            graph.add_node(label);
        }
        for &(u, v, w) in &self.edges {
            graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), w);
        }
        graph
    }

    /// Convert to a MaxCut problem.
    pub fn to_problem(&self) -> ProblemResult<Problem> {
        GraphProblemAdapter::from_graph(&self.to_graph())
    }
}

fn parse_line(line: &str, lineno: usize) -> ProblemResult<(u64, u64, f64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if !(2..=3).contains(&fields.len()) {
        return Err(ProblemError::InvalidGraph(format!(
            "line {lineno}: expected 'u v [weight]', got '{line}'"
        )));
    }

    let node = |s: &str| {
        s.parse::<u64>().map_err(|_| {
            ProblemError::InvalidGraph(format!(
                "line {lineno}: '{s}' is not a non-negative node label"
            ))
        })
    };
    let u = node(fields[0])?;
    let v = node(fields[1])?;

    let w = match fields.get(2) {
        Some(s) => s.parse::<f64>().map_err(|_| {
            ProblemError::InvalidGraph(format!("line {lineno}: '{s}' is not a valid weight"))
        })?,
        None => DEFAULT_EDGE_WEIGHT,
    };

    Ok((u, v, w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_header() {
        let list = EdgeList::parse("6 6\n0 1 1.0\n1 2 2.5\n").unwrap();
        assert_eq!(list.node_count(), 3);
        assert_eq!(list.edges(), &[(0, 1, 1.0), (1, 2, 2.5)]);
    }

    #[test]
    fn test_labels_are_compacted() {
        let list = EdgeList::parse("header\n10 30\n30 20 4\n").unwrap();
        assert_eq!(list.labels(), &[10, 20, 30]);
        assert_eq!(list.edges(), &[(0, 2, 1.0), (2, 1, 4.0)]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let list = EdgeList::parse("header\n\n# comment\n0 1\n").unwrap();
        assert_eq!(list.edges().len(), 1);
    }

    #[test]
    fn test_negative_label_rejected() {
        let err = EdgeList::parse("header\n0 1\n-1 2\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_bad_weight_rejected() {
        assert!(matches!(
            EdgeList::parse("header\n0 1 heavy\n"),
            Err(ProblemError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_to_problem() {
        let list = EdgeList::parse("h\n0 1 2\n1 2 3\n0 1 1\n").unwrap();
        let problem = list.to_problem().unwrap();
        assert_eq!(problem.dimension(), 3);
        assert_eq!(problem.quadratic()[[0, 1]], 3.0);
        assert_eq!(problem.quadratic()[[2, 1]], 3.0);
    }

    #[test]
    fn test_self_loop_surfaces_from_problem() {
        let list = EdgeList::parse("h\n0 0\n").unwrap();
        assert!(matches!(
            list.to_problem(),
            Err(ProblemError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let list = EdgeList::parse("header only\n").unwrap();
        assert_eq!(list.to_problem(), Err(ProblemError::EmptyProblem));
    }
}
