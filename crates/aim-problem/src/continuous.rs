//! Continuous (box-constrained) variable markers.

use std::collections::BTreeSet;

/// Indices declared continuous rather than binary.
///
/// Range validity is not checked here; the dimension is only known once the
/// problem is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuousVariableSet {
    indices: BTreeSet<usize>,
}

impl ContinuousVariableSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `i` as continuous. Returns `false` if it already was.
    pub fn insert(&mut self, i: usize) -> bool {
        self.indices.insert(i)
    }

    /// Check if `i` is marked continuous.
    pub fn contains(&self, i: usize) -> bool {
        self.indices.contains(&i)
    }

    /// Highest marked index.
    pub fn max_index(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Marked indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Number of marked indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if no index is marked.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub(crate) fn into_inner(self) -> BTreeSet<usize> {
        self.indices
    }
}

impl FromIterator<usize> for ContinuousVariableSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}
