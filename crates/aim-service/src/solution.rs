//! Solutions returned by the service.

use serde::{Deserialize, Serialize};

use crate::job::{JobId, JobStatus};

/// The outcome of a completed job.
///
/// This is also the wire form of a result: the service answers with this
/// structure as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// The job this solution belongs to.
    pub job_id: JobId,
    /// Status at retrieval time; `Completed` for a usable solution.
    pub status: JobStatus,
    /// Variable assignment, one value per problem variable.
    #[serde(default)]
    pub output: Vec<f64>,
    /// Objective value of `output`, if the service reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<f64>,
    /// Additional service-provided metadata.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Solution {
    /// Create a completed solution.
    pub fn new(job_id: JobId, output: Vec<f64>) -> Self {
        Self {
            job_id,
            status: JobStatus::Completed,
            output,
            objective: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Set the objective value.
    pub fn with_objective(mut self, objective: f64) -> Self {
        self.objective = Some(objective);
        self
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Check if the solution is complete and carries an assignment.
    pub fn is_complete(&self) -> bool {
        self.status.is_success() && !self.output.is_empty()
    }

    /// Number of variables in the assignment.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Check if the assignment is empty.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Read the assignment as a two-way partition (`true` for non-negative
    /// values), as used for MaxCut spins.
    pub fn partition(&self) -> Vec<bool> {
        self.output.iter().map(|&v| v >= 0.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_builder() {
        let solution = Solution::new(JobId::new("j1"), vec![1.0, -1.0, 0.25])
            .with_objective(-2.0)
            .with_metadata("iterations", serde_json::json!(1200));

        assert!(solution.is_complete());
        assert_eq!(solution.len(), 3);
        assert_eq!(solution.partition(), vec![true, false, true]);
        assert_eq!(solution.metadata["iterations"], 1200);
    }

    #[test]
    fn test_decode_minimal() {
        let json = r#"{"job_id": "j7", "status": {"state": "completed"}, "output": [1, 0]}"#;
        let solution: Solution = serde_json::from_str(json).unwrap();
        assert_eq!(solution.job_id, JobId::new("j7"));
        assert_eq!(solution.output, vec![1.0, 0.0]);
        assert!(solution.objective.is_none());
        assert!(solution.metadata.is_empty());
    }

    #[test]
    fn test_empty_output_is_incomplete() {
        let solution = Solution::new(JobId::new("j1"), vec![]);
        assert!(!solution.is_complete());
    }
}
