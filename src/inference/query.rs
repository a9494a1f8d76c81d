use std::fmt;

use crate::common::errors::{InferenceError, Result};
use crate::network::{Assignment, Node};

/// A validated request for P(variables | evidence).
///
/// Construction is the only validation point: a `Query` that exists has no
/// repeated variables, so engines never see malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    variables: Vec<Node>,
    evidence: Assignment,
}

impl Query {
    pub fn new(variables: Vec<Node>, evidence: Assignment) -> Result<Self> {
        for (position, node) in variables.iter().enumerate() {
            if variables[..position].contains(node) {
                return Err(InferenceError::DuplicateQueryVariable(*node));
            }
        }
        Ok(Query { variables, evidence })
    }

    pub fn variables(&self) -> &[Node] {
        &self.variables
    }

    pub fn evidence(&self) -> &Assignment {
        &self.evidence
    }

    /// Number of query variables, k.
    pub fn width(&self) -> usize {
        self.variables.len()
    }

    /// Number of posterior entries, 2^k.
    pub fn combination_count(&self) -> usize {
        1 << self.width()
    }

    /// The query variables' values as fixed by `assignment`, in query order.
    pub fn project(&self, assignment: &Assignment) -> Result<Vec<bool>> {
        self.variables
            .iter()
            .map(|&node| {
                assignment
                    .get(node)
                    .ok_or(InferenceError::IncompleteAssignment(node))
            })
            .collect()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.variables.iter().map(Node::to_string).collect();
        write!(f, "P({} | {})", names.join(", "), self.evidence)
    }
}
