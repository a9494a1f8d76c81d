use thiserror::Error;

use crate::network::Node;

/// Errors raised at the engine boundary.
///
/// Every variant signals caller misuse (or an explicit cancellation); none of
/// them is retried internally. A zero-mass posterior is not an error: it is
/// resolved to a uniform distribution flagged as degenerate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("unknown node: {0:?} (expected one of B, E, A, J, M)")]
    InvalidNode(String),

    #[error("no value for parent {parent} while evaluating {node}")]
    MissingParent { node: Node, parent: Node },

    #[error("assignment has no value for {0}")]
    IncompleteAssignment(Node),

    #[error("probability {value} for {node} (row {row}) is outside [0, 1]")]
    InvalidProbability { node: Node, row: usize, value: f64 },

    #[error("table for {node} needs {expected} rows, got {found}")]
    InvalidTable {
        node: Node,
        expected: usize,
        found: usize,
    },

    #[error("query variable {0} appears more than once")]
    DuplicateQueryVariable(Node),

    #[error("sample count must be positive, got {0}")]
    InvalidSampleCount(usize),

    #[error("trial count must be positive, got {0}")]
    InvalidTrialCount(usize),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("sampling cancelled after {completed} samples")]
    Cancelled { completed: usize },
}

pub type Result<T> = std::result::Result<T, InferenceError>;
