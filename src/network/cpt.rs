use crate::common::errors::{InferenceError, Result};

use super::{Assignment, Node};

/// Index of a boolean combination in canonical order: `true` before `false`,
/// leftmost position varying slowest. `[true, true] -> 0`, `[false, false] -> 3`.
pub fn combination_index<I>(values: I) -> usize
where
    I: IntoIterator<Item = bool>,
{
    values
        .into_iter()
        .fold(0, |index, value| (index << 1) | usize::from(!value))
}

/// Inverse of `combination_index` for combinations of length `width`.
pub fn combination(index: usize, width: usize) -> Vec<bool> {
    (0..width)
        .map(|position| (index >> (width - 1 - position)) & 1 == 0)
        .collect()
}

/// Conditional probability table for one node.
///
/// Stores P(node = true | parents) for each joint parent assignment, rows in
/// canonical combination order over `node.parents()`. P(node = false | .) is
/// always derived as the complement.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalTable {
    node: Node,
    rows: Vec<f64>,
}

impl ConditionalTable {
    pub fn new(node: Node, rows: Vec<f64>) -> Result<Self> {
        let expected = 1usize << node.parents().len();
        if rows.len() != expected {
            return Err(InferenceError::InvalidTable {
                node,
                expected,
                found: rows.len(),
            });
        }
        for (row, &value) in rows.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(InferenceError::InvalidProbability { node, row, value });
            }
        }
        Ok(ConditionalTable { node, rows })
    }

    /// Builds a table from constants already known to be valid.
    pub(crate) fn trusted(node: Node, rows: Vec<f64>) -> Self {
        debug_assert!(rows.len() == 1 << node.parents().len());
        debug_assert!(rows.iter().all(|p| (0.0..=1.0).contains(p)));
        ConditionalTable { node, rows }
    }

    pub fn node(&self) -> Node {
        self.node
    }

    pub fn rows(&self) -> &[f64] {
        &self.rows
    }

    /// P(node = true | parents) with parent values read from `assignment`.
    pub fn probability_true(&self, assignment: &Assignment) -> Result<f64> {
        let mut parent_values = Vec::with_capacity(self.node.parents().len());
        for &parent in self.node.parents() {
            let value = assignment.get(parent).ok_or(InferenceError::MissingParent {
                node: self.node,
                parent,
            })?;
            parent_values.push(value);
        }
        Ok(self.rows[combination_index(parent_values)])
    }

    /// P(node = value | parents).
    pub fn probability(&self, value: bool, assignment: &Assignment) -> Result<f64> {
        let p_true = self.probability_true(assignment)?;
        Ok(if value { p_true } else { 1.0 - p_true })
    }
}
