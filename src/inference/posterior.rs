use log::warn;
use serde::Serialize;

use crate::network::{Node, combination, combination_index};

/// Tolerance used when checking that a posterior sums to one.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// A distribution over every boolean combination of the query variables.
///
/// Entries are stored in canonical combination order (true before false,
/// leftmost variable slowest). A posterior produced by the uniform fallback
/// carries `degenerate = true` so it can be told apart from a posterior
/// that merely happens to be uniform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posterior {
    variables: Vec<Node>,
    probabilities: Vec<f64>,
    degenerate: bool,
}

impl Posterior {
    /// Normalizes unnormalized masses (counts, weights or joint sums).
    ///
    /// A zero or non-finite total yields the uniform fallback instead of a
    /// division by zero. `source` names the estimator for the warning.
    pub fn from_masses(variables: &[Node], masses: Vec<f64>, source: &str) -> Posterior {
        debug_assert_eq!(masses.len(), 1 << variables.len());
        let total: f64 = masses.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            warn!(
                "{}: no probability mass consistent with evidence (total = {}), falling back to uniform over {} combinations",
                source,
                total,
                masses.len()
            );
            return Posterior::uniform(variables);
        }
        Posterior {
            variables: variables.to_vec(),
            probabilities: masses.into_iter().map(|mass| mass / total).collect(),
            degenerate: false,
        }
    }

    /// The degenerate fallback: every combination gets 1 / 2^k.
    pub fn uniform(variables: &[Node]) -> Posterior {
        let count = 1usize << variables.len();
        Posterior {
            variables: variables.to_vec(),
            probabilities: vec![1.0 / count as f64; count],
            degenerate: true,
        }
    }

    /// Element-wise mean of several posteriors over the same variables.
    ///
    /// The result is degenerate only if every input was.
    pub fn mean<'a, I>(variables: &[Node], posteriors: I) -> Posterior
    where
        I: IntoIterator<Item = &'a Posterior>,
    {
        let mut sums = vec![0.0; 1 << variables.len()];
        let mut count = 0usize;
        let mut all_degenerate = true;
        for posterior in posteriors {
            debug_assert_eq!(posterior.variables, variables);
            for (sum, p) in sums.iter_mut().zip(&posterior.probabilities) {
                *sum += p;
            }
            all_degenerate &= posterior.degenerate;
            count += 1;
        }
        if count == 0 {
            return Posterior::uniform(variables);
        }
        Posterior {
            variables: variables.to_vec(),
            probabilities: sums.into_iter().map(|sum| sum / count as f64).collect(),
            degenerate: all_degenerate,
        }
    }

    pub fn variables(&self) -> &[Node] {
        &self.variables
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Probability of one combination, `None` if its length does not match.
    pub fn get(&self, values: &[bool]) -> Option<f64> {
        if values.len() != self.variables.len() {
            return None;
        }
        self.probabilities
            .get(combination_index(values.iter().copied()))
            .copied()
    }

    /// Probability that every query variable is true.
    pub fn all_true(&self) -> f64 {
        self.probabilities[0]
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// `(combination, probability)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<bool>, f64)> + '_ {
        let width = self.variables.len();
        self.probabilities
            .iter()
            .enumerate()
            .map(move |(index, &p)| (combination(index, width), p))
    }
}
