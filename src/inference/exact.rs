use log::{debug, trace};

use crate::common::errors::Result;
use crate::network::{Assignment, BayesNetwork, Node, combination};

use super::{Posterior, Query};

/// Exact posterior computation by enumeration over hidden variables.
pub struct ExactEngine<'a> {
    network: &'a BayesNetwork,
}

impl<'a> ExactEngine<'a> {
    pub fn new(network: &'a BayesNetwork) -> Self {
        ExactEngine { network }
    }

    /// Sum over all completions of `evidence` of the product of conditional
    /// probabilities along `order`.
    ///
    /// Evaluated as an explicit fold: each frame holds the next position in
    /// `order`, the assignment built so far and the product accumulated on
    /// that path. Nodes fixed by the assignment contribute one factor, free
    /// nodes branch on both values. `order` must be topological.
    pub fn enumerate_all(&self, order: &[Node], evidence: &Assignment) -> Result<f64> {
        let mut frames = vec![(0usize, *evidence, 1.0f64)];
        let mut total = 0.0;
        while let Some((position, assignment, mass)) = frames.pop() {
            let Some(&node) = order.get(position) else {
                total += mass;
                continue;
            };
            match assignment.get(node) {
                Some(value) => {
                    let p = self.network.probability(node, value, &assignment)?;
                    frames.push((position + 1, assignment, mass * p));
                }
                None => {
                    // Pushed in reverse so the `true` branch is expanded first.
                    for value in [false, true] {
                        let extended = assignment.with(node, value);
                        let p = self.network.probability(node, value, &extended)?;
                        frames.push((position + 1, extended, mass * p));
                    }
                }
            }
        }
        Ok(total)
    }

    /// Topological order restricted to the query and evidence nodes and
    /// their ancestors.
    ///
    /// Any other node sums out to exactly one, so leaving it out changes no
    /// posterior; it also keeps root priors from picking up rounding error
    /// (P(B) with no evidence is the stored 0.001, bit for bit).
    pub fn relevant_order(&self, query: &Query) -> Vec<Node> {
        let mut relevant = [false; Node::COUNT];
        let mut pending: Vec<Node> = query.variables().to_vec();
        pending.extend(query.evidence().iter().map(|(node, _)| node));
        while let Some(node) = pending.pop() {
            if !relevant[node.index()] {
                relevant[node.index()] = true;
                pending.extend_from_slice(node.parents());
            }
        }
        self.network
            .topological_order()
            .iter()
            .copied()
            .filter(|node| relevant[node.index()])
            .collect()
    }

    /// P(query variables | evidence) for every combination of the query variables.
    ///
    /// A combination that contradicts the evidence gets zero mass. If the
    /// evidence itself has zero probability the uniform fallback is returned,
    /// flagged as degenerate.
    pub fn infer(&self, query: &Query) -> Result<Posterior> {
        let order = self.relevant_order(query);
        debug!("exact inference for {} over {:?}", query, order);
        let mut unnormalized = Vec::with_capacity(query.combination_count());
        for index in 0..query.combination_count() {
            let values = combination(index, query.width());
            let fixed: Assignment = query.variables().iter().copied().zip(values).collect();
            let mass = if fixed.compatible_with(query.evidence()) {
                let extended = fixed
                    .iter()
                    .fold(*query.evidence(), |acc, (node, value)| acc.with(node, value));
                self.enumerate_all(&order, &extended)?
            } else {
                0.0
            };
            trace!("unnormalized {} -> {}", fixed, mass);
            unnormalized.push(mass);
        }
        Ok(Posterior::from_masses(query.variables(), unnormalized, "exact"))
    }
}

/// Convenience wrapper for the default textbook network.
pub fn exact_inference(query: &Query) -> Result<Posterior> {
    ExactEngine::new(&BayesNetwork::alarm()).infer(query)
}
