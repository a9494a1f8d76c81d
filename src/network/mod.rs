pub mod assignment;
pub mod cpt;
pub mod node;

pub use assignment::Assignment;
pub use cpt::{ConditionalTable, combination, combination_index};
pub use node::Node;

use log::trace;

use crate::common::errors::{InferenceError, Result};

/// P(B = true)
pub const P_BURGLARY: f64 = 0.001;
/// P(E = true)
pub const P_EARTHQUAKE: f64 = 0.002;
/// P(A = true | B, E) for (t,t), (t,f), (f,t), (f,f)
pub const P_ALARM: [f64; 4] = [0.95, 0.94, 0.29, 0.001];
/// P(J = true | A) for A = t, f
pub const P_JOHN_CALLS: [f64; 2] = [0.90, 0.05];
/// P(M = true | A) for A = t, f
pub const P_MARY_CALLS: [f64; 2] = [0.70, 0.01];

/// The fixed five-node alarm network: one validated table per node.
///
/// Read-only once built; every engine borrows it, nothing mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct BayesNetwork {
    tables: [ConditionalTable; Node::COUNT],
}

impl BayesNetwork {
    /// The textbook burglary/earthquake network (Russell & Norvig, fig. 13.2).
    pub fn alarm() -> Self {
        let table = |node: Node, rows: &[f64]| ConditionalTable::trusted(node, rows.to_vec());
        BayesNetwork {
            tables: [
                table(Node::Burglary, &[P_BURGLARY]),
                table(Node::Earthquake, &[P_EARTHQUAKE]),
                table(Node::Alarm, &P_ALARM),
                table(Node::JohnCalls, &P_JOHN_CALLS),
                table(Node::MaryCalls, &P_MARY_CALLS),
            ],
        }
    }

    /// Returns a copy of the network with `node`'s table replaced by `rows`.
    pub fn with_table(&self, node: Node, rows: Vec<f64>) -> Result<Self> {
        let mut network = self.clone();
        network.tables[node.index()] = ConditionalTable::new(node, rows)?;
        trace!("replaced table for {}: {:?}", node, network.tables[node.index()].rows());
        Ok(network)
    }

    pub fn table(&self, node: Node) -> &ConditionalTable {
        &self.tables[node.index()]
    }

    pub fn topological_order(&self) -> &'static [Node] {
        &Node::TOPOLOGICAL
    }

    /// P(node = value | parents), parent values read from `parent_values`.
    ///
    /// Only the node's own parents need to be present; extra entries are ignored.
    pub fn probability(&self, node: Node, value: bool, parent_values: &Assignment) -> Result<f64> {
        self.table(node).probability(value, parent_values)
    }

    /// String-keyed variant of `probability`, rejecting unknown identifiers.
    pub fn probability_by_symbol(
        &self,
        symbol: &str,
        value: bool,
        parent_values: &Assignment,
    ) -> Result<f64> {
        let node: Node = symbol.parse()?;
        self.probability(node, value, parent_values)
    }

    /// Product of every node's conditional probability for a complete assignment.
    pub fn joint_probability(&self, assignment: &Assignment) -> Result<f64> {
        let mut product = 1.0;
        for &node in self.topological_order() {
            let value = assignment
                .get(node)
                .ok_or(InferenceError::IncompleteAssignment(node))?;
            product *= self.probability(node, value, assignment)?;
        }
        Ok(product)
    }
}

impl Default for BayesNetwork {
    fn default() -> Self {
        Self::alarm()
    }
}
