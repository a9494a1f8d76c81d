use std::fmt;

use super::Node;

/// A partial or complete mapping from nodes to boolean values.
///
/// `Assignment` is `Copy`, so extending evidence always produces a new value
/// and the caller's evidence is never touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Assignment {
    values: [Option<bool>; Node::COUNT],
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: Node) -> Option<bool> {
        self.values[node.index()]
    }

    pub fn contains(&self, node: Node) -> bool {
        self.get(node).is_some()
    }

    /// Sets `node`, overwriting any previous value.
    pub fn set(&mut self, node: Node, value: bool) {
        self.values[node.index()] = Some(value);
    }

    /// Returns a copy of this assignment extended with `node = value`.
    pub fn with(mut self, node: Node, value: bool) -> Self {
        self.set(node, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.len() == Node::COUNT
    }

    /// Assigned pairs in topological order.
    pub fn iter(&self) -> impl Iterator<Item = (Node, bool)> + '_ {
        Node::TOPOLOGICAL
            .iter()
            .filter_map(|&node| self.get(node).map(|value| (node, value)))
    }

    /// True when every node fixed by `evidence` has the same value here.
    pub fn agrees_with(&self, evidence: &Assignment) -> bool {
        evidence.iter().all(|(node, value)| self.get(node) == Some(value))
    }

    /// True when no node is assigned differing values by the two assignments.
    pub fn compatible_with(&self, other: &Assignment) -> bool {
        other
            .iter()
            .all(|(node, value)| self.get(node).is_none_or(|mine| mine == value))
    }
}

/// Later pairs win over earlier ones for the same node.
impl FromIterator<(Node, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Node, bool)>>(iter: I) -> Self {
        let mut assignment = Assignment::new();
        for (node, value) in iter {
            assignment.set(node, value);
        }
        assignment
    }
}

impl<const N: usize> From<[(Node, bool); N]> for Assignment {
    fn from(pairs: [(Node, bool); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(node, value)| format!("{}={}", node, value))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
