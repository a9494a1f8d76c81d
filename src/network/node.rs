use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::errors::InferenceError;

/// One boolean variable of the burglary/earthquake alarm network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    Burglary,
    Earthquake,
    Alarm,
    JohnCalls,
    MaryCalls,
}

impl Node {
    /// Every node, in topological order: each node follows all its parents.
    pub const TOPOLOGICAL: [Node; 5] = [
        Node::Burglary,
        Node::Earthquake,
        Node::Alarm,
        Node::JohnCalls,
        Node::MaryCalls,
    ];

    pub const COUNT: usize = Self::TOPOLOGICAL.len();

    pub fn parents(self) -> &'static [Node] {
        match self {
            Node::Burglary | Node::Earthquake => &[],
            Node::Alarm => &[Node::Burglary, Node::Earthquake],
            Node::JohnCalls | Node::MaryCalls => &[Node::Alarm],
        }
    }

    /// Position in `TOPOLOGICAL`, also the slot used by `Assignment`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            Node::Burglary => 'B',
            Node::Earthquake => 'E',
            Node::Alarm => 'A',
            Node::JohnCalls => 'J',
            Node::MaryCalls => 'M',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Node::Burglary => "Burglary",
            Node::Earthquake => "Earthquake",
            Node::Alarm => "Alarm",
            Node::JohnCalls => "JohnCalls",
            Node::MaryCalls => "MaryCalls",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Node {
    type Error = InferenceError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            'B' => Ok(Node::Burglary),
            'E' => Ok(Node::Earthquake),
            'A' => Ok(Node::Alarm),
            'J' => Ok(Node::JohnCalls),
            'M' => Ok(Node::MaryCalls),
            other => Err(InferenceError::InvalidNode(other.to_string())),
        }
    }
}

impl FromStr for Node {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Node::try_from(symbol),
            _ => Err(InferenceError::InvalidNode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topological_order_respects_parents() {
        for (position, node) in Node::TOPOLOGICAL.iter().enumerate() {
            assert_eq!(node.index(), position);
            for parent in node.parents() {
                assert!(parent.index() < position, "{} must precede {}", parent, node);
            }
        }
    }

    #[test]
    fn test_symbol_round_trip() {
        for node in Node::TOPOLOGICAL {
            assert_eq!(node.symbol().to_string().parse::<Node>(), Ok(node));
        }
    }

    #[test]
    fn test_unknown_node_rejected() {
        assert_eq!("X".parse::<Node>(), Err(InferenceError::InvalidNode("X".to_string())));
        assert!("AB".parse::<Node>().is_err());
        assert!("".parse::<Node>().is_err());
        // Symbols are case-sensitive.
        assert!("a".parse::<Node>().is_err());
    }
}
