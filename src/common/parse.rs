//! The bracketed query language: `[<A,t><B,f>][J,M]`.
//!
//! The first bracket holds evidence items `<node,value>` with values `t`/`f`
//! (any case), the second a comma-separated list of query nodes. Whitespace
//! is ignored. A node given twice as evidence keeps its last value.

use crate::common::errors::{InferenceError, Result};
use crate::inference::{Posterior, Query};
use crate::network::{Assignment, Node};

fn parse_value(text: &str) -> Result<bool> {
    match text.to_ascii_lowercase().as_str() {
        "t" => Ok(true),
        "f" => Ok(false),
        other => Err(InferenceError::Parse(format!(
            "invalid value: {:?}, use 't' or 'f'",
            other
        ))),
    }
}

fn parse_evidence(body: &str) -> Result<Assignment> {
    let mut evidence = Assignment::new();
    let mut rest = body;
    while !rest.is_empty() {
        let Some(open) = rest.strip_prefix('<') else {
            return Err(InferenceError::Parse(format!(
                "expected '<' in evidence, found {:?}",
                rest
            )));
        };
        let close = open
            .find('>')
            .ok_or_else(|| InferenceError::Parse("unclosed '<' in evidence".to_string()))?;
        let item = &open[..close];
        let (node, value) = item
            .split_once(',')
            .filter(|(_, value)| !value.contains(','))
            .ok_or_else(|| InferenceError::Parse(format!("invalid evidence item: {:?}", item)))?;
        evidence.set(node.parse()?, parse_value(value)?);
        rest = &open[close + 1..];
    }
    Ok(evidence)
}

fn parse_variables(body: &str) -> Result<Vec<Node>> {
    if body.is_empty() {
        return Ok(Vec::new());
    }
    body.split(',').map(str::parse).collect()
}

/// Parses `[evidence][query]` into a validated `Query`.
pub fn parse_query(input: &str) -> Result<Query> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let body = compact
        .strip_prefix('[')
        .ok_or_else(|| InferenceError::Parse("input must start with '['".to_string()))?;
    let (evidence, query) = body
        .split_once("][")
        .ok_or_else(|| InferenceError::Parse("expected [evidence][query]".to_string()))?;
    let query = query
        .strip_suffix(']')
        .ok_or_else(|| InferenceError::Parse("query must end with ']'".to_string()))?;
    if evidence.contains(['[', ']']) || query.contains(['[', ']']) {
        return Err(InferenceError::Parse("unexpected bracket".to_string()));
    }
    Query::new(parse_variables(query)?, parse_evidence(evidence)?)
}

/// Renders a posterior as `[<J,0.9000>]` for one variable (P(true), four
/// decimals) or `[<B,J,0.000049>]` for a joint query (P(all true), six
/// decimals). An empty query renders as `[]`.
pub fn format_output(posterior: &Posterior) -> String {
    match posterior.variables() {
        [] => "[]".to_string(),
        [node] => format!("[<{},{:.4}>]", node, posterior.all_true()),
        nodes => {
            let names: Vec<String> = nodes.iter().map(Node::to_string).collect();
            format!("[<{},{:.6}>]", names.join(","), posterior.all_true())
        }
    }
}
