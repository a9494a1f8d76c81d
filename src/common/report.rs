use colored::Colorize;
use serde_json::{Value, json};

use crate::inference::{Posterior, TrialReport};
use crate::network::Node;

fn describe(variables: &[Node], values: &[bool]) -> String {
    variables
        .iter()
        .zip(values)
        .map(|(node, value)| format!("{}={}", node, value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per combination, `P(B=true, J=false) = 0.000049`.
///
/// Degenerate posteriors get a highlighted marker line so the uniform
/// fallback is never mistaken for a real result.
pub fn render_distribution(posterior: &Posterior) -> String {
    let mut lines: Vec<String> = posterior
        .iter()
        .map(|(values, p)| format!("P({}) = {:.6}", describe(posterior.variables(), &values), p))
        .collect();
    if posterior.is_degenerate() {
        lines.push(
            "(degenerate: no evidence-consistent mass, uniform fallback)"
                .yellow()
                .to_string(),
        );
    }
    lines.join("\n")
}

pub fn posterior_to_json(posterior: &Posterior) -> Value {
    let entries: Vec<Value> = posterior
        .iter()
        .map(|(values, p)| {
            json!({
                "assignment": describe(posterior.variables(), &values),
                "probability": p,
            })
        })
        .collect();
    json!({
        "variables": posterior.variables(),
        "distribution": entries,
        "degenerate": posterior.is_degenerate(),
    })
}

/// Header row for the sample-size sweep table.
pub fn render_sweep_header() -> String {
    format!(
        "{:<10} {:<15} {:<15} {:<15}",
        "Samples", "Prior", "Rejection", "Likelihood"
    )
}

/// One sweep row: the mean P(all true) of each estimator, degenerate
/// trial counts flagged in red after the value.
pub fn render_sweep_row(num_samples: usize, reports: &[TrialReport]) -> String {
    let mut row = format!("{:<10}", num_samples);
    for report in reports {
        let cell = format!("{:.8}", report.mean_all_true());
        if report.degenerate_trials > 0 {
            let flagged = format!("{}*{}", cell, report.degenerate_trials);
            row.push_str(&format!(" {:<15}", flagged.red()));
        } else {
            row.push_str(&format!(" {:<15}", cell));
        }
    }
    row
}

pub fn render_exact_row(exact: f64) -> String {
    format!(
        "{:<10} {:<15.8} {:<15.8} {:<15.8}",
        "Exact", exact, exact, exact
    )
}
