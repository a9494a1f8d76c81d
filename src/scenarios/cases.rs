use log::info;

use crate::common::errors::Result;
use crate::inference::{ExactEngine, Query, SamplingEngine, TrialReport, run_sampling_trials};
use crate::network::{Assignment, Node};

/// Sample sizes swept by the analysis.
pub const SAMPLE_SIZES: [usize; 5] = [1, 10, 100, 1000, 10000];

/// Trials averaged per sample size.
pub const TRIALS_PER_SIZE: usize = 10;

/// A named query whose all-true probability is tracked across sample sizes.
#[derive(Debug, Clone)]
pub struct AnalysisCase {
    pub name: &'static str,
    pub description: &'static str,
    pub query: Query,
}

fn case(
    name: &'static str,
    description: &'static str,
    variables: Vec<Node>,
    evidence: Assignment,
) -> Result<AnalysisCase> {
    Ok(AnalysisCase {
        name,
        description,
        query: Query::new(variables, evidence)?,
    })
}

/// The three reference cases.
pub fn standard_cases() -> Result<Vec<AnalysisCase>> {
    Ok(vec![
        case(
            "Alarm is false, infer Burglary and JohnCalls being true",
            "P(B=true, J=true | A=false)",
            vec![Node::Burglary, Node::JohnCalls],
            Assignment::from([(Node::Alarm, false)]),
        )?,
        case(
            "JohnCalls is true, Earthquake is false, infer Burglary and MaryCalls being true",
            "P(B=true, M=true | J=true, E=false)",
            vec![Node::Burglary, Node::MaryCalls],
            Assignment::from([(Node::JohnCalls, true), (Node::Earthquake, false)]),
        )?,
        case(
            "MaryCalls is true and JohnCalls is false, infer Burglary and Earthquake being true",
            "P(B=true, E=true | M=true, J=false)",
            vec![Node::Burglary, Node::Earthquake],
            Assignment::from([(Node::MaryCalls, true), (Node::JohnCalls, false)]),
        )?,
    ])
}

/// Queries exercised by `--test_queries`, paired with a description.
pub const DEMONSTRATION_QUERIES: [(&str, &str); 4] = [
    ("[<A,t><B,f>][J]", "P(J | A=true, B=false)"),
    ("[<E,t><J,t>][M,A]", "P(M,A | E=true, J=true)"),
    ("[][B]", "Prior P(B)"),
    ("[<J,t>][A]", "P(A | J=true)"),
];

/// Exact reference value plus one row of trial reports per sample size.
#[derive(Debug, Clone)]
pub struct CaseAnalysis {
    pub exact: f64,
    pub rows: Vec<(usize, Vec<TrialReport>)>,
}

/// Runs `case` through the exact engine and every estimator at each size.
pub fn analyze_case(
    engine: &SamplingEngine<'_>,
    case: &AnalysisCase,
    sample_sizes: &[usize],
    num_trials: usize,
    base_seed: u64,
) -> Result<CaseAnalysis> {
    info!("analyzing {}", case.description);
    let exact = ExactEngine::new(engine.network()).infer(&case.query)?.all_true();
    let mut rows = Vec::with_capacity(sample_sizes.len());
    for (offset, &num_samples) in sample_sizes.iter().enumerate() {
        let seed = base_seed.wrapping_add(offset as u64);
        let reports = run_sampling_trials(engine, &case.query, num_samples, num_trials, seed)?;
        rows.push((num_samples, reports));
    }
    Ok(CaseAnalysis { exact, rows })
}
