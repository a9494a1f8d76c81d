use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::common::errors::{InferenceError, Result};

use super::{Posterior, Query, SamplingEngine, SamplingMethod};

/// Seed for one trial, derived from the run's base seed.
///
/// Mixed with a 64-bit odd constant so neighbouring trial indices do not
/// produce neighbouring seeds.
pub fn trial_seed(base_seed: u64, trial: usize) -> u64 {
    base_seed ^ (trial as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Averaged outcome of running one estimator several times.
#[derive(Debug, Clone, Serialize)]
pub struct TrialReport {
    pub method: SamplingMethod,
    pub num_samples: usize,
    /// P(all query variables true) from each trial, in trial order.
    pub estimates: Vec<f64>,
    /// Element-wise mean of the per-trial posteriors.
    pub mean: Posterior,
    /// Trials that hit the uniform fallback.
    pub degenerate_trials: usize,
}

impl TrialReport {
    pub fn mean_all_true(&self) -> f64 {
        self.mean.all_true()
    }
}

/// Runs `num_trials` independent estimates in parallel and averages them.
///
/// Every trial owns an `StdRng` seeded from `trial_seed(base_seed, trial)`,
/// so the report is identical for a given seed whatever the thread count.
pub fn run_trials(
    engine: &SamplingEngine<'_>,
    method: SamplingMethod,
    query: &Query,
    num_samples: usize,
    num_trials: usize,
    base_seed: u64,
) -> Result<TrialReport> {
    if num_trials == 0 {
        return Err(InferenceError::InvalidTrialCount(num_trials));
    }
    if num_samples == 0 {
        return Err(InferenceError::InvalidSampleCount(num_samples));
    }
    let posteriors = (0..num_trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = StdRng::seed_from_u64(trial_seed(base_seed, trial));
            engine.estimate(method, query, num_samples, &mut rng)
        })
        .collect::<Result<Vec<Posterior>>>()?;

    let degenerate_trials = posteriors.iter().filter(|p| p.is_degenerate()).count();
    if degenerate_trials > 0 {
        warn!(
            "{} {}: {} of {} trials fell back to the uniform distribution",
            method, query, degenerate_trials, num_trials
        );
    }
    let report = TrialReport {
        method,
        num_samples,
        estimates: posteriors.iter().map(Posterior::all_true).collect(),
        mean: Posterior::mean(query.variables(), &posteriors),
        degenerate_trials,
    };
    debug!(
        "{} {} x{} with {} samples: mean P(all true) = {}",
        method,
        query,
        num_trials,
        num_samples,
        report.mean_all_true()
    );
    Ok(report)
}

/// `run_trials` for every estimator, in `SamplingMethod::ALL` order.
pub fn run_sampling_trials(
    engine: &SamplingEngine<'_>,
    query: &Query,
    num_samples: usize,
    num_trials: usize,
    base_seed: u64,
) -> Result<Vec<TrialReport>> {
    SamplingMethod::ALL
        .iter()
        .map(|&method| run_trials(engine, method, query, num_samples, num_trials, base_seed))
        .collect()
}
