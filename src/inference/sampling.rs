use std::fmt;

use clap::ValueEnum;
use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::errors::{InferenceError, Result};
use crate::network::{Assignment, BayesNetwork, combination_index};

use super::{CancellationFlag, Posterior, Query};

/// The three Monte-Carlo estimators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum SamplingMethod {
    /// Draw unconditional samples, keep the ones consistent with evidence.
    #[serde(rename = "prior")]
    Prior,

    /// Like `Prior`, abandoning a draw at the first node contradicting evidence.
    #[serde(rename = "rejection")]
    Rejection,

    /// Fix evidence nodes and weight each sample by their likelihood.
    #[serde(rename = "likelihood")]
    Likelihood,
}

impl SamplingMethod {
    pub const ALL: [SamplingMethod; 3] = [
        SamplingMethod::Prior,
        SamplingMethod::Rejection,
        SamplingMethod::Likelihood,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SamplingMethod::Prior => "prior",
            SamplingMethod::Rejection => "rejection",
            SamplingMethod::Likelihood => "likelihood",
        }
    }
}

impl fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A complete assignment paired with its likelihood weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSample {
    pub assignment: Assignment,
    pub weight: f64,
}

/// Approximate inference by simulating the network's generative process.
///
/// The random source is always supplied by the caller, so runs are
/// reproducible under a fixed seed and independent engines never share
/// random state.
pub struct SamplingEngine<'a> {
    network: &'a BayesNetwork,
    cancellation: Option<CancellationFlag>,
}

impl<'a> SamplingEngine<'a> {
    pub fn new(network: &'a BayesNetwork) -> Self {
        SamplingEngine {
            network,
            cancellation: None,
        }
    }

    /// Attaches a flag polled at the top of every per-sample iteration.
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    pub fn network(&self) -> &BayesNetwork {
        self.network
    }

    fn check_cancelled(&self, completed: usize) -> Result<()> {
        match &self.cancellation {
            Some(flag) if flag.is_cancelled() => Err(InferenceError::Cancelled { completed }),
            _ => Ok(()),
        }
    }

    fn validate_samples(num_samples: usize) -> Result<()> {
        if num_samples == 0 {
            return Err(InferenceError::InvalidSampleCount(num_samples));
        }
        Ok(())
    }

    /// One complete assignment drawn ancestrally in topological order.
    pub fn prior_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Assignment> {
        let mut sample = Assignment::new();
        for &node in self.network.topological_order() {
            let p_true = self.network.probability(node, true, &sample)?;
            sample.set(node, rng.r#gen::<f64>() < p_true);
        }
        Ok(sample)
    }

    /// Ancestral draw that stops at the first node contradicting `evidence`.
    fn sample_or_reject<R: Rng + ?Sized>(
        &self,
        evidence: &Assignment,
        rng: &mut R,
    ) -> Result<Option<Assignment>> {
        let mut sample = Assignment::new();
        for &node in self.network.topological_order() {
            let p_true = self.network.probability(node, true, &sample)?;
            let value = rng.r#gen::<f64>() < p_true;
            if evidence.get(node).is_some_and(|observed| observed != value) {
                return Ok(None);
            }
            sample.set(node, value);
        }
        Ok(Some(sample))
    }

    /// One likelihood-weighted sample: evidence nodes are fixed and multiply
    /// the weight by P(node = evidence | parents); other nodes are drawn.
    pub fn weighted_sample<R: Rng + ?Sized>(
        &self,
        evidence: &Assignment,
        rng: &mut R,
    ) -> Result<WeightedSample> {
        let mut sample = Assignment::new();
        let mut weight = 1.0;
        for &node in self.network.topological_order() {
            match evidence.get(node) {
                Some(observed) => {
                    weight *= self.network.probability(node, observed, &sample)?;
                    sample.set(node, observed);
                }
                None => {
                    let p_true = self.network.probability(node, true, &sample)?;
                    sample.set(node, rng.r#gen::<f64>() < p_true);
                }
            }
        }
        Ok(WeightedSample {
            assignment: sample,
            weight,
        })
    }

    /// Adds one accepted sample to the per-combination tally.
    fn tally(query: &Query, sample: &Assignment, weight: f64, masses: &mut [f64]) -> Result<()> {
        let values = query.project(sample)?;
        masses[combination_index(values)] += weight;
        Ok(())
    }

    /// Prior sampling: `num_samples` complete draws, estimate from the ones
    /// consistent with the evidence.
    pub fn prior_sampling<R: Rng + ?Sized>(
        &self,
        query: &Query,
        num_samples: usize,
        rng: &mut R,
    ) -> Result<Posterior> {
        Self::validate_samples(num_samples)?;
        let mut masses = vec![0.0; query.combination_count()];
        let mut consistent = 0usize;
        for drawn in 0..num_samples {
            self.check_cancelled(drawn)?;
            let sample = self.prior_sample(rng)?;
            if sample.agrees_with(query.evidence()) {
                consistent += 1;
                Self::tally(query, &sample, 1.0, &mut masses)?;
            }
        }
        debug!(
            "prior sampling {}: {} of {} samples consistent with evidence",
            query, consistent, num_samples
        );
        Ok(Posterior::from_masses(query.variables(), masses, "prior sampling"))
    }

    /// Rejection sampling with a fixed generation budget.
    ///
    /// Exactly `num_samples` draws are attempted; rejected draws count
    /// against the budget, so fewer than `num_samples` may be accepted.
    pub fn rejection_sampling<R: Rng + ?Sized>(
        &self,
        query: &Query,
        num_samples: usize,
        rng: &mut R,
    ) -> Result<Posterior> {
        Self::validate_samples(num_samples)?;
        let mut masses = vec![0.0; query.combination_count()];
        let mut accepted = 0usize;
        for drawn in 0..num_samples {
            self.check_cancelled(drawn)?;
            if let Some(sample) = self.sample_or_reject(query.evidence(), rng)? {
                accepted += 1;
                Self::tally(query, &sample, 1.0, &mut masses)?;
            }
        }
        debug!(
            "rejection sampling {}: accepted {} of {} draws",
            query, accepted, num_samples
        );
        Ok(Posterior::from_masses(query.variables(), masses, "rejection sampling"))
    }

    /// Likelihood weighting: per-combination sums of sample weights,
    /// normalized by the total weight.
    pub fn likelihood_weighting<R: Rng + ?Sized>(
        &self,
        query: &Query,
        num_samples: usize,
        rng: &mut R,
    ) -> Result<Posterior> {
        Self::validate_samples(num_samples)?;
        let mut masses = vec![0.0; query.combination_count()];
        for drawn in 0..num_samples {
            self.check_cancelled(drawn)?;
            let WeightedSample { assignment, weight } = self.weighted_sample(query.evidence(), rng)?;
            trace!("weighted sample {} weight {}", assignment, weight);
            Self::tally(query, &assignment, weight, &mut masses)?;
        }
        debug!(
            "likelihood weighting {}: total weight {} over {} samples",
            query,
            masses.iter().sum::<f64>(),
            num_samples
        );
        Ok(Posterior::from_masses(query.variables(), masses, "likelihood weighting"))
    }

    pub fn estimate<R: Rng + ?Sized>(
        &self,
        method: SamplingMethod,
        query: &Query,
        num_samples: usize,
        rng: &mut R,
    ) -> Result<Posterior> {
        match method {
            SamplingMethod::Prior => self.prior_sampling(query, num_samples, rng),
            SamplingMethod::Rejection => self.rejection_sampling(query, num_samples, rng),
            SamplingMethod::Likelihood => self.likelihood_weighting(query, num_samples, rng),
        }
    }
}
