pub mod common;
pub mod inference;
pub mod network;
pub mod scenarios;

pub use common::{InferenceError, format_output, parse_query};
pub use inference::{ExactEngine, Posterior, Query, SamplingEngine, SamplingMethod};
pub use network::{Assignment, BayesNetwork, Node};
