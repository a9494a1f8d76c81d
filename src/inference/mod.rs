pub mod cancel;
pub mod exact;
pub mod posterior;
pub mod query;
pub mod sampling;
pub mod trials;

pub use cancel::CancellationFlag;
pub use exact::{ExactEngine, exact_inference};
pub use posterior::{Posterior, SUM_TOLERANCE};
pub use query::Query;
pub use sampling::{SamplingEngine, SamplingMethod, WeightedSample};
pub use trials::{TrialReport, run_sampling_trials, run_trials, trial_seed};
