pub mod errors;
pub mod parse;
pub mod report;
pub mod setup;

// Re-export key types
pub use errors::{InferenceError, Result};
pub use parse::{format_output, parse_query};
pub use setup::CommandLineOptions;
