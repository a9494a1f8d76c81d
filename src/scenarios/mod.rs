pub mod cases;

pub use cases::{
    AnalysisCase, CaseAnalysis, DEMONSTRATION_QUERIES, SAMPLE_SIZES, TRIALS_PER_SIZE, analyze_case,
    standard_cases,
};
