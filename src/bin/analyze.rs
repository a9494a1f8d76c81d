use alarmnet::common::report::{render_exact_row, render_sweep_header, render_sweep_row};
use alarmnet::common::setup::init_logging;
use alarmnet::inference::SamplingEngine;
use alarmnet::network::BayesNetwork;
use alarmnet::scenarios::{SAMPLE_SIZES, TRIALS_PER_SIZE, analyze_case, standard_cases};
use anyhow::Result;
use clap::Parser;
use serde_json::json;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sample-size sweep of the three canonical alarm-network cases", long_about = None)]
struct Args {
    /// Sample sizes to sweep (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = SAMPLE_SIZES)]
    sample_sizes: Vec<usize>,

    /// Trials averaged per sample size
    #[arg(long, default_value_t = TRIALS_PER_SIZE)]
    trials: usize,

    /// Base seed for the random source
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let network = BayesNetwork::alarm();
    let engine = SamplingEngine::new(&network);
    let mut summaries = Vec::new();

    for (index, case) in standard_cases()?.iter().enumerate() {
        let start = Instant::now();
        let analysis = analyze_case(&engine, case, &args.sample_sizes, args.trials, args.seed)?;
        let elapsed = start.elapsed();

        if args.json {
            let rows: Vec<_> = analysis
                .rows
                .iter()
                .map(|(num_samples, reports)| json!({ "samples": num_samples, "reports": reports }))
                .collect();
            summaries.push(json!({
                "case": case.description,
                "exact": analysis.exact,
                "rows": rows,
                "elapsed_ms": elapsed.as_millis() as u64,
            }));
            continue;
        }

        println!("\nCASE {}: {}", index + 1, case.name);
        println!("Query: {}", case.description);
        println!("{}", render_sweep_header());
        println!("{}", "-".repeat(55));
        for (num_samples, reports) in &analysis.rows {
            println!("{}", render_sweep_row(*num_samples, reports));
        }
        println!("{}", render_exact_row(analysis.exact));
        println!("({:.2?})", elapsed);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }
    Ok(())
}
