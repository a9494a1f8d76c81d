use alarmnet::common::report::{
    posterior_to_json, render_distribution, render_exact_row, render_sweep_header, render_sweep_row,
};
use alarmnet::common::setup::{CommandLineOptions, parse_configuration_options};
use alarmnet::inference::{ExactEngine, Query, SamplingEngine, run_trials};
use alarmnet::network::{BayesNetwork, P_ALARM, P_BURGLARY, P_EARTHQUAKE, P_JOHN_CALLS, P_MARY_CALLS};
use alarmnet::scenarios::{
    DEMONSTRATION_QUERIES, SAMPLE_SIZES, TRIALS_PER_SIZE, analyze_case, standard_cases,
};
use alarmnet::{format_output, parse_query};
use anyhow::Result;
use log::error;
use serde_json::json;
use std::io::{self, BufRead, Write};

fn print_banner() {
    println!("Bayesian Network Inference System");
    println!("Network: Burglary-Earthquake-Alarm (Russell & Norvig, fig. 13.2)");
    println!("  P(B) = {}, P(E) = {}", P_BURGLARY, P_EARTHQUAKE);
    println!(
        "  P(A|B,E): B=t,E=t:{}, B=t,E=f:{}, B=f,E=t:{}, B=f,E=f:{}",
        P_ALARM[0], P_ALARM[1], P_ALARM[2], P_ALARM[3]
    );
    println!("  P(J|A): A=t:{}, A=f:{}", P_JOHN_CALLS[0], P_JOHN_CALLS[1]);
    println!("  P(M|A): A=t:{}, A=f:{}", P_MARY_CALLS[0], P_MARY_CALLS[1]);
}

fn answer_query(
    network: &BayesNetwork,
    query: &Query,
    options: &CommandLineOptions,
    num_samples: usize,
    seed: u64,
) -> Result<()> {
    let sampler = SamplingEngine::new(network);
    let mut results = Vec::new();

    if options.method.includes_exact() {
        let exact = ExactEngine::new(network).infer(query)?;
        if options.json {
            results.push(json!({ "method": "exact", "posterior": posterior_to_json(&exact) }));
        } else {
            println!("Exact Inference:      {}", format_output(&exact));
            println!("{}", render_distribution(&exact));
        }
    }

    for method in options.method.sampling_methods() {
        let report = run_trials(&sampler, method, query, num_samples, options.trials, seed)?;
        if options.json {
            results.push(json!({ "method": method, "report": report }));
        } else {
            println!(
                "{:<21} {}",
                format!("{} sampling:", method),
                format_output(&report.mean)
            );
            if report.mean.is_degenerate() {
                println!("{}", render_distribution(&report.mean));
            }
        }
    }

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "query": query.to_string(), "results": results }))?
        );
    }
    Ok(())
}

fn run_analysis(network: &BayesNetwork, seed: u64) -> Result<()> {
    let sampler = SamplingEngine::new(network);
    println!("\n{}", "=".repeat(80));
    println!("ANALYSIS OF THREE SPECIFIC CASES");
    println!("Each method run {} times and averaged for each sample size", TRIALS_PER_SIZE);
    println!("{}", "=".repeat(80));

    for (index, case) in standard_cases()?.iter().enumerate() {
        println!("\n{}", "=".repeat(60));
        println!("CASE {}: {}", index + 1, case.name);
        println!("Query: {}", case.description);
        println!("{}", "=".repeat(60));

        let analysis = analyze_case(&sampler, case, &SAMPLE_SIZES, TRIALS_PER_SIZE, seed)?;
        println!("Exact probability: {:.8}", analysis.exact);
        println!("\n{}", render_sweep_header());
        println!("{}", "-".repeat(55));
        for (num_samples, reports) in &analysis.rows {
            println!("{}", render_sweep_row(*num_samples, reports));
        }
        println!("{}", render_exact_row(analysis.exact));
    }
    Ok(())
}

fn run_demonstration_queries(network: &BayesNetwork, options: &CommandLineOptions) -> Result<()> {
    println!("\nTest Queries:");
    println!("{}", "=".repeat(60));
    let engine = ExactEngine::new(network);
    for (input, description) in DEMONSTRATION_QUERIES {
        println!("\nTest: {}", description);
        println!("Input: {}", input);
        let outcome = parse_query(input).and_then(|query| {
            let posterior = engine.infer(&query)?;
            Ok((query, posterior))
        });
        match outcome {
            Ok((query, posterior)) if options.json => {
                println!(
                    "{}",
                    json!({ "query": query.to_string(), "posterior": posterior_to_json(&posterior) })
                );
            }
            Ok((query, posterior)) => {
                println!("Query: {}", query);
                println!("Result: {}", format_output(&posterior));
                println!("{}", render_distribution(&posterior));
            }
            Err(err) => println!("Error: {}", err),
        }
        println!("{}", "-".repeat(60));
    }
    Ok(())
}

fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn interactive_mode(network: &BayesNetwork, options: &CommandLineOptions, seed: u64) -> Result<()> {
    println!("\n{}", "=".repeat(80));
    println!("INTERACTIVE INFERENCE MODE");
    println!("Enter queries in format: [<N1,V1><N2,V2>][Q1,Q2]");
    println!("Nodes: A (Alarm), B (Burglary), E (Earthquake), J (John), M (Mary)");
    println!("Values: t (true), f (false)");
    println!("Type 'quit' to exit or 'analyze' to run the three cases");
    println!("{}", "=".repeat(80));

    let mut round = 0u64;
    while let Some(line) = prompt("\nEnter query: ")? {
        match line.to_lowercase().as_str() {
            "quit" => break,
            "analyze" => {
                run_analysis(network, seed)?;
                continue;
            }
            "" => continue,
            _ => {}
        }
        let query = match parse_query(&line) {
            Ok(query) => query,
            Err(err) => {
                println!("Error: {}", err);
                continue;
            }
        };
        let num_samples = match prompt("Number of samples (default 1000): ")? {
            Some(text) if !text.is_empty() => match text.parse::<usize>() {
                Ok(n) => n,
                Err(_) => {
                    println!("Invalid number of samples");
                    continue;
                }
            },
            _ => options.samples,
        };
        round += 1;
        if let Err(err) = answer_query(network, &query, options, num_samples, seed.wrapping_add(round)) {
            println!("Error: {}", err);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let options = parse_configuration_options();
    let seed = options.resolve_seed()?;
    let network = BayesNetwork::alarm();

    if !options.json {
        print_banner();
    }

    if options.analyze {
        run_analysis(&network, seed)?;
    }
    if options.test_queries {
        run_demonstration_queries(&network, &options)?;
    }
    if let Some(input) = &options.query {
        let query = parse_query(input).inspect_err(|err| error!("invalid query {:?}: {}", input, err))?;
        answer_query(&network, &query, &options, options.samples, seed)?;
    }
    if options.is_interactive() {
        interactive_mode(&network, &options, seed)?;
    }
    Ok(())
}
