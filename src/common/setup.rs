use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, ValueEnum, builder::EnumValueParser, value_parser};
use env_logger::{Builder, Env};
use serde::Deserialize;
use std::{env, io::Write};

use crate::inference::SamplingMethod;

/// Environment variable consulted for a seed when `--seed` is absent.
pub const SEED_ENV: &str = "ALARMNET_SEED";

/// Which engines a query is answered with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, ValueEnum)]
pub enum MethodChoice {
    /// Enumeration only
    #[serde(rename = "exact")]
    Exact,

    #[serde(rename = "prior")]
    Prior,

    #[serde(rename = "rejection")]
    Rejection,

    #[serde(rename = "likelihood")]
    Likelihood,

    /// Exact plus every sampling method
    #[serde(rename = "all")]
    All,
}

impl MethodChoice {
    pub fn sampling_methods(self) -> Vec<SamplingMethod> {
        match self {
            MethodChoice::Exact => vec![],
            MethodChoice::Prior => vec![SamplingMethod::Prior],
            MethodChoice::Rejection => vec![SamplingMethod::Rejection],
            MethodChoice::Likelihood => vec![SamplingMethod::Likelihood],
            MethodChoice::All => SamplingMethod::ALL.to_vec(),
        }
    }

    pub fn includes_exact(self) -> bool {
        matches!(self, MethodChoice::Exact | MethodChoice::All)
    }
}

/// These options define the inputs from the user.
#[derive(Deserialize, Clone, Debug)]
pub struct CommandLineOptions {
    pub query: Option<String>,
    pub method: MethodChoice,
    pub samples: usize,
    pub trials: usize,
    pub seed: Option<u64>,
    pub analyze: bool,
    pub test_queries: bool,
    pub json: bool,
}

impl CommandLineOptions {
    /// The explicit seed, else `ALARMNET_SEED`, else fresh entropy.
    pub fn resolve_seed(&self) -> Result<u64> {
        if let Some(seed) = self.seed {
            return Ok(seed);
        }
        match env::var(SEED_ENV) {
            Ok(value) => value
                .parse()
                .with_context(|| format!("{} must be an unsigned integer, got {:?}", SEED_ENV, value)),
            Err(_) => Ok(rand::random()),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.query.is_none() && !self.analyze && !self.test_queries
    }
}

/// Installs the `env_logger` backend, `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(
                buf,
                "{} [{}:{}] {}",
                record.level(),
                file,
                line,
                record.args()
            )
        })
        .init();
}

pub fn build_command() -> Command {
    Command::new("ALARMNET")
        .version("0.1.0")
        .about("Exact and sampling inference over the burglary/earthquake alarm network.")
        .arg(
            Arg::new("query")
                .long("query")
                .value_name("QUERY")
                .help("Query in the form [<A,t><B,f>][J,M]"),
        )
        .arg(
            Arg::new("method")
                .long("method")
                .value_parser(EnumValueParser::<MethodChoice>::new())
                .help("Inference method: exact, prior, rejection, likelihood or all")
                .default_value("all"),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Samples drawn per sampling run")
                .default_value("1000"),
        )
        .arg(
            Arg::new("trials")
                .long("trials")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Independent runs averaged per sampling method")
                .default_value("1"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .value_parser(value_parser!(u64))
                .help("Base seed for the random source (optional)"),
        )
        .arg(
            Arg::new("analyze")
                .long("analyze")
                .help("Runs the three canonical cases over a range of sample sizes")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("test_queries")
                .long("test_queries")
                .help("Runs the built-in demonstration queries")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Prints results as JSON")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn options_from_matches(matches: &ArgMatches) -> CommandLineOptions {
    CommandLineOptions {
        query: matches.get_one::<String>("query").cloned(),
        method: matches
            .get_one::<MethodChoice>("method")
            .copied()
            .unwrap_or(MethodChoice::All),
        samples: matches.get_one::<usize>("samples").copied().unwrap_or(1000),
        trials: matches.get_one::<usize>("trials").copied().unwrap_or(1),
        seed: matches.get_one::<u64>("seed").copied(),
        analyze: matches.get_flag("analyze"),
        test_queries: matches.get_flag("test_queries"),
        json: matches.get_flag("json"),
    }
}

pub fn parse_configuration_options() -> CommandLineOptions {
    init_logging();
    options_from_matches(&build_command().get_matches())
}
