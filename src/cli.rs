use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, ValueEnum};

use simdomain::algorithm::Algorithm;
use simdomain::constants::VALID_CHOICES;
use simdomain::dispatch::AnalysisConfig;

/// Where domains are read from, in addition to `--domains`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Newline-delimited domain lists given with `--file`.
    File,
    /// Zip archives of domain lists given with `--zip`.
    Zip,
    /// Domain lists fetched over HTTP from `--download`.
    Download,
}

#[derive(Parser, Debug)]
#[command(name = "whois-similarity")]
#[command(version)]
#[command(about = "Calculate similarity of domain name to a given string.")]
pub struct Args {
    /// Which domain source to read
    #[arg(long, value_enum, default_value_t = Action::Download)]
    pub action: Action,

    /// Process domain list files
    #[arg(long, num_args = 1..)]
    pub file: Vec<PathBuf>,

    /// Process zipped domain list files
    #[arg(long, num_args = 1..)]
    pub zip: Vec<PathBuf>,

    /// Download domain lists from these URLs (plain HTTP)
    #[arg(long, num_args = 1..)]
    pub download: Vec<String>,

    /// Write the output to this file instead of stdout
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Domains to compare
    #[arg(long, num_args = 1..)]
    pub domains: Vec<String>,

    /// Strings to compare against the domains
    #[arg(long, num_args = 1.., required = true)]
    pub similar: Vec<String>,

    /// Domain name centric analysis
    #[arg(long)]
    pub domain_centric: bool,

    /// Matching algorithm to use
    #[arg(long, default_value = "all", value_parser = algorithm_parser())]
    pub algorithm: Algorithm,

    /// Check whether the domains contain the strings
    #[arg(long)]
    pub contains: bool,

    /// Algorithm used to detect string presence (ignored for domain centric analysis)
    #[arg(long, default_value = "all", value_parser = algorithm_parser())]
    pub contains_algorithm: Algorithm,

    /// Determine similarity on matches only
    #[arg(long)]
    pub matches: bool,

    /// Minimum score for containment and matches
    #[arg(long, default_value_t = 0.0)]
    pub threshold: f64,

    /// Output JSON content
    #[arg(long)]
    pub json: bool,
}

fn algorithm_parser() -> impl TypedValueParser<Value = Algorithm> {
    PossibleValuesParser::new(VALID_CHOICES).try_map(|s| s.parse::<Algorithm>())
}

impl Args {
    pub fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            algorithm: self.algorithm,
            contains_algorithm: self.contains_algorithm,
            exec_contains: self.contains,
            exec_matches: self.matches,
            threshold: self.threshold,
        }
    }
}
