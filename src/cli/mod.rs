//! Command-line parsing for the `classify` binary.
//!
//! Argument parsing and command dispatch stay separate from the classifier
//! and fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::SampleSpec;
use crate::fit::FitOptions;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "classify", version, about = "Perfect/imperfect 5PL time-series classifier")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify every series of an input file and write the labels.
    Run(RunArgs),
    /// Write a synthetic input file of noisy 5PL series.
    Sample(SampleArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Classifier configuration JSON.
    #[arg(long, alias = "config-dir", value_name = "JSON")]
    pub config: PathBuf,

    /// Input file: experiment names, then one row of observations per time step.
    #[arg(long, alias = "data-dir", value_name = "FILE")]
    pub data: PathBuf,

    /// Where to write the `names` / `labels` result.
    #[arg(long, default_value = "results.txt")]
    pub destination: PathBuf,

    /// Write results even if some series fail; failed series are labelled `error`.
    #[arg(long)]
    pub keep_going: bool,

    /// Solver evaluation budget per series.
    #[arg(long = "max-evals", default_value_t = FitOptions::DEFAULT_MAX_EVALUATIONS)]
    pub max_evaluations: usize,

    /// Print the per-series table (fitted parameters, RMSE, label).
    #[arg(long)]
    pub details: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Where to write the generated input file.
    #[arg(long)]
    pub destination: PathBuf,

    /// Also write the default classifier configuration here.
    #[arg(long, value_name = "JSON")]
    pub config_destination: Option<PathBuf>,

    /// Number of series.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Standard deviation of the Gaussian noise.
    #[arg(long, default_value_t = 0.005)]
    pub noise: f64,

    /// Lowest inflection point `c`.
    #[arg(long, default_value_t = 20.0)]
    pub c_min: f64,

    /// Highest inflection point `c`.
    #[arg(long, default_value_t = 80.0)]
    pub c_max: f64,
}

impl SampleArgs {
    pub fn spec(&self) -> SampleSpec {
        SampleSpec {
            count: self.count,
            seed: self.seed,
            noise_sigma: self.noise,
            c_min: self.c_min,
            c_max: self.c_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_accepts_directory_style_aliases() {
        let cli = Cli::parse_from([
            "classify",
            "run",
            "--config-dir",
            "config.json",
            "--data-dir",
            "data.txt",
            "--keep-going",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected the run subcommand");
        };
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.data, PathBuf::from("data.txt"));
        assert_eq!(args.destination, PathBuf::from("results.txt"));
        assert_eq!(args.max_evaluations, FitOptions::DEFAULT_MAX_EVALUATIONS);
        assert!(args.keep_going);
        assert!(!args.details);
    }

    #[test]
    fn sample_defaults_match_sample_spec() {
        let cli = Cli::parse_from(["classify", "sample", "--destination", "data.txt"]);
        let Command::Sample(args) = cli.command else {
            panic!("expected the sample subcommand");
        };
        assert_eq!(args.spec(), SampleSpec::default());
        assert!(args.config_destination.is_none());
    }

    #[test]
    fn run_requires_config_and_data() {
        assert!(Cli::try_parse_from(["classify", "run", "--data", "d.txt"]).is_err());
        assert!(Cli::try_parse_from(["classify", "run", "--config", "c.json"]).is_err());
    }
}
