//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - runs batch classification or sample generation
//! - writes result files

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::classify::Classifier;
use crate::cli::{Cli, Command, RunArgs, SampleArgs};
use crate::domain::ClassifierConfig;
use crate::error::AppError;
use crate::fit::FitOptions;

pub mod pipeline;

/// Entry point for the `classify` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(&args),
        Command::Sample(args) => handle_sample(&args),
    }
}

/// Logs go to stderr; stdout carries reports only.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (e.g. when embedded).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_run(args: &RunArgs) -> Result<(), AppError> {
    let config = crate::io::load_config(&args.config)?;
    let options = FitOptions {
        max_evaluations: args.max_evaluations,
    };
    let classifier = Classifier::with_options(config, options)?;

    let data = crate::io::read_text(&args.data)?;
    let run = pipeline::run_classification(&classifier, &data)?;

    for err in run.outcomes.iter().filter_map(|o| o.as_ref().err()) {
        warn!(index = err.index, name = %err.name, error = %err.source, "series failed");
    }

    if args.details {
        println!(
            "{}",
            crate::report::format_details(run.batch.names(), &run.outcomes)
        );
    }

    let contents = match run.labels() {
        Some(labels) => crate::io::format_output(run.batch.names(), &labels)?,
        None if args.keep_going => crate::io::format_outcomes(run.batch.names(), &run.outcomes),
        None => return Err(failure_error(&run, "no results written")),
    };
    crate::io::write_text(&args.destination, &contents)?;
    info!(destination = %args.destination.display(), summary = %run.summary, "results written");

    if run.summary.has_failures() {
        return Err(failure_error(&run, "failed series labelled `error`"));
    }
    Ok(())
}

/// Exit-code-3 error naming the first failed series.
fn failure_error(run: &pipeline::RunOutput, consequence: &str) -> AppError {
    let first = run
        .outcomes
        .iter()
        .find_map(|o| o.as_ref().err())
        .map(|e| e.to_string())
        .unwrap_or_default();
    AppError::new(
        3,
        format!(
            "{first}\n{} of {} series failed; {consequence}",
            run.summary.failed, run.summary.total
        ),
    )
}

fn handle_sample(args: &SampleArgs) -> Result<(), AppError> {
    let sample = crate::data::generate_batch(&args.spec())?;
    crate::io::write_text(&args.destination, &crate::io::format_input(&sample.batch))?;
    info!(
        destination = %args.destination.display(),
        count = sample.batch.len(),
        seed = args.seed,
        "sample written"
    );

    if let Some(path) = &args.config_destination {
        crate::io::write_config(path, &ClassifierConfig::default())?;
        info!(destination = %path.display(), "default config written");
    }
    Ok(())
}
