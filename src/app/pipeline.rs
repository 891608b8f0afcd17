//! Shared "classification pipeline" used by the `run` command.
//!
//! parse input -> classify every series -> summarize
//!
//! The command handler then only deals with presentation and file output.

use crate::classify::{BatchOutcome, Classifier};
use crate::domain::ExperimentBatch;
use crate::error::AppError;
use crate::io::parse_input;
use crate::report::{BatchSummary, summarize};

/// All computed outputs of a single `classify run`.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub batch: ExperimentBatch,
    pub outcomes: Vec<BatchOutcome>,
    pub summary: BatchSummary,
}

impl RunOutput {
    /// Per-series labels, if every series was classified.
    pub fn labels(&self) -> Option<Vec<bool>> {
        self.outcomes
            .iter()
            .map(|o| o.as_ref().ok().map(|c| c.perfect))
            .collect()
    }
}

/// Parse `data` and classify every series it holds.
pub fn run_classification(classifier: &Classifier, data: &str) -> Result<RunOutput, AppError> {
    let batch = parse_input(data)?;
    let outcomes = classifier.classify_batch(&batch);
    let summary = summarize(&outcomes);

    Ok(RunOutput {
        batch,
        outcomes,
        summary,
    })
}
