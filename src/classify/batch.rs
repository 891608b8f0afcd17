//! Batch classification.
//!
//! Each series is classified in isolation (in parallel); a failure is recorded
//! against its own index and name and never affects its neighbours. Results
//! come back in input order.

use rayon::prelude::*;
use tracing::info;

use crate::classify::Classifier;
use crate::domain::{Classification, ExperimentBatch};
use crate::error::BatchError;

/// Per-series outcome of a batch run, in input order.
pub type BatchOutcome = Result<Classification, BatchError>;

impl Classifier {
    pub fn classify_batch(&self, batch: &ExperimentBatch) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = batch
            .series()
            .par_iter()
            .enumerate()
            .map(|(index, series)| {
                self.classify_detailed(series).map_err(|source| BatchError {
                    index,
                    name: batch.names()[index].clone(),
                    source,
                })
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.is_err()).count();
        info!(total = outcomes.len(), failed, "batch classified");
        outcomes
    }
}
