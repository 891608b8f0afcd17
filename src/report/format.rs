//! Terminal formatting for classification runs.
//!
//! Formatting lives here so the classifier and fitting code stay free of
//! presentation concerns.

use crate::classify::BatchOutcome;
use crate::io::ERROR_LABEL;

/// Counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub perfect: usize,
    pub imperfect: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} series: {} perfect, {} imperfect, {} failed",
            self.total, self.perfect, self.imperfect, self.failed
        )
    }
}

pub fn summarize(outcomes: &[BatchOutcome]) -> BatchSummary {
    outcomes.iter().fold(
        BatchSummary {
            total: outcomes.len(),
            ..BatchSummary::default()
        },
        |mut acc, outcome| {
            match outcome {
                Ok(c) if c.perfect => acc.perfect += 1,
                Ok(_) => acc.imperfect += 1,
                Err(_) => acc.failed += 1,
            }
            acc
        },
    )
}

/// Fixed-width table: one row per series, failures carry their error message.
pub fn format_details(names: &[String], outcomes: &[BatchOutcome]) -> String {
    let width = names.iter().map(String::len).max().unwrap_or(0).max(10);
    let mut out = String::new();

    out.push_str(&format!(
        "{:<width$}  {:<9}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>10}  {:>5}\n",
        "experiment", "label", "a", "b", "c", "d", "g", "rmse", "evals",
    ));
    out.push_str(&format!("{}\n", "-".repeat(width + 90)));

    for (name, outcome) in names.iter().zip(outcomes) {
        match outcome {
            Ok(c) => {
                let p = c.params;
                out.push_str(&format!(
                    "{:<width$}  {:<9}  {:>8.4}  {:>8.4}  {:>8.3}  {:>8.4}  {:>8.4}  {:>10.6}  {:>5}\n",
                    name,
                    c.label().as_str(),
                    p.a,
                    p.b,
                    p.c,
                    p.d,
                    p.g,
                    c.rmse,
                    c.evaluations,
                ));
            }
            Err(err) => {
                out.push_str(&format!("{:<width$}  {:<9}  {}\n", name, ERROR_LABEL, err.source));
            }
        }
    }

    out.push_str(&format!("\n{}\n", summarize(outcomes)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, LogisticParams};
    use crate::error::{BatchError, ClassifyError};

    fn classified(perfect: bool, c: f64) -> BatchOutcome {
        Ok(Classification {
            perfect,
            params: LogisticParams { a: 0.1, b: 8.0, c, d: 10.0, g: 1.0 },
            rmse: 0.0042,
            evaluations: 37,
        })
    }

    fn failed(index: usize, name: &str) -> BatchOutcome {
        Err(BatchError {
            index,
            name: name.to_string(),
            source: ClassifyError::Fit {
                message: "number of calls to function has reached maxfev = 1".to_string(),
            },
        })
    }

    #[test]
    fn summary_counts_each_outcome() {
        let outcomes = vec![classified(true, 50.0), classified(false, 20.0), failed(2, "c"), classified(true, 60.0)];
        let summary = summarize(&outcomes);
        assert_eq!(
            summary,
            BatchSummary { total: 4, perfect: 2, imperfect: 1, failed: 1 }
        );
        assert!(summary.has_failures());
        assert_eq!(summary.to_string(), "4 series: 2 perfect, 1 imperfect, 1 failed");
    }

    #[test]
    fn empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary, BatchSummary::default());
        assert!(!summary.has_failures());
    }

    #[test]
    fn details_list_every_series_in_order() {
        let names = vec!["exp-001".to_string(), "exp-002".to_string(), "exp-003".to_string()];
        let outcomes = vec![classified(true, 50.0), failed(1, "exp-002"), classified(false, 20.0)];
        let table = format_details(&names, &outcomes);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("experiment"));
        assert!(lines[2].starts_with("exp-001") && lines[2].contains("perfect") && lines[2].contains("50.000"));
        assert!(lines[3].starts_with("exp-002") && lines[3].contains("error") && lines[3].contains("maxfev = 1"));
        assert!(lines[4].starts_with("exp-003") && lines[4].contains("imperfect"));
        assert_eq!(lines.last(), Some(&"3 series: 1 perfect, 1 imperfect, 1 failed"));
    }
}
