//! Text format of classifier input and output.
//!
//! Input: the first line holds comma-separated experiment names; each following
//! non-blank line holds one observation per experiment. Column `j` across all
//! rows is the time series of name `j`:
//!
//! ```text
//! exp-a,exp-b
//! 0.10,0.12
//! 0.11,0.12
//! ... (100 rows)
//! ```
//!
//! Output: two lines, the names and then `perfect`/`imperfect` per name.

use crate::classify::BatchOutcome;
use crate::domain::{ExperimentBatch, Label, SERIES_LEN};
use crate::error::ClassifyError;

/// Label written for a series whose classification failed.
pub const ERROR_LABEL: &str = "error";

/// Parse the input text into a validated batch.
pub fn parse_input(data: &str) -> Result<ExperimentBatch, ClassifyError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader.headers().map_err(|e| ClassifyError::Parse {
        line: 1,
        message: format!("failed to read experiment names: {e}"),
    })?;
    let names: Vec<String> = headers
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();
    if names.is_empty() || names.iter().all(String::is_empty) {
        return Err(ClassifyError::Parse {
            line: 1,
            message: "no experiment names".to_string(),
        });
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(SERIES_LEN); names.len()];
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ClassifyError::Parse {
            line: idx + 2,
            message: format!("CSV parse error: {e}"),
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != names.len() {
            return Err(ClassifyError::Parse {
                line,
                message: format!(
                    "expected {} values (one per experiment name), found {}",
                    names.len(),
                    record.len()
                ),
            });
        }

        for (j, field) in record.iter().enumerate() {
            let value: f64 = field.parse().map_err(|_| ClassifyError::Parse {
                line,
                message: format!("invalid number '{field}' for experiment '{}'", names[j]),
            })?;
            columns[j].push(value);
        }
    }

    ExperimentBatch::new(names, columns)
}

/// Render a batch back into the input format.
pub fn format_input(batch: &ExperimentBatch) -> String {
    let mut out = batch.names().join(",");
    for i in 0..SERIES_LEN {
        out.push('\n');
        let row: Vec<String> = batch.series().iter().map(|s| s[i].to_string()).collect();
        out.push_str(&row.join(","));
    }
    out.push('\n');
    out
}

/// Render one boolean per name.
pub fn format_output(names: &[String], results: &[bool]) -> Result<String, ClassifyError> {
    if names.len() != results.len() {
        return Err(ClassifyError::Shape {
            what: "results (one per experiment name)",
            expected: names.len(),
            actual: results.len(),
        });
    }
    let labels: Vec<&str> = results.iter().map(|&r| Label::from(r).as_str()).collect();
    Ok(render(names, &labels))
}

/// Render batch outcomes, writing [`ERROR_LABEL`] for failed series.
pub fn format_outcomes(names: &[String], outcomes: &[BatchOutcome]) -> String {
    let labels: Vec<&str> = outcomes
        .iter()
        .map(|o| match o {
            Ok(c) => c.label().as_str(),
            Err(_) => ERROR_LABEL,
        })
        .collect();
    render(names, &labels)
}

fn render(names: &[String], labels: &[&str]) -> String {
    format!("{}\n{}", names.join(","), labels.join(","))
}
