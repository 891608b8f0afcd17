//! Shared domain types.
//!
//! These types are kept small and plain so they can be:
//!
//! - shared read-only across concurrent classification calls
//! - serialized back to the JSON config format
//! - reported in the CLI's detail table

use serde::Serialize;

use crate::error::ClassifyError;

/// Number of observations in every time series.
pub const SERIES_LEN: usize = 100;

/// Range and fit-quality limits a series must satisfy before it is classified.
///
/// Each `*-lower-bound` is expected to be `<=` its matching `*-upper-bound`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ValidationThresholds {
    pub min_lower_bound: f64,
    pub min_upper_bound: f64,
    pub max_lower_bound: f64,
    pub max_upper_bound: f64,
    pub rmse_upper_bound: f64,
}

/// Acceptance band for the fitted inflection parameter `c` and the fine RMSE cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PredictionThresholds {
    pub cparam_lower_bound: f64,
    pub cparam_upper_bound: f64,
    pub rmse_threshold: f64,
}

/// Full classifier configuration (both sections are required).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifierConfig {
    pub validation: ValidationThresholds,
    pub prediction: PredictionThresholds,
}

impl Default for ClassifierConfig {
    /// Thresholds used by the reference deployment.
    fn default() -> Self {
        Self {
            validation: ValidationThresholds {
                min_lower_bound: 0.0,
                min_upper_bound: 0.5,
                max_lower_bound: 2.0,
                max_upper_bound: 14.0,
                rmse_upper_bound: 5.0,
            },
            prediction: PredictionThresholds {
                cparam_lower_bound: 35.0,
                cparam_upper_bound: 85.0,
                rmse_threshold: 0.018,
            },
        }
    }
}

/// Fitted parameters of the 5-parameter logistic
/// `f(x) = d + (a - d) / (1 + (x / c)^b)^g`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticParams {
    /// Response at `x = 0`.
    pub a: f64,
    /// Slope (Hill coefficient).
    pub b: f64,
    /// Inflection scale.
    pub c: f64,
    /// Response as `x -> inf`.
    pub d: f64,
    /// Asymmetry.
    pub g: f64,
}

impl From<[f64; 5]> for LogisticParams {
    fn from([a, b, c, d, g]: [f64; 5]) -> Self {
        Self { a, b, c, d, g }
    }
}

impl LogisticParams {
    pub fn to_array(self) -> [f64; 5] {
        [self.a, self.b, self.c, self.d, self.g]
    }

    /// Evaluate the curve at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        crate::models::logistic_5pl(x, &self.to_array())
    }
}

/// Rendered classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Perfect,
    Imperfect,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Perfect => "perfect",
            Label::Imperfect => "imperfect",
        }
    }
}

impl From<bool> for Label {
    fn from(perfect: bool) -> Self {
        if perfect { Label::Perfect } else { Label::Imperfect }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything computed while classifying one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub perfect: bool,
    pub params: LogisticParams,
    pub rmse: f64,
    /// Model evaluations spent by the solver.
    pub evaluations: usize,
}

impl Classification {
    pub fn label(&self) -> Label {
        Label::from(self.perfect)
    }
}

/// Named series as delivered by the input format.
///
/// Construction enforces what the classifier assumes of a batch: one series per
/// name, and exactly [`SERIES_LEN`] observations per series.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentBatch {
    names: Vec<String>,
    series: Vec<Vec<f64>>,
}

impl ExperimentBatch {
    pub fn new(names: Vec<String>, series: Vec<Vec<f64>>) -> Result<Self, ClassifyError> {
        if let Some(bad) = series.iter().find(|s| s.len() != SERIES_LEN) {
            return Err(ClassifyError::Shape {
                what: "observations per series",
                expected: SERIES_LEN,
                actual: bad.len(),
            });
        }
        if series.len() != names.len() {
            return Err(ClassifyError::Shape {
                what: "time series (one per experiment name)",
                expected: names.len(),
                actual: series.len(),
            });
        }
        Ok(Self { names, series })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn series(&self) -> &[Vec<f64>] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
