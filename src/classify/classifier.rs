//! The perfect/imperfect classifier.
//!
//! One call runs, in order, each step's failure ending the call:
//!
//! 1. shape check (exactly [`SERIES_LEN`] observations)
//! 2. range validation of the series minimum and maximum
//! 3. 5PL curve fit
//! 4. RMSE gate against `rmse-upper-bound`
//! 5. decision: `c` band first (short-circuits to imperfect), then `rmse-threshold`
//!
//! The classifier holds only immutable state, so a single instance can serve
//! any number of threads.

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    Classification, ClassifierConfig, LogisticParams, PredictionThresholds, SERIES_LEN,
    ValidationThresholds,
};
use crate::error::{Bound, ClassifyError};
use crate::fit::{FitOptions, fit_logistic};

#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
    options: FitOptions,
    time_axis: Vec<f64>,
}

impl Classifier {
    /// Build a classifier with the default evaluation budget.
    pub fn new(config: ClassifierConfig) -> Self {
        warn_on_inverted_bounds(&config);
        Self {
            config,
            options: FitOptions::default(),
            time_axis: (0..SERIES_LEN).map(|i| i as f64).collect(),
        }
    }

    pub fn with_options(config: ClassifierConfig, options: FitOptions) -> Result<Self, ClassifyError> {
        if options.max_evaluations == 0 {
            return Err(ClassifyError::configuration(
                "fit.max-evaluations",
                "evaluation budget must be at least 1",
            ));
        }
        Ok(Self {
            options,
            ..Self::new(config)
        })
    }

    /// Build from an untyped JSON configuration; missing sections or keys are
    /// reported by name.
    pub fn from_json(value: &Value) -> Result<Self, ClassifyError> {
        let config = ClassifierConfig::try_from(value)?;
        Ok(Self::new(config))
    }

    /// The fixed time axis `0, 1, ..., 99`.
    pub fn time_axis(&self) -> &[f64] {
        &self.time_axis
    }

    /// `true` if the series is perfect, `false` if imperfect.
    pub fn classify(&self, series: &[f64]) -> Result<bool, ClassifyError> {
        self.classify_detailed(series).map(|c| c.perfect)
    }

    /// Classify and keep the fitted parameters and RMSE.
    pub fn classify_detailed(&self, series: &[f64]) -> Result<Classification, ClassifyError> {
        if series.len() != SERIES_LEN {
            return Err(ClassifyError::Shape {
                what: "observations per series",
                expected: SERIES_LEN,
                actual: series.len(),
            });
        }

        validate_range(series, &self.config.validation)?;

        let fit = fit_logistic(&self.time_axis, series, &self.options)?;
        check_fit_quality(fit.rmse, &self.config.validation)?;

        let perfect = decide(&fit.params, fit.rmse, &self.config.prediction);
        debug!(
            c = fit.params.c,
            rmse = fit.rmse,
            evaluations = fit.evaluations,
            perfect,
            "series classified"
        );

        Ok(Classification {
            perfect,
            params: fit.params,
            rmse: fit.rmse,
            evaluations: fit.evaluations,
        })
    }
}

/// Reject series whose baseline or plateau is out of range.
///
/// Bounds are inclusive: a minimum equal to `min-lower-bound` passes.
pub fn validate_range(series: &[f64], limits: &ValidationThresholds) -> Result<(), ClassifyError> {
    let min_val = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max_val = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let checks = [
        (min_val < limits.min_lower_bound, Bound::MinLower, min_val, limits.min_lower_bound),
        (min_val > limits.min_upper_bound, Bound::MinUpper, min_val, limits.min_upper_bound),
        (max_val < limits.max_lower_bound, Bound::MaxLower, max_val, limits.max_lower_bound),
        (max_val > limits.max_upper_bound, Bound::MaxUpper, max_val, limits.max_upper_bound),
    ];
    for (violated, bound, value, limit) in checks {
        if violated {
            return Err(ClassifyError::Validation { bound, value, limit });
        }
    }

    debug!(min_val, max_val, "range validated");
    Ok(())
}

/// A fit this poor invalidates the classification.
pub fn check_fit_quality(rmse: f64, limits: &ValidationThresholds) -> Result<(), ClassifyError> {
    if rmse > limits.rmse_upper_bound {
        return Err(ClassifyError::Validation {
            bound: Bound::RmseUpper,
            value: rmse,
            limit: limits.rmse_upper_bound,
        });
    }
    Ok(())
}

/// Two-stage decision.
///
/// An out-of-band `c` is imperfect regardless of RMSE; only an in-band `c`
/// consults the (strict) RMSE threshold.
pub fn decide(params: &LogisticParams, rmse: f64, band: &PredictionThresholds) -> bool {
    if params.c < band.cparam_lower_bound || params.c > band.cparam_upper_bound {
        return false;
    }
    rmse < band.rmse_threshold
}

fn warn_on_inverted_bounds(config: &ClassifierConfig) {
    let v = &config.validation;
    let p = &config.prediction;
    let pairs = [
        ("min-lower-bound", v.min_lower_bound, "min-upper-bound", v.min_upper_bound),
        ("max-lower-bound", v.max_lower_bound, "max-upper-bound", v.max_upper_bound),
        ("cparam-lower-bound", p.cparam_lower_bound, "cparam-upper-bound", p.cparam_upper_bound),
    ];
    for (lo_key, lo, hi_key, hi) in pairs {
        if lo > hi {
            warn!(lo_key, lo, hi_key, hi, "lower bound exceeds upper bound; every series will be rejected");
        }
    }
}
