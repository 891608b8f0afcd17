//! Fit the 5PL curve to one time series.
//!
//! Given:
//! - the time axis `x_i`
//! - observed values `y_i`
//! - an evaluation budget
//!
//! we seed the parameters from the data, run Levenberg–Marquardt (the
//! `levenberg-marquardt` crate), and return the fitted parameters with the
//! root-mean-square error of the fitted curve. Solver non-convergence is an
//! error, never a defaulted result.

use levenberg_marquardt::{LevenbergMarquardt, TerminationReason};
use tracing::debug;

use crate::domain::LogisticParams;
use crate::error::ClassifyError;
use crate::fit::problem::Logistic5Problem;
use crate::models::{initial_guess, logistic_5pl};

/// Number of fitted parameters.
const N_PARAMS: usize = 5;

/// Options that affect how each series is fitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Residual evaluations allowed before the fit is abandoned.
    pub max_evaluations: usize,
}

impl FitOptions {
    pub const DEFAULT_MAX_EVALUATIONS: usize = 10_000;

    /// The solver's own cap is `patience * (params + 1)` evaluations.
    fn patience(&self) -> usize {
        self.max_evaluations.div_ceil(N_PARAMS + 1).max(1)
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_evaluations: Self::DEFAULT_MAX_EVALUATIONS,
        }
    }
}

/// Best fit for a single series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticFit {
    pub params: LogisticParams,
    pub rmse: f64,
    pub evaluations: usize,
}

/// Fit the 5PL curve to `(x, y)`.
pub fn fit_logistic(x: &[f64], y: &[f64], opts: &FitOptions) -> Result<LogisticFit, ClassifyError> {
    if x.len() != y.len() || x.len() < N_PARAMS {
        return Err(ClassifyError::Fit {
            message: format!(
                "need at least {N_PARAMS} paired observations, got x={} y={}",
                x.len(),
                y.len()
            ),
        });
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(ClassifyError::Fit {
            message: "array must not contain infs or NaNs".to_string(),
        });
    }

    let problem = Logistic5Problem::new(x, y, initial_guess(x, y), opts.max_evaluations);
    let (problem, report) = LevenbergMarquardt::new()
        .with_patience(opts.patience())
        .minimize(problem);
    debug!(
        termination = ?report.termination,
        evaluations = problem.evaluations(),
        objective = report.objective_function,
        "levenberg-marquardt finished"
    );

    if !report.termination.was_successful() {
        let message = if problem.budget_exhausted() || matches!(report.termination, TerminationReason::LostPatience) {
            format!(
                "optimal parameters not found: number of calls to function has reached maxfev = {}",
                opts.max_evaluations
            )
        } else {
            format!("{:?}", report.termination)
        };
        return Err(ClassifyError::Fit { message });
    }

    let params = problem.params_array();
    let fitted: Vec<f64> = x.iter().map(|&xi| logistic_5pl(xi, &params)).collect();
    let rmse = rmse(&fitted, y);
    if !rmse.is_finite() {
        return Err(ClassifyError::Fit {
            message: "non-finite RMSE for the fitted curve".to_string(),
        });
    }

    Ok(LogisticFit {
        params: LogisticParams::from(params),
        rmse,
        evaluations: problem.evaluations(),
    })
}

/// `sqrt(mean((fitted - observed)^2))`.
///
/// Returns NaN for empty input.
pub fn rmse(fitted: &[f64], observed: &[f64]) -> f64 {
    let n = fitted.len().min(observed.len());
    if n == 0 {
        return f64::NAN;
    }
    let sse: f64 = fitted
        .iter()
        .zip(observed)
        .map(|(f, o)| (f - o) * (f - o))
        .sum();
    (sse / n as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> Vec<f64> {
        (0..100).map(|i| i as f64).collect()
    }

    fn curve(p: [f64; 5]) -> Vec<f64> {
        axis().iter().map(|&x| logistic_5pl(x, &p)).collect()
    }

    #[test]
    fn rmse_of_known_residuals() {
        // Residuals 1, -1, 1, -1 -> rmse 1.
        let r = rmse(&[1.0, 0.0, 1.0, 0.0], &[0.0, 1.0, 0.0, 1.0]);
        assert!((r - 1.0).abs() < 1e-12);
        assert!(rmse(&[], &[]).is_nan());
    }

    #[test]
    fn recovers_noise_free_parameters() {
        let truth = [0.1, 6.0, 50.0, 10.0, 1.0];
        let fit = fit_logistic(&axis(), &curve(truth), &FitOptions::default()).unwrap();

        assert!((fit.params.c - 50.0).abs() < 1e-3, "{:?}", fit.params);
        assert!((fit.params.d - 10.0).abs() < 1e-3, "{:?}", fit.params);
        assert!(fit.rmse < 1e-6, "rmse={}", fit.rmse);
        assert!(fit.evaluations <= FitOptions::DEFAULT_MAX_EVALUATIONS);
    }

    #[test]
    fn recovers_early_inflection() {
        let truth = [0.1, 6.0, 20.0, 10.0, 1.0];
        let fit = fit_logistic(&axis(), &curve(truth), &FitOptions::default()).unwrap();

        assert!((fit.params.c - 20.0).abs() < 1e-3, "{:?}", fit.params);
        assert!(fit.rmse < 1e-6, "rmse={}", fit.rmse);
    }

    #[test]
    fn tiny_budget_reports_solver_diagnostic() {
        let truth = [0.1, 6.0, 50.0, 10.0, 1.0];
        let opts = FitOptions { max_evaluations: 1 };

        let err = fit_logistic(&axis(), &curve(truth), &opts).unwrap_err();
        match err {
            ClassifyError::Fit { message } => assert!(message.contains("maxfev = 1"), "{message}"),
            other => panic!("expected a fit error, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_observations_fail_the_fit() {
        let mut y = curve([0.1, 6.0, 50.0, 10.0, 1.0]);
        y[10] = f64::NAN;

        let err = fit_logistic(&axis(), &y, &FitOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::Fit {
                message: "array must not contain infs or NaNs".to_string()
            }
        );
    }

    #[test]
    fn patience_covers_the_budget() {
        assert_eq!(FitOptions { max_evaluations: 1 }.patience(), 1);
        assert_eq!(FitOptions { max_evaluations: 6 }.patience(), 1);
        assert_eq!(FitOptions { max_evaluations: 7 }.patience(), 2);
        assert_eq!(FitOptions::default().patience(), 1667);
    }

    #[test]
    fn step_series_fits_on_the_step() {
        let x = axis();
        let y: Vec<f64> = x.iter().map(|&xi| if xi < 50.0 { 0.1 } else { 10.0 }).collect();

        let fit = fit_logistic(&x, &y, &FitOptions::default()).unwrap();
        assert!((49.0..=50.0).contains(&fit.params.c), "{:?}", fit.params);
        assert!(fit.rmse < 0.1, "rmse={}", fit.rmse);
    }
}
