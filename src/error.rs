//! Error types.
//!
//! - [`ClassifyError`] is the library taxonomy: every failure of configuration,
//!   input shape, range validation or curve fitting maps to exactly one variant.
//! - [`BatchError`] attaches the position and name of the offending series.
//! - [`AppError`] is what the `classify` binary reports: a message plus the
//!   process exit code.

use thiserror::Error;

/// A named threshold that a series (or its fit) violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    MinLower,
    MinUpper,
    MaxLower,
    MaxUpper,
    RmseUpper,
}

impl Bound {
    /// Configuration key of the bound (as written in the JSON config).
    pub fn key(self) -> &'static str {
        match self {
            Bound::MinLower => "min-lower-bound",
            Bound::MinUpper => "min-upper-bound",
            Bound::MaxLower => "max-lower-bound",
            Bound::MaxUpper => "max-upper-bound",
            Bound::RmseUpper => "rmse-upper-bound",
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self {
            Bound::MinLower => "minimum value is below",
            Bound::MinUpper => "minimum value is above",
            Bound::MaxLower => "maximum value is below",
            Bound::MaxUpper => "maximum value is above",
            Bound::RmseUpper => "curve fit RMSE exceeds",
        };
        write!(f, "{what} {}", self.key())
    }
}

/// Failure of a single classification (or of building a classifier).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error("configuration error at `{field}`: {reason}")]
    Configuration { field: String, reason: String },

    #[error("shape error: expected {expected} {what}, got {actual}")]
    Shape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("validation error: {bound} (value {value}, bound {limit})")]
    Validation { bound: Bound, value: f64, limit: f64 },

    #[error("curve fitting error: {message}")]
    Fit { message: String },

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl ClassifyError {
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ClassifyError::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The violated bound, for validation failures.
    pub fn bound(&self) -> Option<Bound> {
        match self {
            ClassifyError::Validation { bound, .. } => Some(*bound),
            _ => None,
        }
    }
}

/// A per-item failure inside a batch run.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("error processing time series {index}, experiment {name}: {source}")]
pub struct BatchError {
    pub index: usize,
    pub name: String,
    pub source: ClassifyError,
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ClassifyError> for AppError {
    fn from(err: ClassifyError) -> Self {
        let exit_code = match err {
            ClassifyError::Configuration { .. }
            | ClassifyError::Shape { .. }
            | ClassifyError::Parse { .. } => 2,
            ClassifyError::Validation { .. } | ClassifyError::Fit { .. } => 3,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_bound() {
        let err = ClassifyError::Validation {
            bound: Bound::MinUpper,
            value: 0.7,
            limit: 0.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("min-upper-bound"), "{msg}");
        assert!(msg.contains("0.7"), "{msg}");
        assert_eq!(err.bound(), Some(Bound::MinUpper));
    }

    #[test]
    fn batch_error_reports_index_and_name() {
        let err = BatchError {
            index: 1,
            name: "exp-b".to_string(),
            source: ClassifyError::Fit {
                message: "did not converge".to_string(),
            },
        };
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 3);
        assert_eq!(
            app.to_string(),
            "error processing time series 1, experiment exp-b: curve fitting error: did not converge"
        );
    }

    #[test]
    fn input_errors_map_to_exit_code_2() {
        let app: AppError = ClassifyError::Shape {
            what: "observations per series",
            expected: 100,
            actual: 99,
        }
        .into();
        assert_eq!(app.exit_code(), 2);
    }
}
