//! Read/write classifier configuration JSON.
//!
//! Expected shape (kebab-case keys, both sections required):
//!
//! ```json
//! {
//!   "validation": {
//!     "min-lower-bound": 0.0, "min-upper-bound": 0.5,
//!     "max-lower-bound": 2.0, "max-upper-bound": 14.0,
//!     "rmse-upper-bound": 5.0
//!   },
//!   "prediction": {
//!     "cparam-lower-bound": 35.0, "cparam-upper-bound": 85.0,
//!     "rmse-threshold": 0.018
//!   }
//! }
//! ```
//!
//! Keys are looked up one by one so a missing key is reported as
//! `section.key` rather than a generic deserialization failure.

use std::fs::File;
use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::{ClassifierConfig, PredictionThresholds, ValidationThresholds};
use crate::error::{AppError, ClassifyError};

/// Parse a configuration from JSON text.
pub fn parse_config(text: &str) -> Result<ClassifierConfig, ClassifyError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ClassifyError::configuration("<root>", format!("invalid JSON: {e}")))?;
    ClassifierConfig::try_from(&value)
}

/// Read a configuration file.
pub fn load_config(path: &Path) -> Result<ClassifierConfig, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read config '{}': {e}", path.display())))?;
    Ok(parse_config(&text)?)
}

/// Write a configuration file (pretty-printed).
pub fn write_config(path: &Path, config: &ClassifierConfig) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create config '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, config)
        .map_err(|e| AppError::new(4, format!("Failed to write config JSON: {e}")))?;
    Ok(())
}

impl TryFrom<&Value> for ClassifierConfig {
    type Error = ClassifyError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        if !value.is_object() {
            return Err(ClassifyError::configuration("<root>", "expected a JSON object"));
        }

        let v = section(value, "validation")?;
        let validation = ValidationThresholds {
            min_lower_bound: number(v, "validation", "min-lower-bound")?,
            min_upper_bound: number(v, "validation", "min-upper-bound")?,
            max_lower_bound: number(v, "validation", "max-lower-bound")?,
            max_upper_bound: number(v, "validation", "max-upper-bound")?,
            rmse_upper_bound: number(v, "validation", "rmse-upper-bound")?,
        };

        let p = section(value, "prediction")?;
        let prediction = PredictionThresholds {
            cparam_lower_bound: number(p, "prediction", "cparam-lower-bound")?,
            cparam_upper_bound: number(p, "prediction", "cparam-upper-bound")?,
            rmse_threshold: number(p, "prediction", "rmse-threshold")?,
        };

        Ok(ClassifierConfig {
            validation,
            prediction,
        })
    }
}

fn section<'a>(root: &'a Value, name: &str) -> Result<&'a Map<String, Value>, ClassifyError> {
    match root.get(name) {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(ClassifyError::configuration(
            name,
            format!("expected an object, got {other}"),
        )),
        None => Err(ClassifyError::configuration(name, "missing required section")),
    }
}

fn number(section: &Map<String, Value>, section_name: &str, key: &str) -> Result<f64, ClassifyError> {
    let field = format!("{section_name}.{key}");
    match section.get(key) {
        Some(value) => value.as_f64().ok_or_else(|| {
            ClassifyError::configuration(field, format!("expected a number, got {value}"))
        }),
        None => Err(ClassifyError::configuration(field, "missing required key")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = r#"{
        "validation": {
            "min-lower-bound": 0.0,
            "min-upper-bound": 0.5,
            "max-lower-bound": 2.0,
            "max-upper-bound": 14.0,
            "rmse-upper-bound": 5.0
        },
        "prediction": {
            "cparam-lower-bound": 35.0,
            "cparam-upper-bound": 85.0,
            "rmse-threshold": 0.018
        }
    }"#;

    #[test]
    fn parses_reference_config() {
        let config = parse_config(REFERENCE).unwrap();
        assert_eq!(config, ClassifierConfig::default());
    }

    #[test]
    fn integer_thresholds_are_accepted() {
        let text = REFERENCE.replace("14.0", "14");
        let config = parse_config(&text).unwrap();
        assert_eq!(config.validation.max_upper_bound, 14.0);
    }

    #[test]
    fn serialized_default_uses_the_same_keys() {
        let text = serde_json::to_string(&ClassifierConfig::default()).unwrap();
        assert!(text.contains("\"cparam-lower-bound\""), "{text}");
        assert_eq!(parse_config(&text).unwrap(), ClassifierConfig::default());
    }

    #[test]
    fn missing_section_is_named() {
        let err = parse_config(r#"{"validation": {}}"#).unwrap_err();
        // Keys are checked section by section, so the first empty section fails first.
        assert_eq!(
            err,
            ClassifyError::configuration("validation.min-lower-bound", "missing required key")
        );

        let mut value: Value = serde_json::from_str(REFERENCE).unwrap();
        value.as_object_mut().unwrap().remove("prediction");
        let err = ClassifierConfig::try_from(&value).unwrap_err();
        assert_eq!(err, ClassifyError::configuration("prediction", "missing required section"));
    }

    #[test]
    fn non_numeric_threshold_is_rejected() {
        let text = REFERENCE.replace("0.018", "\"tight\"");
        let err = parse_config(&text).unwrap_err();
        match err {
            ClassifyError::Configuration { field, reason } => {
                assert_eq!(field, "prediction.rmse-threshold");
                assert!(reason.contains("expected a number"), "{reason}");
            }
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        let err = parse_config("{ not json").unwrap_err();
        assert!(matches!(err, ClassifyError::Configuration { .. }));
        let err = parse_config("[1, 2]").unwrap_err();
        assert_eq!(err, ClassifyError::configuration("<root>", "expected a JSON object"));
    }
}
