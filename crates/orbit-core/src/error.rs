//! # Error Hierarchy
//!
//! Structured error types for the Orbit Compliance Stack, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Validation errors carry the offending field and, where it helps, the
//! accepted range or vocabulary, so a questionnaire front end can point the
//! operator at the exact answer that needs fixing.

use thiserror::Error;

use crate::framework::Framework;

/// Top-level error type for the Orbit Compliance Stack.
#[derive(Error, Debug)]
pub enum OrbitError {
    /// A questionnaire or profile failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A framework name did not match any known framework.
    #[error("unknown framework: \"{0}\"")]
    UnknownFramework(String),

    /// A requirement identifier is not part of the framework's catalog.
    #[error("unknown requirement {id} in {framework} catalog")]
    UnknownRequirement {
        /// Framework whose catalog was searched.
        framework: Framework,
        /// The identifier that was not found.
        id: String,
    },

    /// A catalog is internally inconsistent (dangling cross reference,
    /// duplicate identifier).
    #[error("catalog error: {0}")]
    Catalog(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors raised while normalizing questionnaire answers and
/// domain identifiers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required answer is absent.
    #[error("{field} is required")]
    MissingField {
        /// Human-readable field name (e.g. "orbit regime").
        field: &'static str,
    },

    /// A numeric answer falls outside its accepted range.
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Human-readable field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// An answer is present but not one of the accepted values.
    #[error("invalid {field}: \"{value}\" (expected {expected})")]
    InvalidValue {
        /// Human-readable field name.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Description of what is accepted.
        expected: &'static str,
    },

    /// An identifier newtype was constructed from an empty string.
    #[error("{kind} must be non-empty")]
    EmptyIdentifier {
        /// The kind of identifier (e.g. "operator ID").
        kind: &'static str,
    },

    /// Two answers contradict each other.
    #[error("inconsistent answers: {message}")]
    InconsistentFields {
        /// Description of the contradiction.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_like_a_sentence() {
        let err = ValidationError::MissingField {
            field: "orbit regime",
        };
        assert_eq!(err.to_string(), "orbit regime is required");
    }

    #[test]
    fn out_of_range_includes_bounds() {
        let err = ValidationError::OutOfRange {
            field: "US content percent",
            value: 140.0,
            min: 0.0,
            max: 100.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("140"));
        assert!(msg.contains("between 0 and 100"));
    }

    #[test]
    fn invalid_value_names_expected_vocabulary() {
        let err = ValidationError::InvalidValue {
            field: "destination",
            value: "XX1".into(),
            expected: "ISO 3166-1 alpha-2 country code",
        };
        assert!(err.to_string().contains("alpha-2"));
    }

    #[test]
    fn orbit_error_wraps_validation() {
        let err: OrbitError = ValidationError::EmptyIdentifier {
            kind: "operator ID",
        }
        .into();
        assert!(err.to_string().starts_with("validation error"));
        assert!(err.to_string().contains("operator ID"));
    }

    #[test]
    fn unknown_requirement_names_framework() {
        let err = OrbitError::UnknownRequirement {
            framework: Framework::Nis2,
            id: "nis2.art99".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("nis2.art99"));
        assert!(msg.contains("nis2"));
    }

    #[test]
    fn unknown_framework_display() {
        let err = OrbitError::UnknownFramework("gdpr".into());
        assert!(err.to_string().contains("gdpr"));
    }
}
