use std::fmt;

/// Specification loading error
///
/// Returned when a specification document (or an ignore pattern supplied
/// alongside it) cannot be turned into the validator's typed representation.
/// Validation itself never produces a `SpecError`: defects in the data being
/// validated are reported as [`crate::validator::ValidationError`] records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The document does not have the expected overall shape
    /// (e.g. `apis` is not a list, an endpoint has no `path`).
    InvalidDocument {
        /// Deserializer message
        reason: String,
    },
    /// A model definition is not a mapping or has malformed `properties`/`required`
    InvalidModel {
        /// Offending model name
        model: String,
        /// What was wrong with it
        reason: String,
    },
    /// A type spec could not be parsed (wrong value kind for `type`, `items`, `enum`)
    InvalidType {
        /// What was wrong with it
        reason: String,
    },
    /// A `minimum`/`maximum` bound that is neither a number nor a numeric string
    InvalidBound {
        /// Which bound (`minimum` or `maximum`)
        bound: &'static str,
        /// The raw value as written in the document
        value: String,
    },
    /// An operation method that is not a valid HTTP method token
    InvalidMethod {
        /// The raw method string
        method: String,
    },
    /// A path template whose compiled matcher was rejected by the regex engine
    InvalidPathTemplate {
        /// The endpoint path template
        path: String,
        /// Regex engine message
        reason: String,
    },
    /// An ignored-endpoint pattern that is not a valid regular expression
    InvalidIgnorePattern {
        /// The raw pattern
        pattern: String,
        /// Regex engine message
        reason: String,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::InvalidDocument { reason } => {
                write!(f, "specification error: malformed document: {}", reason)
            }
            SpecError::InvalidModel { model, reason } => {
                write!(f, "specification error: model '{}' is invalid: {}", model, reason)
            }
            SpecError::InvalidType { reason } => {
                write!(f, "specification error: invalid type spec: {}", reason)
            }
            SpecError::InvalidBound { bound, value } => {
                write!(
                    f,
                    "specification error: {} bound '{}' is not a number",
                    bound, value
                )
            }
            SpecError::InvalidMethod { method } => {
                write!(
                    f,
                    "specification error: '{}' is not a valid HTTP method",
                    method
                )
            }
            SpecError::InvalidPathTemplate { path, reason } => {
                write!(
                    f,
                    "specification error: path template '{}' does not compile: {}",
                    path, reason
                )
            }
            SpecError::InvalidIgnorePattern { pattern, reason } => {
                write!(
                    f,
                    "specification error: ignore pattern '{}' is not a valid regex: {}",
                    pattern, reason
                )
            }
        }
    }
}

impl std::error::Error for SpecError {}
