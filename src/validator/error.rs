use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation error taxonomy
///
/// Serialized as the snake_case code string (`"type_invalid"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A type referenced a model that is not declared
    ModelMissing,
    /// A required model property is absent
    PropertyMissing,
    /// An instance carries a property the model does not declare
    PropertyUndeclared,
    /// A value is of the wrong kind for its declared type
    TypeInvalid,
    /// A value of the right kind violates `enum`, `minimum` or `maximum`
    TypeConstraint,
    /// A header/query/path string cannot be converted to its declared type
    TypeConvert,
    /// No declared operation matches the method and path
    OperationMissing,
    /// A required parameter is absent from the request
    ParameterMissing,
    /// A query key is not a declared query parameter
    ParameterUndeclared,
    /// A merged model differs from the existing definition
    MergeModelConflict,
    /// A merged endpoint path is already declared
    MergeApisConflict,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ModelMissing => "model_missing",
            ErrorCode::PropertyMissing => "property_missing",
            ErrorCode::PropertyUndeclared => "property_undeclared",
            ErrorCode::TypeInvalid => "type_invalid",
            ErrorCode::TypeConstraint => "type_constraint",
            ErrorCode::TypeConvert => "type_convert",
            ErrorCode::OperationMissing => "operation_missing",
            ErrorCode::ParameterMissing => "parameter_missing",
            ErrorCode::ParameterUndeclared => "parameter_undeclared",
            ErrorCode::MergeModelConflict => "merge_model_conflict",
            ErrorCode::MergeApisConflict => "merge_apis_conflict",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure
///
/// `path` runs from the validation root to the failure site. Nested checks
/// build it bottom-up: each level prepends its own segments to the errors
/// returned from below, so the finished path reads outer to inner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: ErrorCode,
    pub path: Vec<String>,
}

impl ValidationError {
    pub fn new<I, S>(code: ErrorCode, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code,
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// An error located at the current validation root.
    #[must_use]
    pub fn here(code: ErrorCode) -> Self {
        Self {
            code,
            path: Vec::new(),
        }
    }

    /// Prepend `prefix` to this error's path.
    #[must_use]
    pub fn prefixed<I, S>(mut self, prefix: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tail = std::mem::take(&mut self.path);
        self.path = prefix.into_iter().map(Into::into).chain(tail).collect();
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.code, self.path.join("/"))
    }
}

/// Prepend the same segments to every error in `errors`.
pub(crate) fn prefix_all(errors: Vec<ValidationError>, prefix: &[&str]) -> Vec<ValidationError> {
    errors
        .into_iter()
        .map(|e| e.prefixed(prefix.iter().copied()))
        .collect()
}
