use super::SpecError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Numeric bounds declared on an `integer` or `float` type
///
/// Bounds are held as `f64` regardless of how they were written; values are
/// compared against them as floating point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    /// Inclusive lower bound
    pub minimum: Option<f64>,
    /// Inclusive upper bound
    pub maximum: Option<f64>,
}

impl Bounds {
    fn from_object(obj: &Map<String, Value>) -> Result<Self, SpecError> {
        Ok(Bounds {
            minimum: parse_bound(obj, "minimum")?,
            maximum: parse_bound(obj, "maximum")?,
        })
    }
}

/// A declared type, resolved once when the specification is loaded
///
/// Primitive kinds carry their constraints; any type name outside the
/// primitive vocabulary is a reference to a named model. Model references are
/// not checked against `models` here, so a dangling name only surfaces as a
/// `model_missing` error when a value is validated against it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum TypeSpec {
    /// `bool`
    Bool,
    /// `string`, optionally restricted to an `enum` set
    String {
        /// Allowed values, `None` when no `enum` was declared
        allowed: Option<Vec<Value>>,
    },
    /// `integer` (whole numbers only)
    Integer(Bounds),
    /// `float` (whole or fractional numbers)
    Float(Bounds),
    /// `array`, with an optional element type
    Array {
        /// Element type; `None` leaves elements unconstrained
        items: Option<Box<TypeSpec>>,
    },
    /// Reference to a named model
    Model(String),
}

impl TypeSpec {
    /// Resolve a bare type name with no constraints.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "bool" => TypeSpec::Bool,
            "string" => TypeSpec::String { allowed: None },
            "integer" => TypeSpec::Integer(Bounds::default()),
            "float" => TypeSpec::Float(Bounds::default()),
            "array" => TypeSpec::Array { items: None },
            model => TypeSpec::Model(model.to_string()),
        }
    }

    /// Parse a type spec from a mapping carrying `type` and its constraints.
    ///
    /// Parameters and operations declare their type inline, so this is also
    /// used on whole parameter/operation objects; unrelated keys are ignored.
    /// A mapping without `type` is a `string`.
    pub fn from_object(obj: &Map<String, Value>) -> Result<Self, SpecError> {
        let name = match obj.get("type") {
            None => "string",
            Some(Value::String(name)) => name.as_str(),
            Some(other) => {
                return Err(SpecError::InvalidType {
                    reason: format!("`type` must be a string, got {}", other),
                })
            }
        };

        Ok(match name {
            "string" => TypeSpec::String {
                allowed: parse_enum(obj)?,
            },
            "integer" => TypeSpec::Integer(Bounds::from_object(obj)?),
            "float" => TypeSpec::Float(Bounds::from_object(obj)?),
            "array" => TypeSpec::Array {
                items: match obj.get("items") {
                    None | Some(Value::Null) => None,
                    Some(items) => Some(Box::new(TypeSpec::parse(items)?)),
                },
            },
            other => TypeSpec::from_name(other),
        })
    }

    /// Parse a type spec written either as a bare name or as a mapping.
    pub fn parse(value: &Value) -> Result<Self, SpecError> {
        match value {
            Value::String(name) => Ok(TypeSpec::from_name(name)),
            Value::Object(obj) => TypeSpec::from_object(obj),
            other => Err(SpecError::InvalidType {
                reason: format!("expected a type name or mapping, got {}", other),
            }),
        }
    }

    /// The declared type name (`integer`, `array`, or the model name).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TypeSpec::Bool => "bool",
            TypeSpec::String { .. } => "string",
            TypeSpec::Integer(_) => "integer",
            TypeSpec::Float(_) => "float",
            TypeSpec::Array { .. } => "array",
            TypeSpec::Model(name) => name,
        }
    }

    /// The referenced model name, if this is a model reference.
    #[must_use]
    pub fn model_name(&self) -> Option<&str> {
        match self {
            TypeSpec::Model(name) => Some(name),
            _ => None,
        }
    }
}

impl TryFrom<Value> for TypeSpec {
    type Error = SpecError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        TypeSpec::parse(&value)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Array { items: Some(items) } => write!(f, "array<{}>", items),
            other => f.write_str(other.name()),
        }
    }
}

fn parse_enum(obj: &Map<String, Value>) -> Result<Option<Vec<Value>>, SpecError> {
    match obj.get("enum") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(values)) => Ok(Some(values.clone())),
        Some(other) => Err(SpecError::InvalidType {
            reason: format!("`enum` must be a list, got {}", other),
        }),
    }
}

/// Bounds may be numbers or numeric strings (`"minimum": "0"`).
fn parse_bound(obj: &Map<String, Value>, bound: &'static str) -> Result<Option<f64>, SpecError> {
    let invalid = |value: &Value| SpecError::InvalidBound {
        bound,
        value: value.to_string(),
    };

    match obj.get(bound) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| invalid(value)),
        Some(value @ Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(value)),
        Some(value) => Err(invalid(value)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_names() {
        assert_eq!(TypeSpec::parse(&json!("bool")).unwrap(), TypeSpec::Bool);
        assert_eq!(
            TypeSpec::parse(&json!("Pet")).unwrap(),
            TypeSpec::Model("Pet".into())
        );
    }

    #[test]
    fn test_missing_type_is_string() {
        let spec = TypeSpec::parse(&json!({"description": "free text"})).unwrap();
        assert_eq!(spec, TypeSpec::String { allowed: None });
    }

    #[test]
    fn test_string_bounds_are_coerced() {
        let spec = TypeSpec::parse(&json!({"type": "integer", "minimum": "0", "maximum": 80}))
            .unwrap();
        assert_eq!(
            spec,
            TypeSpec::Integer(Bounds {
                minimum: Some(0.0),
                maximum: Some(80.0),
            })
        );
    }

    #[test]
    fn test_bad_bound_is_rejected() {
        let err = TypeSpec::parse(&json!({"type": "float", "maximum": "lots"})).unwrap_err();
        assert!(matches!(err, SpecError::InvalidBound { bound: "maximum", .. }));
    }

    #[test]
    fn test_nested_array_items() {
        let spec = TypeSpec::parse(&json!({
            "type": "array",
            "items": {"type": "array", "items": "Pet"}
        }))
        .unwrap();
        assert_eq!(spec.to_string(), "array<array<Pet>>");
    }
}
