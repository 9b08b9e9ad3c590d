use super::{SpecError, TypeSpec};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A declarative API description: endpoints plus the models they reference
///
/// Keys other than `apis` and `models` (`swaggerVersion`, `info`, ...) are
/// accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Specification {
    /// Endpoints in declaration order; lookup order follows it
    #[serde(default)]
    pub apis: Vec<Endpoint>,
    /// Named models
    #[serde(default, deserialize_with = "named_models")]
    pub models: BTreeMap<String, ModelSpec>,
}

fn named_models<'de, D>(deserializer: D) -> Result<BTreeMap<String, ModelSpec>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(name, value)| {
            ModelSpec::parse(&name, value)
                .map(|model| (name, model))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

impl Specification {
    /// Build a specification from an in-memory document.
    pub fn from_value(value: Value) -> Result<Self, SpecError> {
        serde_json::from_value(value).map_err(|e| SpecError::InvalidDocument {
            reason: e.to_string(),
        })
    }

    /// Find an endpoint by its exact path template.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> Option<&Endpoint> {
        self.apis.iter().find(|e| e.path == path)
    }
}

/// One path template and the operations declared on it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Endpoint {
    /// Path template with `{name}` single-segment placeholders
    pub path: String,
    /// Operations, at most one per method
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// One HTTP method bound to an endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Operation {
    /// Upper-cased HTTP method
    pub method: String,
    /// Operation nickname, when declared
    pub nickname: Option<String>,
    /// Declared parameters; empty means the operation is not parameter-checked
    pub parameters: Vec<ParameterSpec>,
    /// Declared response body type; `None` for absent or `void`
    pub response: Option<TypeSpec>,
}

impl TryFrom<Value> for Operation {
    type Error = SpecError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let obj = as_object(&value, "operation")?;

        let method = match obj.get("method") {
            Some(Value::String(m)) => m.to_ascii_uppercase(),
            _ => {
                return Err(SpecError::InvalidDocument {
                    reason: format!("operation without a string `method`: {}", value),
                })
            }
        };

        let nickname = obj
            .get("nickname")
            .and_then(Value::as_str)
            .map(str::to_string);

        let parameters = match obj.get("parameters") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(params)) => params
                .iter()
                .map(ParameterSpec::parse)
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(SpecError::InvalidDocument {
                    reason: format!("`parameters` of {} must be a list, got {}", method, other),
                })
            }
        };

        let response = match obj.get("type").and_then(Value::as_str) {
            None | Some("void") => None,
            Some(_) => Some(TypeSpec::from_object(obj)?),
        };

        Ok(Operation {
            method,
            nickname,
            parameters,
            response,
        })
    }
}

/// Where a parameter is carried on the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamLocation {
    Body,
    Header,
    Path,
    Query,
    /// Any other `paramType` (e.g. `form`); kept but never checked
    Other(String),
}

impl ParamLocation {
    fn parse(raw: &str) -> Self {
        match raw {
            "body" => ParamLocation::Body,
            "header" => ParamLocation::Header,
            "path" => ParamLocation::Path,
            "query" => ParamLocation::Query,
            other => ParamLocation::Other(other.to_string()),
        }
    }

    /// The `paramType` tag, also used as an error path segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ParamLocation::Body => "body",
            ParamLocation::Header => "header",
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared operation parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub location: ParamLocation,
    /// Path parameters are always required, whatever the document says
    pub required: bool,
    pub ty: TypeSpec,
}

impl ParameterSpec {
    fn parse(value: &Value) -> Result<Self, SpecError> {
        let obj = as_object(value, "parameter")?;

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| SpecError::InvalidDocument {
                reason: format!("parameter without a string `name`: {}", value),
            })?
            .to_string();

        let location = obj
            .get("paramType")
            .and_then(Value::as_str)
            .map(ParamLocation::parse)
            .ok_or_else(|| SpecError::InvalidDocument {
                reason: format!("parameter '{}' without a string `paramType`", name),
            })?;

        let required = location == ParamLocation::Path
            || obj.get("required").and_then(Value::as_bool).unwrap_or(false);

        Ok(ParameterSpec {
            ty: TypeSpec::from_object(obj)?,
            name,
            location,
            required,
        })
    }
}

/// A named record type
///
/// The parsed view is what validation walks; `source` keeps the definition as
/// written so that two declarations only compare equal when they are
/// identical documents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ModelSpec {
    /// Declared properties, iterated in name order
    pub properties: BTreeMap<String, TypeSpec>,
    /// Required property names, in declaration order
    pub required: Vec<String>,
    source: Value,
}

impl ModelSpec {
    /// Parse a model definition; `name` is only used in error messages.
    pub fn parse(name: &str, value: Value) -> Result<Self, SpecError> {
        let invalid = |reason: String| SpecError::InvalidModel {
            model: name.to_string(),
            reason,
        };

        let obj = value
            .as_object()
            .ok_or_else(|| invalid(format!("expected a mapping, got {}", value)))?;

        let properties = match obj.get("properties") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(Value::Object(props)) => props
                .iter()
                .map(|(prop, spec)| {
                    TypeSpec::parse(spec)
                        .map(|ty| (prop.clone(), ty))
                        .map_err(|e| invalid(format!("property '{}': {}", prop, e)))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?,
            Some(other) => return Err(invalid(format!("`properties` must be a mapping, got {}", other))),
        };

        let required = match obj.get("required") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(names)) => names
                .iter()
                .map(|n| {
                    n.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid(format!("`required` entry {} is not a string", n)))
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => return Err(invalid(format!("`required` must be a list, got {}", other))),
        };

        Ok(ModelSpec {
            properties,
            required,
            source: value,
        })
    }

    /// The definition exactly as it appeared in the document.
    #[must_use]
    pub fn source(&self) -> &Value {
        &self.source
    }
}

impl TryFrom<Value> for ModelSpec {
    type Error = SpecError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let name = value
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<anonymous>")
            .to_string();
        ModelSpec::parse(&name, value)
    }
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, SpecError> {
    value.as_object().ok_or_else(|| SpecError::InvalidDocument {
        reason: format!("{} must be a mapping, got {}", what, value),
    })
}
