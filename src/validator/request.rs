//! Request and response checks against declared operations.

use super::core::Validator;
use super::error::{prefix_all, ErrorCode, ValidationError};
use crate::router::{LookupResult, RouteMatch};
use crate::spec::{ParamLocation, ParameterSpec, TypeSpec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// An incoming request, as handed over by the HTTP layer
///
/// `body` is the field body parameters named `body` are read from; body
/// parameters with other names are looked up in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    /// Raw path, without query string
    pub path: String,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Other caller-designated fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// The named body-bearing field, if the request carries it.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        if name == "body" {
            self.body.as_ref()
        } else {
            self.fields.get(name)
        }
    }

    /// Header value by name, compared ASCII case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An outgoing response; `data` is the body checked against the operation's
/// declared type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Field name response bodies are reported under.
const RESPONSE_BODY_FIELD: &str = "data";

/// Result of converting a parameter string to its declared type
enum Coerced {
    Value(Value),
    /// Declared as a model; only presence is checked
    Unchecked,
    Failed,
}

fn coerce(ty: &TypeSpec, raw: &str) -> Coerced {
    match ty {
        TypeSpec::String { .. } => Coerced::Value(Value::String(raw.to_string())),
        TypeSpec::Bool => raw
            .parse::<bool>()
            .map_or(Coerced::Failed, |b| Coerced::Value(Value::Bool(b))),
        TypeSpec::Integer(_) => raw
            .parse::<i64>()
            .map_or(Coerced::Failed, |n| Coerced::Value(Value::from(n))),
        TypeSpec::Float(_) => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or(Coerced::Failed, |n| Coerced::Value(Value::Number(n))),
        TypeSpec::Array { .. } if raw.is_empty() => Coerced::Value(Value::Array(Vec::new())),
        TypeSpec::Array { items } => {
            let mut elements = Vec::new();
            for part in raw.split(',') {
                let element = match items.as_deref() {
                    Some(items) => coerce(items, part),
                    None => Coerced::Value(Value::String(part.to_string())),
                };
                match element {
                    Coerced::Value(v) => elements.push(v),
                    other => return other,
                }
            }
            Coerced::Value(Value::Array(elements))
        }
        TypeSpec::Model(_) => Coerced::Unchecked,
    }
}

impl Validator {
    /// Check a request against its declared operation.
    ///
    /// Operations without declared parameters are not checked beyond
    /// routing. Otherwise every undeclared query key and every missing
    /// required parameter is reported, present body parameters are validated
    /// against their declared type, and (when `coerce_params` is on) present
    /// header, path and query values are converted and checked.
    ///
    /// # Arguments
    ///
    /// * `request` - The request to check; never modified
    ///
    /// # Returns
    ///
    /// Every violation found, with paths starting `[METHOD, path, ...]`.
    /// Empty for a valid request, an ignored path, or an operation without
    /// declared parameters.
    #[must_use]
    pub fn validate_request(&self, request: &Request) -> Vec<ValidationError> {
        let method = request.method.to_ascii_uppercase();
        let route = match self.resolve(&method, &request.path) {
            Ok(Some(route)) => route,
            Ok(None) => return Vec::new(),
            Err(missing) => return vec![missing],
        };

        let params = &route.operation.parameters;
        if params.is_empty() {
            debug!(method = %method, path = %request.path, "Operation declares no parameters; skipped");
            return Vec::new();
        }

        let prefix = [method.as_str(), request.path.as_str()];
        let mut errors = Vec::new();

        for key in request.query.keys() {
            let declared = params
                .iter()
                .any(|p| p.location == ParamLocation::Query && &p.name == key);
            if !declared {
                errors.push(ValidationError::new(
                    ErrorCode::ParameterUndeclared,
                    [prefix[0], prefix[1], "query", key.as_str()],
                ));
            }
        }

        for param in params {
            self.check_parameter(param, request, &route, &prefix, &mut errors);
        }

        debug!(
            method = %method,
            path = %request.path,
            error_count = errors.len(),
            "Request validated"
        );
        errors
    }

    /// Check a response body against the operation's declared type.
    ///
    /// # Returns
    ///
    /// `operation_missing` when no operation matches; otherwise the errors of
    /// `data` against the declared type, prefixed `[METHOD, path, "data"]`.
    /// Empty when the operation declares no type or the response has no data.
    #[must_use]
    pub fn validate_response(&self, response: &Response) -> Vec<ValidationError> {
        let method = response.method.to_ascii_uppercase();
        let route = match self.resolve(&method, &response.path) {
            Ok(Some(route)) => route,
            Ok(None) => return Vec::new(),
            Err(missing) => return vec![missing],
        };

        let errors = match (&route.operation.response, &response.data) {
            (Some(ty), Some(data)) => prefix_all(
                self.validate_type_or_model(ty, data),
                &[method.as_str(), response.path.as_str(), RESPONSE_BODY_FIELD],
            ),
            _ => Vec::new(),
        };

        debug!(
            method = %method,
            path = %response.path,
            error_count = errors.len(),
            "Response validated"
        );
        errors
    }

    /// `Ok(None)` for ignored paths, `Err` carries the `operation_missing` record.
    fn resolve(&self, method: &str, path: &str) -> Result<Option<RouteMatch>, ValidationError> {
        match self.lookup.lookup(method, path) {
            LookupResult::Found(route) => Ok(Some(route)),
            LookupResult::Ignored => Ok(None),
            LookupResult::NotFound => Err(ValidationError::new(
                ErrorCode::OperationMissing,
                [method, path],
            )),
        }
    }

    fn check_parameter(
        &self,
        param: &ParameterSpec,
        request: &Request,
        route: &RouteMatch,
        prefix: &[&str; 2],
        errors: &mut Vec<ValidationError>,
    ) {
        let tag = param.location.as_str();
        let name = param.name.as_str();

        let raw = match &param.location {
            ParamLocation::Body => {
                match request.field(name) {
                    Some(body) => errors.extend(prefix_all(
                        self.validate_type_or_model(&param.ty, body),
                        &[prefix[0], prefix[1], name],
                    )),
                    None if param.required => errors.push(ValidationError::new(
                        ErrorCode::ParameterMissing,
                        [prefix[0], prefix[1], tag, name],
                    )),
                    None => {}
                }
                return;
            }
            ParamLocation::Header => request.header(name),
            ParamLocation::Path => route.get_path_param(name),
            ParamLocation::Query => request.query.get(name).map(String::as_str),
            ParamLocation::Other(_) => return,
        };

        let required = param.required || param.location == ParamLocation::Path;
        let Some(raw) = raw else {
            if required {
                errors.push(ValidationError::new(
                    ErrorCode::ParameterMissing,
                    [prefix[0], prefix[1], tag, name],
                ));
            }
            return;
        };

        if !self.config.coerce_params {
            return;
        }

        let param_prefix = [prefix[0], prefix[1], tag, name];
        match coerce(&param.ty, raw) {
            Coerced::Value(value) => errors.extend(prefix_all(
                self.validate_type(&param.ty, &value).unwrap_or_default(),
                &param_prefix,
            )),
            Coerced::Failed => {
                errors.push(ValidationError::new(ErrorCode::TypeConvert, param_prefix));
            }
            Coerced::Unchecked => {}
        }
    }
}
