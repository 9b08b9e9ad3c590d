//! Structural checks of values against primitive types and named models.

use super::error::{ErrorCode, ValidationError};
use crate::spec::{Bounds, Specification, TypeSpec};
use serde_json::Value;
use std::cmp::Ordering;

/// Check `value` against a primitive type.
///
/// Returns `None` when `ty` is a model reference; the caller decides whether
/// to fall through to [`validate_model`]. A value of the wrong kind yields a
/// single `type_invalid` and no constraint checks.
#[must_use]
pub fn validate_type(
    spec: &Specification,
    ty: &TypeSpec,
    value: &Value,
) -> Option<Vec<ValidationError>> {
    let invalid = || vec![ValidationError::here(ErrorCode::TypeInvalid)];

    let errors = match ty {
        TypeSpec::Model(_) => return None,
        TypeSpec::Bool => {
            if value.is_boolean() {
                Vec::new()
            } else {
                invalid()
            }
        }
        TypeSpec::String { allowed } => match (value.is_string(), allowed) {
            (false, _) => invalid(),
            (true, Some(allowed)) if !allowed.contains(value) => {
                vec![constraint("enum")]
            }
            (true, _) => Vec::new(),
        },
        TypeSpec::Integer(bounds) => {
            if value.is_i64() || value.is_u64() {
                check_bounds(bounds, value)
            } else {
                invalid()
            }
        }
        TypeSpec::Float(bounds) => {
            if value.is_number() {
                check_bounds(bounds, value)
            } else {
                invalid()
            }
        }
        TypeSpec::Array { items } => match (value.as_array(), items) {
            (None, _) => invalid(),
            (Some(_), None) => Vec::new(),
            (Some(elements), Some(items)) => elements
                .iter()
                .enumerate()
                .flat_map(|(index, element)| {
                    let index = index.to_string();
                    validate_type_or_model(spec, items, element)
                        .into_iter()
                        .map(move |e| e.prefixed(["items", index.as_str()]))
                })
                .collect(),
        },
    };

    Some(errors)
}

/// Check `instance` against the model called `model_name`.
///
/// Errors come out in a fixed order: missing required properties (in
/// `required` order), then undeclared keys, then nested errors of declared
/// properties. The last two are visited in byte-wise name order.
#[must_use]
pub fn validate_model(
    spec: &Specification,
    model_name: &str,
    instance: &Value,
) -> Vec<ValidationError> {
    let Some(model) = spec.models.get(model_name) else {
        return vec![ValidationError::new(ErrorCode::ModelMissing, [model_name])];
    };

    let Some(fields) = instance.as_object() else {
        return vec![ValidationError::new(ErrorCode::TypeInvalid, [model_name])];
    };

    let mut errors = Vec::new();

    for required in &model.required {
        if !fields.contains_key(required) {
            errors.push(ValidationError::new(
                ErrorCode::PropertyMissing,
                [model_name, required.as_str()],
            ));
        }
    }

    let mut undeclared: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|key| !model.properties.contains_key(*key))
        .collect();
    undeclared.sort_unstable();
    for key in undeclared {
        errors.push(ValidationError::new(
            ErrorCode::PropertyUndeclared,
            [model_name, key],
        ));
    }

    // BTreeMap iteration is already in byte-wise key order.
    for (property, ty) in &model.properties {
        if let Some(value) = fields.get(property) {
            errors.extend(
                validate_type_or_model(spec, ty, value)
                    .into_iter()
                    .map(|e| e.prefixed([model_name, property.as_str()])),
            );
        }
    }

    errors
}

/// Check `value` against a primitive type or, failing that, a model.
#[must_use]
pub fn validate_type_or_model(
    spec: &Specification,
    ty: &TypeSpec,
    value: &Value,
) -> Vec<ValidationError> {
    match validate_type(spec, ty, value) {
        Some(errors) => errors,
        None => validate_model(spec, ty.name(), value),
    }
}

fn constraint(which: &str) -> ValidationError {
    ValidationError::new(ErrorCode::TypeConstraint, [which])
}

fn check_bounds(bounds: &Bounds, value: &Value) -> Vec<ValidationError> {
    let integer = value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from));

    let compare = |bound: f64| match integer {
        Some(n) => compare_integer(n, bound),
        None => value.as_f64().and_then(|n| n.partial_cmp(&bound)),
    };

    let mut errors = Vec::new();
    if bounds
        .minimum
        .is_some_and(|min| compare(min) == Some(Ordering::Less))
    {
        errors.push(constraint("minimum"));
    }
    if bounds
        .maximum
        .is_some_and(|max| compare(max) == Some(Ordering::Greater))
    {
        errors.push(constraint("maximum"));
    }
    errors
}

/// Exact comparison of an integer against a float bound, without rounding
/// the integer to `f64` first.
fn compare_integer(n: i128, bound: f64) -> Option<Ordering> {
    if bound.is_nan() {
        return None;
    }
    // Beyond any i64/u64 value; also covers the infinities.
    if bound >= 1e20 {
        return Some(Ordering::Less);
    }
    if bound <= -1e20 {
        return Some(Ordering::Greater);
    }

    let floor = bound.floor();
    // `floor` is integral and well inside i128, so the cast is exact.
    let whole = floor as i128;
    Some(match n.cmp(&whole) {
        Ordering::Equal if floor < bound => Ordering::Less,
        other => other,
    })
}
