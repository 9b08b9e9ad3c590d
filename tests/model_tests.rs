#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{expect, summarize, validator};
use serde_json::{json, Value};
use swagger_validator::{ErrorCode, TypeSpec, ValidationError};

fn type_spec(value: Value) -> TypeSpec {
    TypeSpec::parse(&value).expect("type spec parses")
}

fn check_model(doc: Value, expected: &[(&'static str, &[&str])]) {
    let errors = validator().validate_model("Person", &doc);
    assert_eq!(summarize(&errors), expect(expected), "document: {}", doc);
}

#[test]
fn test_valid_person() {
    check_model(json!({"name": "Tom", "age": 30}), &[]);
}

#[test]
fn test_wrong_kind() {
    check_model(
        json!({"name": "Tom", "age": "30"}),
        &[("type_invalid", &["Person", "age"])],
    );
    check_model(
        json!({"name": 44, "age": 30}),
        &[("type_invalid", &["Person", "name"])],
    );
}

#[test]
fn test_missing_required() {
    check_model(
        json!({"name": "Tom"}),
        &[("property_missing", &["Person", "age"])],
    );
    check_model(
        json!({"age": 30}),
        &[("property_missing", &["Person", "name"])],
    );
}

#[test]
fn test_undeclared_property() {
    check_model(
        json!({"name": "Tom", "age": 30, "hobby": "bike"}),
        &[("property_undeclared", &["Person", "hobby"])],
    );
}

#[test]
fn test_constraints() {
    check_model(
        json!({"name": "Tom", "age": 90}),
        &[("type_constraint", &["Person", "age", "maximum"])],
    );
    check_model(
        json!({"name": "Tom", "age": -5}),
        &[("type_constraint", &["Person", "age", "minimum"])],
    );
    check_model(
        json!({"name": "Bob", "age": 30}),
        &[("type_constraint", &["Person", "name", "enum"])],
    );
}

#[test]
fn test_error_order_is_missing_undeclared_then_nested() {
    check_model(
        json!({"age": "30", "zzz": 1, "hobby": "bike"}),
        &[
            ("property_missing", &["Person", "name"]),
            ("property_undeclared", &["Person", "hobby"]),
            ("property_undeclared", &["Person", "zzz"]),
            ("type_invalid", &["Person", "age"]),
        ],
    );
}

#[test]
fn test_arrays_of_primitives_and_models() {
    check_model(json!({"name": "Tom", "age": 30, "hobbies": []}), &[]);
    check_model(json!({"name": "Tom", "age": 30, "hobbies": ["fishing"]}), &[]);
    check_model(json!({"name": "Tom", "age": 30, "pets": []}), &[]);
    check_model(
        json!({"name": "Tom", "age": 30, "pets": [{"species": "cat", "name": "Purr"}]}),
        &[],
    );
    check_model(
        json!({"name": "Tom", "age": 30, "pets": [{"species": 8472, "name": "Purr"}]}),
        &[("type_invalid", &["Person", "pets", "items", "0", "Pet", "species"])],
    );
}

#[test]
fn test_missing_model() {
    let v = validator();
    let expected = vec![ValidationError::new(ErrorCode::ModelMissing, ["User"])];
    assert_eq!(v.validate_model("User", &json!({"name": "Tom", "age": 30})), expected);
    assert_eq!(v.validate_model("User", &json!(null)), expected);
}

#[test]
fn test_non_object_instance() {
    let errors = validator().validate_model("Person", &json!(["Tom", 30]));
    assert_eq!(summarize(&errors), expect(&[("type_invalid", &["Person"])]));
}

#[test]
fn test_dangling_model_reference() {
    let spec = swagger_validator::Specification::from_value(json!({
        "models": {
            "Owner": {"properties": {"pet": {"type": "Ghost"}}}
        }
    }))
    .unwrap();
    let v = swagger_validator::Validator::new(spec, Vec::<String>::new()).unwrap();
    let errors = v.validate_model("Owner", &json!({"pet": {}}));
    assert_eq!(
        summarize(&errors),
        expect(&[("model_missing", &["Owner", "pet", "Ghost"])])
    );
}

#[test]
fn test_validation_is_deterministic() {
    let v = validator();
    let doc = json!({"age": 100, "b": 1, "a": 2, "pets": [{"x": 1}, 3]});
    let first = v.validate_model("Person", &doc);
    for _ in 0..5 {
        assert_eq!(v.validate_model("Person", &doc), first);
    }
}

fn check_type(spec: Value, value: Value, expected: &[(&'static str, &[&str])]) {
    let errors = validator()
        .validate_type(&type_spec(spec.clone()), &value)
        .expect("primitive type resolves");
    assert_eq!(summarize(&errors), expect(expected), "{} vs {}", spec, value);
}

#[test]
fn test_integer_bounds_are_inclusive() {
    let spec = json!({"type": "integer", "minimum": 0, "maximum": 80});
    check_type(spec.clone(), json!(0), &[]);
    check_type(spec.clone(), json!(30), &[]);
    check_type(spec.clone(), json!(80), &[]);
    check_type(spec.clone(), json!(-30), &[("type_constraint", &["minimum"])]);
    check_type(spec, json!(100), &[("type_constraint", &["maximum"])]);
}

#[test]
fn test_integer_bounds_beyond_float_precision() {
    let spec = json!({"type": "integer", "maximum": 9_007_199_254_740_992_i64});
    check_type(spec.clone(), json!(9_007_199_254_740_992_i64), &[]);
    check_type(
        spec,
        json!(9_007_199_254_740_993_i64),
        &[("type_constraint", &["maximum"])],
    );
}

#[test]
fn test_booleans_are_not_numbers() {
    check_type(json!({"type": "integer"}), json!(true), &[("type_invalid", &[])]);
    check_type(json!({"type": "float"}), json!(false), &[("type_invalid", &[])]);
    check_type(json!({"type": "bool"}), json!(false), &[]);
    check_type(json!({"type": "bool"}), json!(0), &[("type_invalid", &[])]);
}

#[test]
fn test_float_accepts_whole_numbers() {
    check_type(json!({"type": "float", "maximum": "1.5"}), json!(1), &[]);
    check_type(json!({"type": "float", "maximum": "1.5"}), json!(1.25), &[]);
    check_type(
        json!({"type": "float", "maximum": "1.5"}),
        json!(1.75),
        &[("type_constraint", &["maximum"])],
    );
    check_type(json!({"type": "integer"}), json!(1.5), &[("type_invalid", &[])]);
}

#[test]
fn test_wrong_kind_skips_constraints() {
    check_type(
        json!({"type": "integer", "minimum": 10}),
        json!("5"),
        &[("type_invalid", &[])],
    );
}

#[test]
fn test_string_enum() {
    let spec = json!({"type": "string", "enum": ["cat", "dog"]});
    check_type(spec.clone(), json!("cat"), &[]);
    check_type(spec, json!("fish"), &[("type_constraint", &["enum"])]);
}

#[test]
fn test_arrays() {
    check_type(json!({"type": "array"}), json!(["foo", "bar"]), &[]);
    check_type(json!({"type": "array"}), json!([1, 2]), &[]);
    check_type(json!({"type": "array"}), json!("foo"), &[("type_invalid", &[])]);
    check_type(
        json!({"type": "array", "items": {"type": "string"}}),
        json!(["foo", "bar"]),
        &[],
    );
    check_type(
        json!({"type": "array", "items": {"type": "integer"}}),
        json!([1, 2, 1]),
        &[],
    );
    check_type(
        json!({"type": "array", "items": {"type": "integer"}}),
        json!(["foo", "bar"]),
        &[
            ("type_invalid", &["items", "0"]),
            ("type_invalid", &["items", "1"]),
        ],
    );
    check_type(
        json!({"type": "array", "items": {"type": "string"}}),
        json!([1]),
        &[("type_invalid", &["items", "0"])],
    );
}

#[test]
fn test_array_of_models() {
    let spec = json!({"type": "array", "items": {"type": "Person"}});
    check_type(
        spec.clone(),
        json!([{"name": "Alice", "age": 25}, {"name": "Tom", "age": 30}]),
        &[],
    );
    check_type(
        spec,
        json!([{"name": "Alice", "age": 25}, {"name": "Tom", "age": "30"}]),
        &[("type_invalid", &["items", "1", "Person", "age"])],
    );
}

#[test]
fn test_model_name_is_unresolved() {
    assert!(validator()
        .validate_type(&type_spec(json!("Person")), &json!({}))
        .is_none());
}

#[test]
fn test_type_or_model() {
    let v = validator();
    let int = type_spec(json!({"type": "integer", "minimum": 0, "maximum": 80}));
    assert!(v.validate_type_or_model(&int, &json!(30)).is_empty());
    assert_eq!(
        summarize(&v.validate_type_or_model(&int, &json!(-30))),
        expect(&[("type_constraint", &["minimum"])])
    );

    let person = type_spec(json!({"type": "Person"}));
    assert!(v
        .validate_type_or_model(&person, &json!({"name": "Alice", "age": 25}))
        .is_empty());
    assert_eq!(
        summarize(&v.validate_type_or_model(&person, &json!({}))),
        expect(&[
            ("property_missing", &["Person", "name"]),
            ("property_missing", &["Person", "age"]),
        ])
    );
}
