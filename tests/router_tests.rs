#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{specification, IGNORE_ENDPOINTS};
use std::collections::HashMap;
use swagger_validator::{LookupResult, OperationLookup};

enum Expected {
    Found(&'static str, &'static [(&'static str, &'static str)]),
    Ignored,
    NotFound,
}

fn assert_lookup(lookup: &OperationLookup, method: &str, path: &str, expected: Expected) {
    let result = lookup.lookup(method, path);
    match (result, expected) {
        (LookupResult::Found(m), Expected::Found(nickname, params)) => {
            assert_eq!(m.operation.nickname.as_deref(), Some(nickname), "{method} {path}");
            let expected_params: HashMap<String, String> = params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            assert_eq!(m.path_params_map(), expected_params, "{method} {path}");
        }
        (LookupResult::Ignored, Expected::Ignored) => {}
        (LookupResult::NotFound, Expected::NotFound) => {}
        (other, _) => panic!("{method} {path}: unexpected lookup result {other:?}"),
    }
}

fn lookup() -> OperationLookup {
    OperationLookup::new(&specification().apis, IGNORE_ENDPOINTS).unwrap()
}

#[test]
fn test_literal_paths() {
    let lookup = lookup();
    assert_lookup(&lookup, "GET", "/foo/", Expected::NotFound);
    assert_lookup(&lookup, "GET", "/info/", Expected::Found("info_get", &[]));
    assert_lookup(&lookup, "GET", "/foo/info/", Expected::NotFound);
    assert_lookup(&lookup, "GET", "/info/bar/", Expected::NotFound);
    assert_lookup(&lookup, "GET", "/notes/", Expected::Found("notes_get", &[]));
    assert_lookup(&lookup, "POST", "/notes/", Expected::Found("notes_post", &[]));
}

#[test]
fn test_templated_paths() {
    let lookup = lookup();
    let id = &[("note_id", "123")];
    assert_lookup(&lookup, "GET", "/note/123/", Expected::Found("note_get", id));
    assert_lookup(&lookup, "PUT", "/note/123/", Expected::Found("note_put", id));
    assert_lookup(&lookup, "DELETE", "/note/123/", Expected::Found("note_delete", id));
}

#[test]
fn test_placeholder_matches_empty_segment() {
    assert_lookup(
        &lookup(),
        "GET",
        "/note//",
        Expected::Found("note_get", &[("note_id", "")]),
    );
}

#[test]
fn test_trailing_slash_is_significant() {
    assert_lookup(&lookup(), "GET", "/note/123", Expected::NotFound);
}

#[test]
fn test_ignored_paths() {
    let lookup = lookup();
    assert_lookup(&lookup, "GET", "/ignore/me", Expected::Ignored);
    assert_lookup(&lookup, "GET", "/note/123/foo", Expected::NotFound);
    assert_lookup(&lookup, "GET", "/note/123/ignore", Expected::Ignored);
    assert_lookup(&lookup, "POST", "/note/abc/ignore", Expected::NotFound);
}

#[test]
fn test_declared_operation_beats_ignore_pattern() {
    let lookup = OperationLookup::new(&specification().apis, [r"/note/.*"]).unwrap();
    assert_lookup(
        &lookup,
        "GET",
        "/note/7/",
        Expected::Found("note_get", &[("note_id", "7")]),
    );
    assert_lookup(&lookup, "PATCH", "/note/7/", Expected::Ignored);
}

#[test]
fn test_route_introspection() {
    let lookup = lookup();
    assert_eq!(lookup.route_count(), 6);
    let routes: Vec<String> = lookup
        .routes()
        .map(|(method, template)| format!("{method} {template}"))
        .collect();
    assert_eq!(routes[0], "GET /notes/");
    assert_eq!(routes[5], "GET /info/");
}
