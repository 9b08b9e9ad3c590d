#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use swagger_validator::spec::from_yaml_str;
use swagger_validator::{Specification, Validator};

pub const IGNORE_ENDPOINTS: [&str; 2] = [r"/ignore/.*", r"/note/\d+/ignore"];

pub const NOTES_SPEC: &str = r#"
swaggerVersion: 1.2
apiVersion: "1.0.0"
basePath: /
info:
  title: Example API
  description: This is Example API used for tests
apis:
  - path: /notes/
    operations:
      - method: GET
        nickname: notes_get
      - method: POST
        nickname: notes_post
  - path: /note/{note_id}/
    operations:
      - method: GET
        nickname: note_get
      - method: PUT
        nickname: note_put
        type: Person
        parameters:
          - name: body
            paramType: body
            required: true
            type: Person
          - name: X-VERSION
            paramType: header
            required: true
            type: integer
          - name: note_id
            paramType: path
            type: integer
          - name: force
            paramType: query
            type: integer
            required: true
          - name: hint
            paramType: query
            type: integer
            required: false
      - method: DELETE
        nickname: note_delete
  - path: /info/
    operations:
      - method: GET
        nickname: info_get
models:
  Person:
    id: Person
    description: Person details
    properties:
      name:
        description: Person name
        type: string
        enum: [Tom, Alice]
      age:
        description: Person age
        type: integer
        minimum: 0
        maximum: 80
      hobbies:
        type: array
        items:
          type: string
      pets:
        type: array
        items:
          type: Pet
    required: [name, age]
  Pet:
    id: Pet
    properties:
      species:
        type: string
      name:
        type: string
"#;

pub fn specification() -> Specification {
    from_yaml_str(NOTES_SPEC).expect("fixture specification parses")
}

pub fn validator() -> Validator {
    Validator::new(specification(), IGNORE_ENDPOINTS).expect("fixture validator builds")
}

/// `(code, path)` pairs, for compact assertions.
pub fn summarize(errors: &[swagger_validator::ValidationError]) -> Vec<(&'static str, Vec<String>)> {
    errors
        .iter()
        .map(|e| (e.code.as_str(), e.path.clone()))
        .collect()
}

pub fn expect(pairs: &[(&'static str, &[&str])]) -> Vec<(&'static str, Vec<String>)> {
    pairs
        .iter()
        .map(|(code, path)| (*code, path.iter().map(|s| s.to_string()).collect()))
        .collect()
}
