//! # swagger-validator
//!
//! Schema-driven validation for HTTP APIs described by a Swagger-style
//! specification: endpoints with their operations and parameters, plus a set
//! of named data models.
//!
//! ## Overview
//!
//! Given a [`Specification`], a [`Validator`] answers three questions:
//!
//! 1. Does a value conform to a declared model or primitive type?
//!    ([`Validator::validate_model`], [`Validator::validate_type`],
//!    [`Validator::validate_type_or_model`])
//! 2. Does a request match a declared operation and carry its declared
//!    parameters? ([`Validator::validate_request`])
//! 3. Does a response body conform to the operation's declared type?
//!    ([`Validator::validate_response`])
//!
//! The specification can be extended at runtime with [`Validator::merge`],
//! which reports (and skips) conflicting models and endpoints.
//!
//! ## Architecture
//!
//! - **[`spec`]** - typed specification document, loading, merging
//! - **[`router`]** - compiled path templates and ignored-endpoint patterns
//! - **[`validator`]** - type/model checks, request/response checks,
//!   [`SharedValidator`] for concurrent use
//! - **[`runtime_config`]** - environment-based [`ValidatorConfig`]
//! - **[`logging`]** - optional `tracing-subscriber` setup
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller as HTTP layer
//!     participant Validator
//!     participant Lookup as OperationLookup
//!     participant Types as validator::types
//!
//!     Caller->>Validator: validate_request(request)
//!     Validator->>Lookup: lookup(method, path)
//!     alt NotFound
//!         Lookup-->>Validator: NotFound
//!         Validator-->>Caller: [operation_missing]
//!     else Ignored
//!         Validator-->>Caller: []
//!     else Found
//!         Lookup-->>Validator: RouteMatch (operation, path params)
//!         Validator->>Validator: undeclared query keys, missing parameters
//!         Validator->>Types: validate_type_or_model(body / converted params)
//!         Types-->>Validator: nested errors
//!         Validator-->>Caller: errors, outer to inner paths
//!     end
//! ```
//!
//! ## Errors
//!
//! Validation never fails: every check returns a list of
//! [`ValidationError`] records (`{code, path}`), empty when the input is
//! valid. Only building a validator from a malformed document, or merging a
//! fragment whose operations cannot be compiled, returns a [`SpecError`].
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use swagger_validator::{ErrorCode, Specification, Validator};
//!
//! let spec = Specification::from_value(json!({
//!     "apis": [],
//!     "models": {
//!         "Person": {
//!             "properties": {
//!                 "name": {"type": "string", "enum": ["Tom", "Alice"]},
//!                 "age": {"type": "integer", "minimum": 0, "maximum": 80}
//!             },
//!             "required": ["name", "age"]
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! let validator = Validator::new(spec, Vec::<String>::new()).unwrap();
//! let errors = validator.validate_model("Person", &json!({"name": "Tom", "age": 90}));
//! assert_eq!(errors[0].code, ErrorCode::TypeConstraint);
//! assert_eq!(errors[0].path, vec!["Person", "age", "maximum"]);
//! ```

pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod spec;
pub mod validator;

pub use router::{LookupResult, OperationLookup, RouteMatch};
pub use runtime_config::ValidatorConfig;
pub use spec::{load_spec, SpecError, Specification, TypeSpec};
pub use validator::{ErrorCode, Request, Response, SharedValidator, ValidationError, Validator};
