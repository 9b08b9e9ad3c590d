//! # Validator Module
//!
//! Checks data against a [`Specification`](crate::spec::Specification):
//!
//! - [`types`] - primitive types and named models, recursively
//! - [`Validator::validate_request`] / [`Validator::validate_response`] -
//!   routing, parameter presence, parameter conversion and body checks
//! - [`Validator::merge`] - extending the specification at runtime
//! - [`SharedValidator`] - the same, behind a lock-free snapshot swap
//!
//! Every check returns a `Vec<ValidationError>`; an empty list means valid.
//! Checks never stop at the first error except where a later check would be
//! meaningless (a value of the wrong kind, an unknown model, an unknown
//! operation).

mod core;
mod error;
mod request;
mod shared;
pub mod types;

pub use core::Validator;
pub use error::{ErrorCode, ValidationError};
pub use request::{Request, Response};
pub use shared::SharedValidator;
