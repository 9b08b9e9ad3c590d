use super::core::Validator;
use super::error::ValidationError;
use super::request::{Request, Response};
use crate::spec::{SpecError, Specification, TypeSpec};
use arc_swap::ArcSwap;
use serde_json::Value;
use std::sync::Arc;

/// A [`Validator`] shared between threads
///
/// Validation calls load the current snapshot without locking. `merge`
/// builds a complete new validator (specification plus operation table) and
/// swaps it in, so a reader sees either the old state or the new one, never
/// a table half-rebuilt against a different specification. Concurrent merges
/// are retried against each other's result and so never lose an update.
#[derive(Debug)]
pub struct SharedValidator {
    current: ArcSwap<Validator>,
}

impl SharedValidator {
    #[must_use]
    pub fn new(validator: Validator) -> Self {
        Self {
            current: ArcSwap::from_pointee(validator),
        }
    }

    /// The validator as of now; unaffected by later merges.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Validator> {
        self.current.load_full()
    }

    #[must_use]
    pub fn validate_type(&self, ty: &TypeSpec, value: &Value) -> Option<Vec<ValidationError>> {
        self.current.load().validate_type(ty, value)
    }

    #[must_use]
    pub fn validate_model(&self, model_name: &str, instance: &Value) -> Vec<ValidationError> {
        self.current.load().validate_model(model_name, instance)
    }

    #[must_use]
    pub fn validate_type_or_model(&self, ty: &TypeSpec, value: &Value) -> Vec<ValidationError> {
        self.current.load().validate_type_or_model(ty, value)
    }

    #[must_use]
    pub fn validate_request(&self, request: &Request) -> Vec<ValidationError> {
        self.current.load().validate_request(request)
    }

    #[must_use]
    pub fn validate_response(&self, response: &Response) -> Vec<ValidationError> {
        self.current.load().validate_response(response)
    }

    /// See [`Validator::merge`].
    pub fn merge(&self, fragment: &Specification) -> Result<Vec<ValidationError>, SpecError> {
        let mut result = Ok(Vec::new());
        self.current.rcu(|current| match current.merged(fragment) {
            Ok((next, conflicts)) => {
                result = Ok(conflicts);
                Arc::new(next)
            }
            Err(e) => {
                result = Err(e);
                Arc::clone(current)
            }
        });
        result
    }
}

impl From<Validator> for SharedValidator {
    fn from(validator: Validator) -> Self {
        Self::new(validator)
    }
}
