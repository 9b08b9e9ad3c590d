use super::error::ValidationError;
use super::types;
use crate::router::{LookupResult, OperationLookup};
use crate::runtime_config::ValidatorConfig;
use crate::spec::{SpecError, Specification, TypeSpec};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Validates values, requests and responses against one specification
///
/// The operation table is compiled when the validator is built and rebuilt
/// by [`merge`](Validator::merge); validation calls never modify the
/// specification or their input.
#[derive(Debug, Clone)]
pub struct Validator {
    pub(super) spec: Arc<Specification>,
    pub(super) lookup: OperationLookup,
    pub(super) config: ValidatorConfig,
}

impl Validator {
    /// Build a validator with the given ignored-endpoint patterns and
    /// default settings otherwise.
    pub fn new<I, S>(spec: Specification, ignore_endpoints: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(
            spec,
            ValidatorConfig::default().with_ignore_endpoints(ignore_endpoints),
        )
    }

    pub fn with_config(spec: Specification, config: ValidatorConfig) -> Result<Self, SpecError> {
        let lookup = OperationLookup::new(&spec.apis, &config.ignore_endpoints)?;
        info!(
            endpoints = spec.apis.len(),
            models = spec.models.len(),
            coerce_params = config.coerce_params,
            "Validator ready"
        );
        Ok(Self {
            spec: Arc::new(spec),
            lookup,
            config,
        })
    }

    #[must_use]
    pub fn specification(&self) -> &Specification {
        &self.spec
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Resolve a method and path against the current operation table.
    #[must_use]
    pub fn lookup(&self, method: &str, path: &str) -> LookupResult {
        self.lookup.lookup(method, path)
    }

    /// See [`types::validate_type`]; `None` means `ty` names a model.
    #[must_use]
    pub fn validate_type(&self, ty: &TypeSpec, value: &Value) -> Option<Vec<ValidationError>> {
        types::validate_type(&self.spec, ty, value)
    }

    #[must_use]
    pub fn validate_model(&self, model_name: &str, instance: &Value) -> Vec<ValidationError> {
        types::validate_model(&self.spec, model_name, instance)
    }

    #[must_use]
    pub fn validate_type_or_model(&self, ty: &TypeSpec, value: &Value) -> Vec<ValidationError> {
        types::validate_type_or_model(&self.spec, ty, value)
    }

    /// Merge a specification fragment into this validator.
    ///
    /// Returns the conflicts found (see [`Specification::merged`]). Entries
    /// that do not conflict are applied regardless. If the rebuilt operation
    /// table does not compile, the validator is left as it was.
    pub fn merge(&mut self, fragment: &Specification) -> Result<Vec<ValidationError>, SpecError> {
        let (next, conflicts) = self.merged(fragment)?;
        *self = next;
        Ok(conflicts)
    }

    /// Copy-on-write form of [`merge`](Validator::merge).
    pub fn merged(
        &self,
        fragment: &Specification,
    ) -> Result<(Validator, Vec<ValidationError>), SpecError> {
        let outcome = self.spec.merged(fragment);
        if !outcome.changed() {
            return Ok((self.clone(), outcome.conflicts));
        }

        let lookup = OperationLookup::new(&outcome.spec.apis, &self.config.ignore_endpoints)?;
        info!(
            applied = outcome.applied,
            conflicts = outcome.conflicts.len(),
            routes_count = lookup.route_count(),
            "Specification merged"
        );

        let next = Validator {
            spec: Arc::new(outcome.spec),
            lookup,
            config: self.config.clone(),
        };
        Ok((next, outcome.conflicts))
    }
}
