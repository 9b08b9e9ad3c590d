use super::Specification;
use crate::validator::{ErrorCode, ValidationError};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Outcome of merging a fragment into a specification
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The merged specification (a new value; the inputs are untouched)
    pub spec: Specification,
    /// One conflict record per rejected model or endpoint
    pub conflicts: Vec<ValidationError>,
    /// Number of models and endpoints taken from the fragment
    pub applied: usize,
}

impl MergeOutcome {
    /// Whether the merged specification differs from the base.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

impl Specification {
    /// Combine `fragment` into a copy of this specification.
    ///
    /// A model declared on both sides is kept silently when both definitions
    /// are identical, otherwise it is reported as `merge_model_conflict` and
    /// the existing definition stays. An endpoint whose path is already
    /// declared is reported as `merge_apis_conflict` and skipped. Everything
    /// else in the fragment is added; conflicts never abort the merge.
    #[must_use]
    pub fn merged(&self, fragment: &Specification) -> MergeOutcome {
        let mut spec = self.clone();
        let mut conflicts = Vec::new();
        let mut applied = 0;

        for (name, model) in &fragment.models {
            match spec.models.get(name) {
                Some(existing) if existing == model => {
                    debug!(model = %name, "Identical model re-declared");
                }
                Some(_) => {
                    warn!(model = %name, "Model conflicts with existing definition");
                    conflicts.push(ValidationError::new(
                        ErrorCode::MergeModelConflict,
                        [name.as_str()],
                    ));
                }
                None => {
                    spec.models.insert(name.clone(), model.clone());
                    applied += 1;
                }
            }
        }

        let mut declared: HashSet<String> = spec.apis.iter().map(|e| e.path.clone()).collect();
        for endpoint in &fragment.apis {
            if declared.contains(&endpoint.path) {
                warn!(path = %endpoint.path, "Endpoint path already declared");
                conflicts.push(ValidationError::new(
                    ErrorCode::MergeApisConflict,
                    [endpoint.path.as_str()],
                ));
                continue;
            }
            declared.insert(endpoint.path.clone());
            spec.apis.push(endpoint.clone());
            applied += 1;
        }

        MergeOutcome {
            spec,
            conflicts,
            applied,
        }
    }
}
