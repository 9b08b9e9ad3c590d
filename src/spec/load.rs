use super::{SpecError, Specification};
use anyhow::Context;
use std::path::Path;
use tracing::info;

/// Parse a specification from JSON text.
pub fn from_json_str(content: &str) -> Result<Specification, SpecError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| SpecError::InvalidDocument {
            reason: e.to_string(),
        })?;
    Specification::from_value(value)
}

/// Parse a specification from YAML text.
pub fn from_yaml_str(content: &str) -> Result<Specification, SpecError> {
    let value: serde_json::Value =
        serde_yaml::from_str(content).map_err(|e| SpecError::InvalidDocument {
            reason: e.to_string(),
        })?;
    Specification::from_value(value)
}

/// Load a specification file, choosing the parser by extension
/// (`.yaml`/`.yml` for YAML, anything else as JSON).
pub fn load_spec(file_path: impl AsRef<Path>) -> anyhow::Result<Specification> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("reading specification {}", file_path.display()))?;

    let is_yaml = file_path
        .extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false);

    let spec = if is_yaml {
        from_yaml_str(&content)
    } else {
        from_json_str(&content)
    }
    .with_context(|| format!("parsing specification {}", file_path.display()))?;

    info!(
        path = %file_path.display(),
        endpoints = spec.apis.len(),
        models = spec.models.len(),
        "Specification loaded"
    );

    Ok(spec)
}
