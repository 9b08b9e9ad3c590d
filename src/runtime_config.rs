//! # Runtime Configuration Module
//!
//! Environment-based configuration for a [`Validator`](crate::validator::Validator).
//!
//! ## Environment Variables
//!
//! ### `SWAGGER_VALIDATOR_IGNORE`
//!
//! `;`-separated regular expressions for live paths that have no declared
//! operation but must not be reported as `operation_missing` (health checks,
//! vendor routes). Each pattern is matched from the start of the path.
//!
//! Default: none
//!
//! ### `SWAGGER_VALIDATOR_COERCE`
//!
//! Whether header, query and path parameter strings are converted to their
//! declared type and checked. `off`, `false`, `no` or `0` disables it, leaving
//! those parameters presence-checked only.
//!
//! Default: on
//!
//! ## Usage
//!
//! ```bash
//! export SWAGGER_VALIDATOR_IGNORE='/health;/_vendor/.*'
//! export SWAGGER_VALIDATOR_COERCE=off
//! ```

use std::env;

const IGNORE_VAR: &str = "SWAGGER_VALIDATOR_IGNORE";
const COERCE_VAR: &str = "SWAGGER_VALIDATOR_COERCE";

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Regexes for paths exempt from `operation_missing`
    pub ignore_endpoints: Vec<String>,
    /// Convert and check header/query/path parameter values (default: true)
    pub coerce_params: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            ignore_endpoints: Vec::new(),
            coerce_params: true,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let ignore_endpoints = var(IGNORE_VAR)
            .map(|val| {
                val.split(';')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let coerce_params = match var(COERCE_VAR) {
            Some(val) => !matches!(
                val.trim().to_ascii_lowercase().as_str(),
                "off" | "false" | "no" | "0"
            ),
            None => true,
        };

        ValidatorConfig {
            ignore_endpoints,
            coerce_params,
        }
    }

    /// Replace the ignored-endpoint patterns.
    #[must_use]
    pub fn with_ignore_endpoints<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_endpoints = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable parameter conversion.
    #[must_use]
    pub fn with_coerce_params(mut self, coerce: bool) -> Self {
        self.coerce_params = coerce;
        self
    }
}
