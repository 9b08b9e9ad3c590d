//! Structured logging setup
//!
//! The library only emits `tracing` events. Embedding services usually
//! install their own subscriber; [`init_logging`] is a convenience for those
//! that do not.
//!
//! - `RUST_LOG` - filter directives (default: `info`)
//! - `SWAGGER_VALIDATOR_LOG_FORMAT` - `json` (default) or `pretty`

use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json, // Default to JSON
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            filter: "info".to_string(),
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            format: env::var("SWAGGER_VALIDATOR_LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.format),
            filter: env::var("RUST_LOG").unwrap_or(defaults.filter),
        }
    }
}

/// Install a global fmt subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already installed, in
/// which case nothing changes.
pub fn init_logging(config: &LogConfig) -> Result<bool> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter '{}'", config.filter))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
    };

    Ok(installed.is_ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Json);
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LogConfig {
            format: LogFormat::Pretty,
            filter: "swagger_validator=debug".to_string(),
        };
        init_logging(&config).unwrap();
        assert!(!init_logging(&config).unwrap());
    }

    #[test]
    fn test_bad_filter_is_an_error() {
        let config = LogConfig {
            format: LogFormat::Json,
            filter: "swagger_validator=loud".to_string(),
        };
        assert!(init_logging(&config).is_err());
    }
}
