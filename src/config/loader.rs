//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ShellConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable carrying the deployment base prefix.
pub const BASE_URL_VAR: &str = "BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ShellConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ShellConfig, ConfigError> {
    let config: ShellConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load the startup configuration: file (or defaults), then environment.
pub fn load_startup_config(path: Option<&Path>) -> Result<ShellConfig, ConfigError> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => ShellConfig::default(),
    };

    let config = apply_base_override(config, std::env::var(BASE_URL_VAR).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Replace `router.base` with a deployment-provided value.
pub fn apply_base_override(mut config: ShellConfig, base_url: Option<String>) -> ShellConfig {
    if let Some(base) = base_url.filter(|b| !b.trim().is_empty()) {
        tracing::debug!(base = %base, "Router base taken from {}", BASE_URL_VAR);
        config.router.base = base;
    }
    config
}
