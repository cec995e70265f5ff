//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (guard routes exist in the route table)
//! - Validate value ranges and addresses
//! - Detect API prefixes that shadow application routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShellConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ShellConfig;
use crate::routing::RouteTable;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration against the compiled-in route table.
pub fn validate_config(config: &ShellConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let base = &config.router.base;
    if base.contains(&['#', '?'][..]) || base.chars().any(char::is_whitespace) {
        errors.push(ValidationError::new(
            "router.base",
            format!("'{}' must be a plain path prefix", base),
        ));
    }

    let target = &config.mount.target;
    if target.is_empty() {
        errors.push(ValidationError::new("mount.target", "must not be empty"));
    } else if target.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
        errors.push(ValidationError::new(
            "mount.target",
            format!("'{}' is not a valid element id", target),
        ));
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be greater than 0"));
    }

    if config.server.max_body_bytes == 0 {
        errors.push(ValidationError::new("server.max_body_bytes", "must be greater than 0"));
    }

    if config.theme.name.trim().is_empty() {
        errors.push(ValidationError::new("theme.name", "must not be empty"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    match RouteTable::builtin() {
        Ok(table) => {
            validate_api_prefix(config, &table, &mut errors);
            validate_guard(config, &table, &mut errors);
        }
        Err(e) => errors.push(ValidationError::new("routes", e.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_api_prefix(config: &ShellConfig, table: &RouteTable, errors: &mut Vec<ValidationError>) {
    let prefix = &config.server.api_prefix;
    if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
        errors.push(ValidationError::new(
            "server.api_prefix",
            format!("'{}' must look like '/api'", prefix),
        ));
        return;
    }

    if let Some((route, _)) = table.find(prefix) {
        errors.push(ValidationError::new(
            "server.api_prefix",
            format!("'{}' shadows route '{}'", prefix, route.name()),
        ));
    }
}

fn validate_guard(config: &ShellConfig, table: &RouteTable, errors: &mut Vec<ValidationError>) {
    if !config.guard.enabled {
        return;
    }

    for (field, name) in [
        ("guard.login_route", &config.guard.login_route),
        ("guard.landing_route", &config.guard.landing_route),
    ] {
        if !table.contains_name(name) {
            errors.push(ValidationError::new(field, format!("unknown route '{}'", name)));
        }
    }
}
