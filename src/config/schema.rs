//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shell.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::Mode;

/// Root configuration for the application shell.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShellConfig {
    /// Client-side router settings.
    pub router: RouterConfig,

    /// Host element the application root mounts onto.
    pub mount: MountConfig,

    /// Shell HTTP server settings.
    pub server: ServerConfig,

    /// Theme/plugin provider settings.
    pub theme: ThemeConfig,

    /// Pre-navigation authentication guard.
    pub guard: GuardConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Navigation mode (`history` or `hash`).
    pub mode: Mode,

    /// Deployment path prefix. Overridden by `BASE_URL`.
    pub base: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            mode: Mode::History,
            base: "/".to_string(),
        }
    }
}

/// Mount target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MountConfig {
    /// `id` of the host element.
    pub target: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            target: "app".to_string(),
        }
    }
}

/// Shell server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Host document to serve. The built-in page is used when unset.
    pub index_path: Option<String>,

    /// Prefix for the JSON endpoints (`/ping`, `/routes`).
    pub api_prefix: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            index_path: None,
            api_prefix: "/api".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Theme provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme identifier, exposed on the root element.
    pub name: String,

    /// Stylesheets linked into the host document head.
    pub stylesheets: Vec<String>,

    /// Dark variant.
    pub dark: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "material".to_string(),
            stylesheets: vec!["/css/bootstrap.css".to_string()],
            dark: false,
        }
    }
}

/// Authentication guard configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GuardConfig {
    pub enabled: bool,

    /// Route anonymous visitors are sent to.
    pub login_route: String,

    /// Route signed-in visitors are sent to when they open the login route.
    pub landing_route: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            login_route: "Login".to_string(),
            landing_route: "SPM".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Development-mode diagnostics. Startup turns these off.
    pub production_tip: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            production_tip: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
