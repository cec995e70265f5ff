//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or defaults
//!     → loader.rs (parse & deserialize, BASE_URL override)
//!     → validation.rs (semantic checks)
//!     → ShellConfig (validated, immutable)
//!     → handed to the bootstrapper once
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never revalidated
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    GuardConfig, LogFormat, MountConfig, ObservabilityConfig, RouterConfig, ServerConfig,
    ShellConfig, ThemeConfig,
};
pub use validation::{validate_config, ValidationError};
