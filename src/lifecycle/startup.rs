//! Startup orchestration.
//!
//! # Responsibilities
//! - Apply the development diagnostics flag
//! - Construct the router from configuration and the route table
//! - Construct the theme provider and the application root
//! - Mount the root onto the host element
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, no retries
//! - Steps run in order, never concurrently
//! - Single-shot by ownership: `run` consumes the bootstrapper

use thiserror::Error;

use crate::app::{AppRoot, Document, MountError, StylesheetTheme, ThemeProvider};
use crate::config::schema::ShellConfig;
use crate::routing::{AuthGuard, RouteTable, RouteTableError, Router};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table rejected: {0}")]
    Routes(#[from] RouteTableError),

    #[error("guard route '{0}' is not in the route table")]
    UnknownGuardRoute(String),

    #[error("mount target '#{0}' is missing from the host document")]
    MountTargetMissing(String),

    #[error(transparent)]
    Mount(MountError),
}

impl From<MountError> for StartupError {
    fn from(e: MountError) -> Self {
        match e {
            MountError::TargetMissing(target) => StartupError::MountTargetMissing(target),
            other => StartupError::Mount(other),
        }
    }
}

/// One-shot startup sequence producing a mounted [`AppRoot`].
pub struct Bootstrapper {
    config: ShellConfig,
    routes: Option<RouteTable>,
    theme: Option<Box<dyn ThemeProvider>>,
}

impl Bootstrapper {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            routes: None,
            theme: None,
        }
    }

    /// Use `routes` instead of the compiled-in table.
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Use `theme` instead of the configured stylesheet theme.
    pub fn with_theme(mut self, theme: Box<dyn ThemeProvider>) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Build the application root and mount it onto `document`.
    pub fn run(self, document: Document) -> Result<AppRoot, StartupError> {
        let Self {
            config,
            routes,
            theme,
        } = self;

        // 1. Development diagnostics
        let production_tip = config.observability.production_tip;
        if production_tip {
            tracing::warn!("Development diagnostics enabled; disable production_tip for deployments");
        }

        // 2. Router
        let table = match routes {
            Some(table) => table,
            None => RouteTable::builtin()?,
        };
        let router = Router::new(&config.router, table);
        tracing::info!(
            mode = ?router.mode(),
            base = %router.base(),
            routes = router.table().len(),
            "Router constructed"
        );

        let guard = AuthGuard::from_config(&config.guard);
        if let Some(guard) = &guard {
            for name in [guard.login_route(), guard.landing_route()] {
                if !router.table().contains_name(name) {
                    return Err(StartupError::UnknownGuardRoute(name.to_string()));
                }
            }
        }

        // 3. Theme/plugin provider
        let theme: Box<dyn ThemeProvider> = match theme {
            Some(theme) => theme,
            None => Box::new(StylesheetTheme::from_config(&config.theme)),
        };

        // 4. Application root
        let mut root = AppRoot::new(router, theme).with_guard(guard);
        root.set_production_tip(production_tip);

        // 5. Mount
        root.mount(document, &config.mount.target)?;

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Component, Route};

    #[test]
    fn test_bootstrap_mounts_root() {
        let root = Bootstrapper::new(ShellConfig::default())
            .run(Document::builtin())
            .unwrap();
        assert!(root.is_mounted());
        assert_eq!(root.mount_target(), Some("app"));
        assert_eq!(root.router().table().len(), 4);
        assert!(root.guard().is_none());
    }

    #[test]
    fn test_missing_mount_target() {
        let mut config = ShellConfig::default();
        config.mount.target = "root".into();
        let err = Bootstrapper::new(config).run(Document::builtin()).unwrap_err();
        assert!(matches!(err, StartupError::MountTargetMissing(ref t) if t == "root"));
    }

    #[test]
    fn test_custom_table_rejects_unknown_guard_route() {
        let mut config = ShellConfig::default();
        config.guard.enabled = true;
        let table = RouteTable::new(vec![Route::new("/airport", "SPM", Component::SPM)]).unwrap();

        let err = Bootstrapper::new(config)
            .with_routes(table)
            .run(Document::builtin())
            .unwrap_err();
        assert!(matches!(err, StartupError::UnknownGuardRoute(ref n) if n == "Login"));
    }

    #[test]
    fn test_custom_theme_is_injected() {
        let theme = StylesheetTheme::new("contrast", Vec::new(), true);
        let root = Bootstrapper::new(ShellConfig::default())
            .with_theme(Box::new(theme))
            .run(Document::builtin())
            .unwrap();
        assert_eq!(root.theme().name(), "contrast");
    }
}
