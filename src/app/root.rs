//! Application root.
//!
//! Owns the router, the theme provider and (once mounted) the host
//! document. Everything after mounting is read-only, so a mounted root can
//! be shared across server tasks behind an `Arc`.

use askama::Template;
use thiserror::Error;
use uuid::Uuid;

use crate::app::document::Document;
use crate::app::theme::ThemeProvider;
use crate::observability::metrics;
use crate::routing::{AuthGuard, GuardDecision, Resolution, RouteMatch, RouteParams, Router, RouterError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("mount target '#{0}' not found in host document")]
    TargetMissing(String),

    #[error("application root is already mounted on '#{0}'")]
    AlreadyMounted(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("application root is not mounted")]
    NotMounted,

    #[error("template failed to render: {0}")]
    Template(String),
}

impl From<askama::Error> for RenderError {
    fn from(e: askama::Error) -> Self {
        RenderError::Template(e.to_string())
    }
}

/// Root container for a matched route.
#[derive(Template)]
#[template(path = "shell/root.html")]
struct RootView<'a> {
    dev_instance: Option<Uuid>,
    classes: &'a str,
    route: &'a str,
    view: &'a str,
    path: &'a str,
}

/// Fallback container when nothing matched.
#[derive(Template)]
#[template(path = "shell/not_found.html")]
struct NotFoundView<'a> {
    dev_instance: Option<Uuid>,
    classes: &'a str,
    location: &'a str,
}

#[derive(Debug)]
struct MountPoint {
    target: String,
    document: Document,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<'a> {
    /// Commit the navigation and render the matched route.
    Render(RouteMatch<'a>),
    /// The guard sent the visitor elsewhere.
    Redirect { route: String, href: String },
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Found,
    NotFound,
}

/// A host document with the root rendered into it.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub status: PageStatus,
    /// Name of the rendered route.
    pub route: Option<String>,
    pub html: String,
}

#[derive(Debug)]
pub struct AppRoot {
    instance_id: Uuid,
    router: Router,
    theme: Box<dyn ThemeProvider>,
    guard: Option<AuthGuard>,
    production_tip: bool,
    mount: Option<MountPoint>,
}

impl AppRoot {
    pub fn new(router: Router, theme: Box<dyn ThemeProvider>) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            router,
            theme,
            guard: None,
            production_tip: false,
            mount: None,
        }
    }

    pub fn with_guard(mut self, guard: Option<AuthGuard>) -> Self {
        self.guard = guard;
        self
    }

    /// Toggle development-mode diagnostics in rendered pages.
    pub fn set_production_tip(&mut self, enabled: bool) {
        self.production_tip = enabled;
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn theme(&self) -> &dyn ThemeProvider {
        self.theme.as_ref()
    }

    pub fn guard(&self) -> Option<&AuthGuard> {
        self.guard.as_ref()
    }

    pub fn mount_target(&self) -> Option<&str> {
        self.mount.as_ref().map(|m| m.target.as_str())
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Attach the root to element `target` of `document`.
    ///
    /// One-shot: a mounted root cannot be moved to another element.
    pub fn mount(&mut self, document: Document, target: &str) -> Result<(), MountError> {
        if let Some(existing) = &self.mount {
            return Err(MountError::AlreadyMounted(existing.target.clone()));
        }
        if !document.has_element(target) {
            return Err(MountError::TargetMissing(target.to_string()));
        }

        tracing::info!(
            instance_id = %self.instance_id,
            target = %target,
            theme = %self.theme.name(),
            "Application root mounted"
        );
        self.mount = Some(MountPoint {
            target: target.to_string(),
            document,
        });
        Ok(())
    }

    /// Resolve `location` and run the guard, if any, before committing.
    pub fn navigate(&self, location: &str, is_authenticated: bool) -> Result<Navigation<'_>, RouterError> {
        let resolution = self.router.resolve(location);

        if let Some(guard) = &self.guard {
            let target = resolution.route().map(|r| r.name());
            if let GuardDecision::RedirectTo(route) = guard.check(target, is_authenticated) {
                let href = self.router.href_for(&route, &RouteParams::new())?;
                tracing::debug!(location = %location, redirect = %route, "Navigation redirected by guard");
                return Ok(Navigation::Redirect { route, href });
            }
        }

        Ok(match resolution {
            Resolution::Matched(m) => Navigation::Render(m),
            Resolution::NotFound => Navigation::NotFound,
        })
    }

    /// Render the host document for `location`.
    pub fn render(&self, location: &str) -> Result<RenderedPage, RenderError> {
        let mount = self.mount.as_ref().ok_or(RenderError::NotMounted)?;
        let resolution = self.router.resolve(location);
        self.render_resolution(mount, location, &resolution)
    }

    /// Render the not-found fallback regardless of `location`.
    pub fn render_not_found(&self, location: &str) -> Result<RenderedPage, RenderError> {
        let mount = self.mount.as_ref().ok_or(RenderError::NotMounted)?;
        self.render_resolution(mount, location, &Resolution::NotFound)
    }

    fn render_resolution(
        &self,
        mount: &MountPoint,
        location: &str,
        resolution: &Resolution<'_>,
    ) -> Result<RenderedPage, RenderError> {
        let classes = self.theme.root_classes().join(" ");
        let dev_instance = self.production_tip.then_some(self.instance_id);

        let (status, route, content) = match resolution {
            Resolution::Matched(m) => {
                metrics::record_resolution(m.route.name());
                let view = RootView {
                    dev_instance,
                    classes: &classes,
                    route: m.route.name(),
                    view: m.route.component().name(),
                    path: &m.key,
                };
                (PageStatus::Found, Some(m.route.name().to_string()), view.render()?)
            }
            Resolution::NotFound => {
                metrics::record_not_found();
                tracing::debug!(location = %location, "No route matched");
                let view = NotFoundView {
                    dev_instance,
                    classes: &classes,
                    location,
                };
                (PageStatus::NotFound, None, view.render()?)
            }
        };

        let head = self.theme.head_markup()?;
        let html = mount
            .document
            .render_into(&mount.target, &content, &head)
            .ok_or(RenderError::NotMounted)?;

        Ok(RenderedPage { status, route, html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::theme::StylesheetTheme;
    use crate::config::schema::{RouterConfig, ThemeConfig};
    use crate::routing::{Component, Route, RouteTable};

    fn root() -> AppRoot {
        let router = Router::with_builtin_routes(&RouterConfig::default()).unwrap();
        AppRoot::new(router, Box::new(StylesheetTheme::from_config(&ThemeConfig::default())))
    }

    #[test]
    fn test_mount_requires_target() {
        let mut app = root();
        let err = app.mount(Document::new("<body></body>"), "app").unwrap_err();
        assert_eq!(err, MountError::TargetMissing("app".into()));
        assert!(!app.is_mounted());

        app.mount(Document::builtin(), "app").unwrap();
        assert_eq!(app.mount_target(), Some("app"));
        assert_eq!(
            app.mount(Document::builtin(), "app"),
            Err(MountError::AlreadyMounted("app".into()))
        );
    }

    #[test]
    fn test_render_requires_mount() {
        assert_eq!(root().render("/").unwrap_err(), RenderError::NotMounted);
    }

    #[test]
    fn test_render_found_and_not_found() {
        let mut app = root();
        app.mount(Document::builtin(), "app").unwrap();

        let page = app.render("/airport").unwrap();
        assert_eq!(page.status, PageStatus::Found);
        assert_eq!(page.route.as_deref(), Some("SPM"));
        assert!(page.html.contains("data-view=\"SPM\""));
        assert!(page.html.contains("href=\"/css/bootstrap.css\""));
        assert!(!page.html.contains("development build"));

        let page = app.render("/nope").unwrap();
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.route.is_none());
        assert!(page.html.contains("data-view=\"NotFound\""));
    }

    #[test]
    fn test_fallback_escapes_location() {
        let mut app = root();
        app.mount(Document::builtin(), "app").unwrap();

        let page = app.render("/<img src=x onerror=alert(1)>").unwrap();
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(!page.html.contains("<img"));
        assert!(page.html.contains("Nothing lives at /&lt;img"));
    }

    #[test]
    fn test_production_tip_banner() {
        let mut app = root();
        app.set_production_tip(true);
        app.mount(Document::builtin(), "app").unwrap();
        assert!(app.render("/").unwrap().html.contains("development build"));
    }

    #[test]
    fn test_navigate_with_guard() {
        let table = RouteTable::new(vec![
            Route::new("/", "Home", Component::HOME),
            Route::new("/airport", "SPM", Component::SPM),
            Route::new("/login", "Login", Component::new("Login")),
        ])
        .unwrap();
        let router = Router::new(&RouterConfig::default(), table);
        let app = AppRoot::new(router, Box::new(StylesheetTheme::new("plain", Vec::new(), false)))
            .with_guard(Some(AuthGuard::new("Login", "SPM")));

        assert_eq!(
            app.navigate("/airport", false).unwrap(),
            Navigation::Redirect { route: "Login".into(), href: "/login".into() }
        );
        assert_eq!(
            app.navigate("/login", true).unwrap(),
            Navigation::Redirect { route: "SPM".into(), href: "/airport".into() }
        );
        match app.navigate("/airport", true).unwrap() {
            Navigation::Render(m) => assert_eq!(m.route.name(), "SPM"),
            other => panic!("unexpected navigation: {:?}", other),
        }
    }

    #[test]
    fn test_navigate_without_guard() {
        let app = root();
        assert_eq!(app.navigate("/missing", false).unwrap(), Navigation::NotFound);
        assert!(matches!(app.navigate("/ping", false).unwrap(), Navigation::Render(_)));
    }
}
