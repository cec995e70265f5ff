//! Route records and view component references.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Parameters substituted into (or captured from) dynamic path segments.
pub type RouteParams = BTreeMap<String, String>;

/// Reference to a renderable view.
///
/// The views themselves are external; the router only needs a stable
/// identifier it can hand to the application root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Component(&'static str);

impl Component {
    pub const HOME: Component = Component("Home");
    pub const SPM: Component = Component("SPM");
    pub const FLAREDOWN: Component = Component("Flaredown");
    pub const PING: Component = Component("Ping");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A single entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    path: String,
    name: String,
    component: Component,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>, component: Component) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component,
        }
    }

    /// Path pattern, e.g. `/airport` or `/users/:id`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Unique symbolic name used for reverse lookup.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component(&self) -> Component {
        self.component
    }
}

/// The compiled-in route list of the application.
pub fn builtin_routes() -> Vec<Route> {
    vec![
        Route::new("/", "Home", Component::HOME),
        Route::new("/airport", "SPM", Component::SPM),
        Route::new("/flaredown", "Flaredown", Component::FLAREDOWN),
        Route::new("/ping", "Ping", Component::PING),
    ]
}
