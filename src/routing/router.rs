//! Route lookup and reverse lookup.
//!
//! # Responsibilities
//! - Hold the configured mode, base and compiled route table
//! - Resolve a host location to exactly one route or NotFound
//! - Build paths and hrefs from a route name plus parameters
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Resolution is pure: no navigation state is kept here
//! - Explicit NotFound rather than silent default
//! - Only reverse lookup can fail

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::location::{normalize_base, strip_base, Location, Mode};
use crate::routing::route::{Route, RouteParams};
use crate::routing::table::{RouteTable, RouteTableError};

/// Errors returned by reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("no route is named '{0}'")]
    UnknownRouteName(String),

    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    /// Values captured from dynamic segments.
    pub params: RouteParams,
    /// The normalized key that was matched.
    pub key: String,
}

/// Outcome of resolving a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Matched(RouteMatch<'a>),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn route(&self) -> Option<&'a Route> {
        match self {
            Resolution::Matched(m) => Some(m.route),
            Resolution::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }
}

/// Client-side router over an immutable route table.
#[derive(Debug, Clone)]
pub struct Router {
    mode: Mode,
    base: String,
    table: RouteTable,
}

impl Router {
    pub fn new(config: &RouterConfig, table: RouteTable) -> Self {
        Self {
            mode: config.mode,
            base: normalize_base(&config.base),
            table,
        }
    }

    /// Router over the compiled-in application routes.
    pub fn with_builtin_routes(config: &RouterConfig) -> Result<Self, RouteTableError> {
        Ok(Self::new(config, RouteTable::builtin()?))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Normalized base prefix (empty when served from the root).
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve a host location (URL, path or `#fragment`).
    pub fn resolve(&self, location: &str) -> Resolution<'_> {
        let parsed = Location::parse(location);
        match parsed.match_key(self.mode, &self.base) {
            Some(key) => self.resolve_key(&key),
            None => {
                tracing::trace!(location = %location, base = %self.base, "Location outside base");
                Resolution::NotFound
            }
        }
    }

    /// Resolve an already normalized key such as `/airport`.
    pub fn resolve_key(&self, key: &str) -> Resolution<'_> {
        match self.table.find(key) {
            Some((route, params)) => {
                tracing::trace!(key = %key, route = %route.name(), "Route matched");
                Resolution::Matched(RouteMatch {
                    route,
                    params,
                    key: key.to_string(),
                })
            }
            None => Resolution::NotFound,
        }
    }

    /// Path of the route called `name`, with parameters substituted.
    ///
    /// The result is base-free, e.g. `navigate_by_name("SPM", ..)` gives
    /// `/airport`.
    pub fn navigate_by_name(&self, name: &str, params: &RouteParams) -> Result<String, RouterError> {
        let (route, pattern) = self
            .table
            .by_name(name)
            .ok_or_else(|| RouterError::UnknownRouteName(name.to_string()))?;

        pattern.expand(params).map_err(|param| RouterError::MissingParam {
            route: route.name().to_string(),
            param,
        })
    }

    /// Href the host document should link to for the route called `name`.
    pub fn href_for(&self, name: &str, params: &RouteParams) -> Result<String, RouterError> {
        let path = self.navigate_by_name(name, params)?;
        Ok(match self.mode {
            Mode::History => format!("{}{}", self.base, path),
            Mode::Hash => format!("{}/#{}", self.base, path),
        })
    }

    /// Path of `pathname` relative to the base, if the document lives there.
    pub fn document_path<'p>(&self, pathname: &'p str) -> Option<&'p str> {
        strip_base(pathname, &self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(mode: Mode, base: &str) -> Router {
        let config = RouterConfig {
            mode,
            base: base.to_string(),
        };
        Router::with_builtin_routes(&config).unwrap()
    }

    #[test]
    fn test_resolve_builtin_paths() {
        let r = router(Mode::History, "/");
        for (path, name) in [("/", "Home"), ("/airport", "SPM"), ("/flaredown", "Flaredown"), ("/ping", "Ping")] {
            let route = r.resolve(path).route().unwrap();
            assert_eq!(route.name(), name);
            assert_eq!(route.path(), path);
        }
        assert!(r.resolve("/nonexistent").is_not_found());
    }

    #[test]
    fn test_resolve_ignores_query_and_trailing_slash() {
        let r = router(Mode::History, "/");
        assert_eq!(r.resolve("/ping?verbose=1").route().map(Route::name), Some("Ping"));
        assert_eq!(r.resolve("/airport/").route().map(Route::name), Some("SPM"));
    }

    #[test]
    fn test_resolve_with_base() {
        let r = router(Mode::History, "/viz/");
        assert_eq!(r.base(), "/viz");
        assert_eq!(r.resolve("/viz/flaredown").route().map(Route::name), Some("Flaredown"));
        assert_eq!(r.resolve("/viz").route().map(Route::name), Some("Home"));
        assert!(r.resolve("/flaredown").is_not_found());
    }

    #[test]
    fn test_hash_mode_matches_history_mode() {
        let history = router(Mode::History, "/");
        let hash = router(Mode::Hash, "/");
        assert_eq!(hash.resolve("#/ping"), history.resolve("/ping"));
        assert_eq!(hash.resolve("/#/airport").route().map(Route::name), Some("SPM"));
    }

    #[test]
    fn test_navigate_by_name() {
        let r = router(Mode::History, "/");
        let params = RouteParams::new();
        assert_eq!(r.navigate_by_name("SPM", &params).unwrap(), "/airport");
        assert_eq!(r.navigate_by_name("Flaredown", &params).unwrap(), "/flaredown");
        assert_eq!(
            r.navigate_by_name("DoesNotExist", &params),
            Err(RouterError::UnknownRouteName("DoesNotExist".into()))
        );
    }

    #[test]
    fn test_href_for_modes() {
        let params = RouteParams::new();
        assert_eq!(router(Mode::History, "/viz").href_for("Ping", &params).unwrap(), "/viz/ping");
        assert_eq!(router(Mode::Hash, "/viz").href_for("Ping", &params).unwrap(), "/viz/#/ping");
        assert_eq!(router(Mode::Hash, "/").href_for("Home", &params).unwrap(), "/#/");
    }
}
