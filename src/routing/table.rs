//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Compile the static route list into patterns
//! - Enforce unique names and non-overlapping paths
//! - Forward lookup by location key, reverse lookup by name
//!
//! # Design Decisions
//! - Construction fails on the first invariant violation
//! - Immutable after construction (shareable without locks)
//! - O(n) scan in table order; route counts are small

use thiserror::Error;

use crate::routing::matcher::{PathPattern, PatternError};
use crate::routing::route::{builtin_routes, Route, RouteParams};

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route at '{path}' has an empty name")]
    EmptyName { path: String },

    #[error("route name '{name}' is used more than once")]
    DuplicateName { name: String },

    #[error("route path '{path}' overlaps with '{existing}'")]
    OverlappingPath { path: String, existing: String },

    #[error("invalid route path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: PatternError,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    route: Route,
    pattern: PathPattern,
}

/// Ordered, validated list of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<Entry>,
}

impl RouteTable {
    /// Build a table, preserving the given order.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, RouteTableError> {
        let mut entries: Vec<Entry> = Vec::new();

        for route in routes {
            if route.name().is_empty() {
                return Err(RouteTableError::EmptyName {
                    path: route.path().to_string(),
                });
            }

            let pattern =
                PathPattern::parse(route.path()).map_err(|source| RouteTableError::InvalidPath {
                    path: route.path().to_string(),
                    source,
                })?;

            if entries.iter().any(|e| e.route.name() == route.name()) {
                return Err(RouteTableError::DuplicateName {
                    name: route.name().to_string(),
                });
            }

            if let Some(existing) = entries.iter().find(|e| e.pattern.overlaps(&pattern)) {
                return Err(RouteTableError::OverlappingPath {
                    path: route.path().to_string(),
                    existing: existing.route.path().to_string(),
                });
            }

            entries.push(Entry { route, pattern });
        }

        Ok(Self { entries })
    }

    /// The compiled-in application table.
    pub fn builtin() -> Result<Self, RouteTableError> {
        Self::new(builtin_routes())
    }

    /// First route whose pattern matches the normalized key.
    pub fn find(&self, key: &str) -> Option<(&Route, RouteParams)> {
        let segments = PathPattern::split_key(key);
        self.entries
            .iter()
            .find_map(|e| e.pattern.matches(&segments).map(|params| (&e.route, params)))
    }

    /// Route and compiled pattern carrying `name`.
    pub fn by_name(&self, name: &str) -> Option<(&Route, &PathPattern)> {
        self.entries
            .iter()
            .find(|e| e.route.name() == name)
            .map(|e| (&e.route, &e.pattern))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.entries.iter().map(|e| &e.route)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::route::Component;

    #[test]
    fn test_builtin_table_is_valid() {
        let table = RouteTable::builtin().unwrap();
        assert_eq!(table.len(), 4);
        let names: Vec<_> = table.iter().map(Route::name).collect();
        assert_eq!(names, ["Home", "SPM", "Flaredown", "Ping"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = RouteTable::new(vec![
            Route::new("/airport", "SPM", Component::SPM),
            Route::new("/airport-v2", "SPM", Component::SPM),
        ])
        .unwrap_err();
        assert_eq!(err, RouteTableError::DuplicateName { name: "SPM".into() });
    }

    #[test]
    fn test_overlapping_paths_rejected() {
        let err = RouteTable::new(vec![
            Route::new("/ping", "Ping", Component::PING),
            Route::new("/ping/", "PingAgain", Component::PING),
        ])
        .unwrap_err();
        assert!(matches!(err, RouteTableError::OverlappingPath { .. }));

        let err = RouteTable::new(vec![
            Route::new("/users/:id", "User", Component::new("User")),
            Route::new("/users/me", "Me", Component::new("Me")),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteTableError::OverlappingPath {
                path: "/users/me".into(),
                existing: "/users/:id".into(),
            }
        );
    }

    #[test]
    fn test_invalid_path_and_empty_name() {
        let err = RouteTable::new(vec![Route::new("ping", "Ping", Component::PING)]).unwrap_err();
        assert!(matches!(err, RouteTableError::InvalidPath { .. }));

        let err = RouteTable::new(vec![Route::new("/ping", "", Component::PING)]).unwrap_err();
        assert_eq!(err, RouteTableError::EmptyName { path: "/ping".into() });
    }

    #[test]
    fn test_find_in_table_order() {
        let table = RouteTable::builtin().unwrap();
        let (route, params) = table.find("/flaredown").unwrap();
        assert_eq!(route.name(), "Flaredown");
        assert!(params.is_empty());
        assert!(table.find("/nonexistent").is_none());
    }
}
