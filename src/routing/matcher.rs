//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse route paths into literal and `:param` segments
//! - Match a normalized location key segment by segment
//! - Detect overlapping patterns at table construction
//! - Expand patterns back into paths for reverse lookup
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A dynamic segment matches exactly one non-empty segment
//! - No regex, no wildcards: matching is O(segments)

use thiserror::Error;

use crate::routing::route::RouteParams;

/// Reasons a route path cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("path must start with '/'")]
    MissingLeadingSlash,

    #[error("path contains an empty segment")]
    EmptySegment,

    #[error("dynamic segment has no parameter name")]
    UnnamedParam,

    #[error("parameter '{0}' appears more than once")]
    DuplicateParam(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn is_compatible(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            _ => true,
        }
    }
}

/// A compiled route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a route path such as `/`, `/airport` or `/users/:id`.
    /// A single trailing slash is ignored.
    pub fn parse(path: &str) -> Result<Self, PatternError> {
        let rest = path
            .strip_prefix('/')
            .ok_or(PatternError::MissingLeadingSlash)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        if rest.is_empty() {
            return Ok(Self { segments });
        }

        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(PatternError::EmptySegment);
            }
            let segment = match raw.strip_prefix(':') {
                Some("") => return Err(PatternError::UnnamedParam),
                Some(name) => {
                    let duplicate = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(n) if n == name));
                    if duplicate {
                        return Err(PatternError::DuplicateParam(name.to_string()));
                    }
                    Segment::Param(name.to_string())
                }
                None => Segment::Literal(raw.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Split a normalized match key (leading `/`) into segments.
    pub fn split_key(key: &str) -> Vec<&str> {
        let rest = key.strip_prefix('/').unwrap_or(key);
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        }
    }

    /// Match key segments, returning captured parameters on success.
    pub fn matches(&self, key: &[&str]) -> Option<RouteParams> {
        if key.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, value) in self.segments.iter().zip(key) {
            match segment {
                Segment::Literal(lit) if lit == value => {}
                Segment::Param(name) if !value.is_empty() => {
                    params.insert(name.clone(), (*value).to_string());
                }
                _ => return None,
            }
        }
        Some(params)
    }

    /// True when some key would be matched by both patterns.
    pub fn overlaps(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.is_compatible(b))
    }

    /// Build a path from the pattern.
    ///
    /// Returns the name of the first parameter without a value on failure.
    /// Parameters that the pattern does not mention are ignored.
    pub fn expand(&self, params: &RouteParams) -> Result<String, String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => path.push_str(value),
                    _ => return Err(name.clone()),
                },
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_malformed_paths() {
        assert_eq!(PathPattern::parse("airport"), Err(PatternError::MissingLeadingSlash));
        assert_eq!(PathPattern::parse("/a//b"), Err(PatternError::EmptySegment));
        assert_eq!(PathPattern::parse("/users/:"), Err(PatternError::UnnamedParam));
        assert_eq!(
            PathPattern::parse("/:id/x/:id"),
            Err(PatternError::DuplicateParam("id".into()))
        );
    }

    #[test]
    fn test_literal_match_is_exact() {
        let pattern = PathPattern::parse("/airport").unwrap();
        assert!(pattern.matches(&["airport"]).is_some());
        assert!(pattern.matches(&["Airport"]).is_none()); // Case sensitive
        assert!(pattern.matches(&["airport", "x"]).is_none());
        assert!(pattern.matches(&[]).is_none());
    }

    #[test]
    fn test_root_matches_only_empty_key() {
        let root = PathPattern::parse("/").unwrap();
        assert!(root.matches(&PathPattern::split_key("/")).is_some());
        assert!(root.matches(&PathPattern::split_key("/ping")).is_none());
    }

    #[test]
    fn test_param_capture() {
        let pattern = PathPattern::parse("/datasets/:id/rules").unwrap();
        let params = pattern
            .matches(&PathPattern::split_key("/datasets/42/rules"))
            .unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert!(pattern.matches(&PathPattern::split_key("/datasets//rules")).is_none());
    }

    #[test]
    fn test_overlap_detection() {
        let a = PathPattern::parse("/users/:id").unwrap();
        let b = PathPattern::parse("/users/me").unwrap();
        let c = PathPattern::parse("/groups/me").unwrap();
        let d = PathPattern::parse("/users").unwrap();
        assert!(a.overlaps(&b));
        assert!(!b.overlaps(&c));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_expand() {
        let pattern = PathPattern::parse("/users/:id").unwrap();
        let mut params = RouteParams::new();
        assert_eq!(pattern.expand(&params), Err("id".to_string()));

        params.insert("id".into(), "7".into());
        params.insert("unused".into(), "x".into());
        assert_eq!(pattern.expand(&params).unwrap(), "/users/7");

        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.expand(&params).unwrap(), "/");
    }
}
