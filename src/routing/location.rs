//! Location parsing and match-key extraction.
//!
//! # Responsibilities
//! - Parse whatever the host hands over (absolute URL, path, `#fragment`)
//! - Normalize the deployment base prefix
//! - Turn a location into the key the route table matches on
//!
//! # Design Decisions
//! - History mode keys on the pathname with the base stripped
//! - Hash mode keys on the fragment; the base only addresses the document
//! - Query strings never take part in matching
//! - Base stripping only happens on a segment boundary
//! - Paths are matched as given, without URL normalization

use serde::{Deserialize, Serialize};
use url::Url;

/// Navigation addressing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Full pathname, relies on the browser history API.
    #[default]
    History,
    /// Portion of the URL after `#`.
    Hash,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "history" => Ok(Mode::History),
            "hash" => Ok(Mode::Hash),
            other => Err(format!("unknown router mode '{}'", other)),
        }
    }
}

/// Normalize a base prefix: leading `/`, no trailing `/`, `/` becomes empty.
///
/// Absolute URLs (`https://cdn.example/app/`) contribute their path only.
pub fn normalize_base(raw: &str) -> String {
    let raw = raw.trim();
    let path = match Url::parse(raw) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => raw.to_string(),
    };

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// A parsed host location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pathname: String,
    fragment: Option<String>,
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        // Only absolute URLs go through the URL parser, and only to find
        // where the authority ends. Everything else is split as given.
        match Url::parse(raw) {
            Ok(url) if url.has_host() => {
                let after_scheme = raw.split_once(':').map(|(_, rest)| rest).unwrap_or_default();
                let authority = after_scheme.trim_start_matches(&['/', '\\'][..]);
                let path_at = authority
                    .find(&['/', '\\', '?', '#'][..])
                    .unwrap_or(authority.len());
                Self::split_raw(&authority[path_at..])
            }
            _ => Self::split_raw(raw),
        }
    }

    fn split_raw(raw: &str) -> Self {
        let (before_hash, fragment) = match raw.split_once('#') {
            Some((before, after)) => (before, Some(after.to_string())),
            None => (raw, None),
        };
        let pathname = before_hash.split('?').next().unwrap_or_default();
        Self {
            pathname: ensure_leading_slash(pathname),
            fragment,
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Key the route table is matched against, or `None` when the
    /// location lies outside the application's base.
    pub fn match_key(&self, mode: Mode, base: &str) -> Option<String> {
        match mode {
            Mode::History => strip_base(&self.pathname, base).map(ensure_leading_slash),
            Mode::Hash => {
                let fragment = self.fragment.as_deref().unwrap_or_default();
                let path = fragment.split('?').next().unwrap_or_default();
                Some(ensure_leading_slash(path))
            }
        }
    }
}

/// Strip a normalized base from a pathname on a segment boundary.
pub fn strip_base<'a>(pathname: &'a str, base: &str) -> Option<&'a str> {
    if base.is_empty() {
        return Some(pathname);
    }
    match pathname.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
