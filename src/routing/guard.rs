//! Pre-navigation authentication guard.
//!
//! # Responsibilities
//! - Decide whether a navigation to a named route may be committed
//! - Send anonymous visitors to the login route
//! - Send signed-in visitors away from the login route
//!
//! # Design Decisions
//! - Opt-in: disabled unless configured
//! - Pure decision function; the host owns the session state

use crate::config::schema::GuardConfig;

/// Result of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo(String),
}

#[derive(Debug, Clone)]
pub struct AuthGuard {
    login_route: String,
    landing_route: String,
}

impl AuthGuard {
    pub fn new(login_route: impl Into<String>, landing_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
            landing_route: landing_route.into(),
        }
    }

    /// Build the guard if it is enabled.
    pub fn from_config(config: &GuardConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(&config.login_route, &config.landing_route))
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    /// Check a navigation to `target` (the route name, `None` when the
    /// location did not resolve).
    pub fn check(&self, target: Option<&str>, is_authenticated: bool) -> GuardDecision {
        let to_login = target == Some(self.login_route.as_str());

        if !to_login && !is_authenticated {
            GuardDecision::RedirectTo(self.login_route.clone())
        } else if to_login && is_authenticated {
            GuardDecision::RedirectTo(self.landing_route.clone())
        } else {
            GuardDecision::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_decisions() {
        let guard = AuthGuard::new("Login", "SPM");

        assert_eq!(guard.check(Some("Ping"), false), GuardDecision::RedirectTo("Login".into()));
        assert_eq!(guard.check(None, false), GuardDecision::RedirectTo("Login".into()));
        assert_eq!(guard.check(Some("Login"), false), GuardDecision::Allow);
        assert_eq!(guard.check(Some("Login"), true), GuardDecision::RedirectTo("SPM".into()));
        assert_eq!(guard.check(Some("Flaredown"), true), GuardDecision::Allow);
    }

    #[test]
    fn test_disabled_by_default() {
        assert!(AuthGuard::from_config(&GuardConfig::default()).is_none());

        let config = GuardConfig {
            enabled: true,
            ..GuardConfig::default()
        };
        let guard = AuthGuard::from_config(&config).unwrap();
        assert_eq!(guard.login_route(), "Login");
        assert_eq!(guard.landing_route(), "SPM");
    }
}
