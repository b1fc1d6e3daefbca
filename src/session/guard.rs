//! Route guard
//!
//! Decides whether a path may be shown for a given session. The decision
//! is a pure function of the `SessionContext` and the requested path; the
//! guard never reads storage itself.

use super::types::SessionContext;
use crate::config::RoutesConfig;
use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Regex for valid `:param` names in route patterns
static PARAM_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Who may visit a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Anyone
    Public,
    /// Signed-in users only
    Protected,
    /// Signed-out users only (e.g. the login page)
    GuestOnly,
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Render the requested path
    Allow,
    /// Navigate elsewhere instead
    Redirect {
        /// Where to go
        to: String,
        /// The path that was refused, for returning after sign-in
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
    },
}

impl GuardDecision {
    /// Check if the path may be rendered
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Redirect target, if this is a redirect
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Redirect { to, .. } => Some(to),
        }
    }
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Redirect { to, from: Some(from) } => {
                write!(f, "redirect to {to} (from {from})")
            }
            Self::Redirect { to, from: None } => write!(f, "redirect to {to}"),
        }
    }
}

// ============================================================================
// Route Patterns
// ============================================================================

/// Canonical form of a request path
///
/// Query and fragment are stripped. Empty and `.` segments are dropped and
/// `..` removes the segment before it, so `//orders`, `orders`, `/./orders`
/// and `/orders/` all become `/orders`.
fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}

/// A path pattern such as `/orders`, `/orders/:id` or `/admin/*`
///
/// `:name` matches exactly one segment. A trailing `/*` matches the prefix
/// itself and everything below it.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    regex: Regex,
}

impl RoutePattern {
    /// Compile a route pattern
    pub fn parse(pattern: &str) -> Result<Self> {
        if !pattern.starts_with('/') {
            return Err(Error::invalid(
                "routes",
                format!("pattern '{pattern}' must start with '/'"),
            ));
        }

        let normalized = normalize_path(pattern);
        let (base, wildcard) = match normalized.strip_suffix("/*") {
            Some(base) => (base, true),
            None => (normalized.as_str(), false),
        };

        let mut source = String::from("^");
        for segment in base.split('/').skip(1) {
            source.push('/');
            if let Some(name) = segment.strip_prefix(':') {
                if !PARAM_NAME_REGEX.is_match(name) {
                    return Err(Error::invalid(
                        "routes",
                        format!("pattern '{pattern}' has an invalid parameter name ':{name}'"),
                    ));
                }
                source.push_str("[^/]+");
            } else {
                source.push_str(&regex::escape(segment));
            }
        }
        if wildcard {
            source.push_str("(?:/.*)?");
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| {
            Error::invalid("routes", format!("pattern '{pattern}' failed to compile: {e}"))
        })?;

        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check if `path` matches once normalized
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(&normalize_path(path))
    }
}

// ============================================================================
// Route Guard
// ============================================================================

/// A pattern with its access level
#[derive(Debug, Clone)]
pub struct RouteRule {
    /// Paths this rule covers
    pub pattern: RoutePattern,
    /// Who may visit them
    pub access: Access,
}

/// Maps `(session, path)` to allow or redirect
///
/// Rules are checked in insertion order and the first match wins.
/// Paths no rule matches are public.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
    home_path: String,
    rules: Vec<RouteRule>,
}

impl RouteGuard {
    /// Create a guard with no rules
    pub fn new(login_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            home_path: home_path.into(),
            rules: Vec::new(),
        }
    }

    /// Build a guard from the routes section of the config
    ///
    /// Guest-only patterns are registered before protected ones, so a login
    /// page may live under a protected prefix. Fails if the login page itself
    /// would require signing in, or if the home page turns signed-in users
    /// away. Either one makes the redirects loop.
    pub fn from_config(config: &RoutesConfig) -> Result<Self> {
        let mut guard = Self::new(&config.login_path, &config.home_path);
        for pattern in &config.guest_only {
            guard = guard.guest_only(pattern)?;
        }
        for pattern in &config.protected {
            guard = guard.protect(pattern)?;
        }

        if guard.access_for(&guard.login_path) == Access::Protected {
            return Err(Error::invalid(
                "routes.login_path",
                format!(
                    "'{}' is covered by a protected route and could never be reached",
                    guard.login_path
                ),
            ));
        }
        if guard.access_for(&guard.home_path) == Access::GuestOnly {
            return Err(Error::invalid(
                "routes.home_path",
                format!(
                    "'{}' is covered by a guest-only route and would redirect to itself",
                    guard.home_path
                ),
            ));
        }
        Ok(guard)
    }

    /// Add a rule
    pub fn rule(mut self, pattern: &str, access: Access) -> Result<Self> {
        self.rules.push(RouteRule {
            pattern: RoutePattern::parse(pattern)?,
            access,
        });
        Ok(self)
    }

    /// Require sign-in for paths matching `pattern`
    pub fn protect(self, pattern: &str) -> Result<Self> {
        self.rule(pattern, Access::Protected)
    }

    /// Only allow signed-out users on paths matching `pattern`
    pub fn guest_only(self, pattern: &str) -> Result<Self> {
        self.rule(pattern, Access::GuestOnly)
    }

    /// Where unauthenticated users are sent
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Where authenticated users are sent away from guest-only pages
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// Registered rules, in match order
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Access level of `path` (first matching rule, else public)
    pub fn access_for(&self, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map_or(Access::Public, |rule| rule.access)
    }

    /// Decide whether `session` may view `path`
    pub fn check(&self, session: &SessionContext, path: &str) -> GuardDecision {
        let access = self.access_for(path);
        let decision = match access {
            Access::Protected if !session.is_authenticated() => GuardDecision::Redirect {
                to: self.login_path.clone(),
                from: Some(path.to_string()),
            },
            Access::GuestOnly if session.is_authenticated() => GuardDecision::Redirect {
                to: self.home_path.clone(),
                from: None,
            },
            _ => GuardDecision::Allow,
        };

        debug!(
            path,
            ?access,
            authenticated = session.is_authenticated(),
            %decision,
            "Route guard decision"
        );
        decision
    }
}
