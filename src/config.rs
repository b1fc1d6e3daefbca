//! Application configuration
//!
//! Loaded from a YAML file. Every section is optional and falls back to
//! the defaults used by the storefront and admin clients.
//!
//! ```yaml
//! pagination:
//!   items_per_page: 10
//!   window: 5
//! session:
//!   path: .pagekit/session.json
//! routes:
//!   login_path: /login
//!   home_path: /
//!   protected: ["/orders", "/orders/:id", "/security", "/admin/*"]
//!   guest_only: ["/login"]
//! ```

use crate::error::{Error, Result};
use crate::pagination::{PageSize, DEFAULT_ITEMS_PER_PAGE};
use crate::session::RouteGuard;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Page size and pagination controls
    #[serde(default)]
    pub pagination: PaginationSettings,

    /// Where the session record is stored
    #[serde(default)]
    pub session: SessionSettings,

    /// Route protection rules
    #[serde(default)]
    pub routes: RoutesConfig,
}

impl AppConfig {
    /// Build the route guard described by the `routes` section
    pub fn route_guard(&self) -> Result<RouteGuard> {
        RouteGuard::from_config(&self.routes)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        self.pagination.page_size()?;
        if self.pagination.window == 0 {
            return Err(Error::invalid(
                "pagination.window",
                "must be greater than zero",
            ));
        }

        for (field, path) in [
            ("routes.login_path", &self.routes.login_path),
            ("routes.home_path", &self.routes.home_path),
        ] {
            if !path.starts_with('/') {
                return Err(Error::invalid(
                    field,
                    format!("'{path}' must start with '/'"),
                ));
            }
        }

        self.route_guard()?;
        Ok(())
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Pagination defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Items per page (must be > 0, checked by `validate`)
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// Page buttons shown by a pagination control
    #[serde(default = "default_window")]
    pub window: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            window: default_window(),
        }
    }
}

impl PaginationSettings {
    /// Configured page size
    ///
    /// Returns `Error::InvalidConfiguration` when `items_per_page` is zero.
    pub fn page_size(&self) -> Result<PageSize> {
        PageSize::new(self.items_per_page)
    }
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_window() -> usize {
    5
}

// ============================================================================
// Session
// ============================================================================

/// Session storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// JSON file holding the session record
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// ============================================================================
// Routes
// ============================================================================

/// Route protection rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Where signed-out users are sent from protected routes
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Where signed-in users are sent from guest-only routes
    #[serde(default = "default_home_path")]
    pub home_path: String,

    /// Patterns that require a signed-in session
    #[serde(default = "default_protected")]
    pub protected: Vec<String>,

    /// Patterns only shown to signed-out users
    #[serde(default = "default_guest_only")]
    pub guest_only: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            home_path: default_home_path(),
            protected: default_protected(),
            guest_only: default_guest_only(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_home_path() -> String {
    "/".to_string()
}

fn default_protected() -> Vec<String> {
    ["/orders", "/orders/:id", "/security", "/admin/*"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_guest_only() -> Vec<String> {
    vec!["/login".to_string()]
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path.display().to_string())
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    debug!(path = %path.display(), "Loaded config file");
    load_config_from_str(&content)
}

/// Load and validate configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<AppConfig> {
    // An empty document means "all defaults"
    if yaml.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    let config: AppConfig = serde_yaml::from_str(yaml)?;

    config.validate()?;
    Ok(config)
}
