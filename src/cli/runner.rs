//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, SessionAction};
use crate::config::{load_config, AppConfig};
use crate::error::{Error, Result, ResultExt};
use crate::pagination::Paginator;
use crate::session::{sign_in, sign_out, FileSessionStore, MemorySessionStore, SessionContext};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its output
    pub fn run(&self) -> Result<()> {
        let output = self.execute()?;
        println!("{output}");
        Ok(())
    }

    /// Run the CLI command and return what it would print
    pub fn execute(&self) -> Result<String> {
        let config = self.load_config()?;
        match &self.cli.command {
            Commands::Page {
                items,
                page,
                per_page,
            } => self.page(&config, items, *page, *per_page),
            Commands::Guard { path } => self.guard(&config, path),
            Commands::Session { action } => self.session(&config, action),
        }
    }

    /// Load config file, or defaults when none is given
    fn load_config(&self) -> Result<AppConfig> {
        match &self.cli.config {
            Some(path) => load_config(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    /// Session file from the command line, then from the config
    fn session_store(&self, config: &AppConfig) -> Option<FileSessionStore> {
        self.cli
            .session
            .as_ref()
            .or(config.session.path.as_ref())
            .map(FileSessionStore::new)
    }

    fn require_session_store(&self, config: &AppConfig) -> Result<FileSessionStore> {
        self.session_store(config).ok_or_else(|| {
            Error::config("Session file not specified (use --session or session.path in config)")
        })
    }

    /// Render a value in the selected output format
    fn render(&self, value: &Value, pretty: String) -> Result<String> {
        match self.cli.format {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::Pretty => Ok(pretty),
        }
    }

    // ========================================================================
    // page
    // ========================================================================

    fn page(
        &self,
        config: &AppConfig,
        items_path: &Path,
        page: Option<usize>,
        per_page: Option<usize>,
    ) -> Result<String> {
        let content = fs::read_to_string(items_path).with_context(|| {
            format!("Failed to read items file '{}'", items_path.display())
        })?;
        let items: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Items file '{}' must contain a JSON array: {e}",
                items_path.display()
            ))
        })?;

        let per_page = per_page.unwrap_or(config.pagination.items_per_page);
        let mut pager = Paginator::configure(&items, per_page)?;

        if let Some(requested) = page {
            pager.go_to_page(requested);
            if pager.current_page() != requested {
                warn!(
                    requested,
                    total_pages = pager.total_pages(),
                    "Page out of range, showing page {}",
                    pager.current_page()
                );
            }
        }

        let window = pager.page_window(config.pagination.window);
        let mut value = serde_json::to_value(pager.page())?;
        if let Value::Object(map) = &mut value {
            map.insert("window".to_string(), json!(window));
        }

        let mut lines = vec![pager.page_info().to_string()];
        lines.extend(pager.current_items().iter().map(|item| format!("  {item}")));
        if !window.is_empty() {
            let buttons: Vec<String> = window
                .iter()
                .map(|&n| {
                    if n == pager.current_page() {
                        format!("[{n}]")
                    } else {
                        n.to_string()
                    }
                })
                .collect();
            lines.push(format!("pages: {}", buttons.join(" ")));
        }

        self.render(&value, lines.join("\n"))
    }

    // ========================================================================
    // guard
    // ========================================================================

    fn guard(&self, config: &AppConfig, path: &str) -> Result<String> {
        let guard = config.route_guard()?;
        let session = match self.session_store(config) {
            Some(store) => SessionContext::from_store(&store)?,
            None => SessionContext::from_store(&MemorySessionStore::new())?,
        };

        let access = guard.access_for(path);
        let decision = guard.check(&session, path);

        let value = json!({
            "path": path,
            "access": access,
            "authenticated": session.is_authenticated(),
            "result": decision,
        });
        self.render(&value, format!("{path}: {decision}"))
    }

    // ========================================================================
    // session
    // ========================================================================

    fn session(&self, config: &AppConfig, action: &SessionAction) -> Result<String> {
        let store = self.require_session_store(config)?;

        let session = match action {
            SessionAction::Status => SessionContext::from_store(&store)?,
            SessionAction::Login { user } => sign_in(&store, user.as_str())?,
            SessionAction::Logout => {
                sign_out(&store)?;
                SessionContext::anonymous()
            }
        };

        let pretty = match (session.is_authenticated(), session.user()) {
            (false, _) => "signed out".to_string(),
            (true, Some(user)) => format!("signed in as {user}"),
            (true, None) => "signed in".to_string(),
        };
        self.render(&serde_json::to_value(&session)?, pretty)
    }
}
