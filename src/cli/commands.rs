//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginate item lists and check route access from the command line
#[derive(Parser, Debug)]
#[command(name = "pagekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Session file (JSON), overrides `session.path` from the config
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of a JSON array
    Page {
        /// File containing a JSON array of items
        #[arg(long)]
        items: PathBuf,

        /// Page to show (1-based); out-of-range pages are ignored
        #[arg(short, long)]
        page: Option<usize>,

        /// Items per page, overrides `pagination.items_per_page`
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Check whether the current session may visit a path
    Guard {
        /// Requested path, e.g. /orders/42
        path: String,
    },

    /// Inspect or change the stored session
    Session {
        /// What to do with the session
        #[command(subcommand)]
        action: SessionAction,
    },
}

/// Session subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionAction {
    /// Show whether a session is stored
    Status,

    /// Store a signed-in session
    Login {
        /// User name to record
        user: String,
    },

    /// Remove the stored session
    Logout,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
