//! CLI module
//!
//! Command-line interface for paginating item files and managing sessions.
//!
//! # Commands
//!
//! - `page` - Show one page of a JSON array
//! - `guard` - Check route access for the stored session
//! - `session` - Show, create or remove the stored session

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SessionAction};
pub use runner::Runner;
