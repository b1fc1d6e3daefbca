// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! # pagekit
//!
//! Client-side pagination and session-aware route guarding for
//! list-heavy frontends such as order tracking pages and admin tables.
//!
//! ## Features
//!
//! - **Pagination**: Slice any borrowed list into pages with next/previous/jump
//!   navigation; out-of-range requests are ignored, never errors
//! - **Explicit sessions**: Signed-in state is a value loaded from a store and
//!   passed down, not a global flag
//! - **Route guard**: Pure `(session, path) -> allow | redirect` decisions
//! - **YAML config**: Page size, page window, session file and route rules
//!
//! ## Quick Start
//!
//! ```rust
//! use pagekit::pagination::Paginator;
//! use pagekit::session::{MemorySessionStore, RouteGuard, SessionContext};
//!
//! # fn main() -> pagekit::Result<()> {
//! let orders: Vec<u32> = (1..=25).collect();
//! let mut pager = Paginator::configure(&orders, 10)?;
//! pager.go_to_page(2);
//! assert_eq!(pager.current_items().first(), Some(&11));
//!
//! let guard = RouteGuard::new("/login", "/").protect("/orders/:id")?;
//! let session = SessionContext::from_store(&MemorySessionStore::new())?;
//! assert!(!guard.check(&session, "/orders/42").is_allowed());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                            CLI                               │
//! │        page            guard             session             │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────────┬─────────────┴───────────┬────────────────────┐
//! │  Pagination   │        Session          │      Config        │
//! ├───────────────┼─────────────────────────┼────────────────────┤
//! │ Paginator     │ SessionStore (mem/file) │ YAML               │
//! │ PageInfo      │ SessionContext          │ defaults           │
//! │ page window   │ RouteGuard              │ validation         │
//! └───────────────┴─────────────────────────┴────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client-side pagination
pub mod pagination;

/// Session state and route guarding
pub mod session;

/// YAML configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use config::{load_config, load_config_from_str, AppConfig};
pub use pagination::{PageInfo, PageSize, Paginator};
pub use session::{GuardDecision, RouteGuard, SessionContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
