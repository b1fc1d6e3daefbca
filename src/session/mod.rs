//! Session module
//!
//! Authentication state and route protection.
//!
//! # Overview
//!
//! The session module provides:
//! - `SessionStore` - Where the signed-in record lives (memory or JSON file)
//! - `SessionContext` - Explicit signed-in state, derived from a store
//! - `RouteGuard` - Pure `(SessionContext, path) -> GuardDecision` check
//!
//! Nothing here is global: callers load a `SessionContext` once and pass
//! it to the guard for every navigation.

mod guard;
mod store;
mod types;

pub use guard::{Access, GuardDecision, RouteGuard, RoutePattern, RouteRule};
pub use store::{sign_in, sign_out, FileSessionStore, MemorySessionStore, SessionStore};
pub use types::{SessionContext, SessionRecord};

#[cfg(test)]
mod tests;
