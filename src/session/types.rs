//! Session types
//!
//! `SessionRecord` is what a store persists while a user is signed in.
//! `SessionContext` is the value handed to route guards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted proof of a signed-in session
///
/// The record's presence is what marks a session as authenticated; its
/// contents are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Who signed in, if known
    #[serde(default)]
    pub user: Option<String>,
    /// When the session was created
    pub signed_in_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a record for a user signing in now
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            signed_in_at: Utc::now(),
        }
    }

    /// Create a record without a user name
    pub fn anonymous_user() -> Self {
        Self {
            user: None,
            signed_in_at: Utc::now(),
        }
    }
}

/// Explicit authentication state, passed down to whatever needs it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    authenticated: bool,
    user: Option<String>,
    signed_in_at: Option<DateTime<Utc>>,
}

impl SessionContext {
    /// A signed-out session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in session described by `record`
    pub fn signed_in(record: &SessionRecord) -> Self {
        Self {
            authenticated: true,
            user: record.user.clone(),
            signed_in_at: Some(record.signed_in_at),
        }
    }

    /// Build a context from an optional stored record
    pub fn from_record(record: Option<&SessionRecord>) -> Self {
        record.map_or_else(Self::anonymous, Self::signed_in)
    }

    /// Is the user signed in?
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Signed-in user name, if any
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// When the session started, if signed in
    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }
}
