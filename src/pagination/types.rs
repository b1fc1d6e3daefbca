//! Pagination types
//!
//! Defines the page size newtype and the serializable page summaries
//! handed to a rendering layer.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Default number of items per page
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Number of items on one page
///
/// Always non-zero. A zero page size is rejected at construction rather
/// than coerced, so the page count can never be unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Create a page size, rejecting zero
    pub fn new(items_per_page: usize) -> Result<Self> {
        NonZeroUsize::new(items_per_page).map(Self).ok_or_else(|| {
            Error::invalid("items_per_page", "must be greater than zero, got 0")
        })
    }

    /// Get the page size as a plain integer
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_ITEMS_PER_PAGE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary of the current page, derived from a paginator at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Current page (1-based)
    pub page: usize,
    /// Items per page
    pub per_page: usize,
    /// Length of the full collection
    pub total_items: usize,
    /// Number of pages (0 for an empty collection)
    pub total_pages: usize,
    /// Index of the first item on this page, clamped to the collection
    pub start_index: usize,
    /// One past the last item on this page, clamped to the collection
    pub end_index: usize,
    /// Is there a page after this one?
    pub has_next_page: bool,
    /// Is there a page before this one?
    pub has_previous_page: bool,
}

impl PageInfo {
    /// Number of items on this page
    ///
    /// Zero if the indices are out of order, which only a hand-built or
    /// deserialized summary can have.
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// Check if this page shows no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_pages == 0 {
            return write!(f, "no items");
        }
        if self.is_empty() {
            return write!(
                f,
                "page {} of {} (no items on this page)",
                self.page, self.total_pages
            );
        }
        write!(
            f,
            "page {} of {} (items {}-{} of {})",
            self.page,
            self.total_pages,
            self.start_index + 1,
            self.end_index,
            self.total_items
        )
    }
}

/// The current page's items together with its summary
#[derive(Debug, Serialize)]
pub struct Page<'a, T> {
    /// Page summary
    #[serde(flatten)]
    pub info: PageInfo,
    /// Items on this page, borrowed from the paginated collection
    pub items: &'a [T],
}
