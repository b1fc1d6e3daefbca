//! Pagination module
//!
//! Splits an in-memory collection into fixed-size pages.
//!
//! # Overview
//!
//! A [`Paginator`] borrows the collection and owns only the current page
//! number. Page boundaries, the current slice, and the next/previous flags
//! are recomputed from the collection on every call, so new data for the
//! same list can be swapped in with [`Paginator::set_items`] without losing
//! the reader's place.
//!
//! ```
//! use pagekit::pagination::Paginator;
//!
//! let orders: Vec<u32> = (1..=25).collect();
//! let mut pager = Paginator::configure(&orders, 10).unwrap();
//!
//! pager.next_page();
//! pager.next_page();
//! assert_eq!(pager.current_page(), 3);
//! assert_eq!(pager.current_items(), &[21, 22, 23, 24, 25]);
//! assert!(!pager.has_next_page());
//! ```

mod engine;
mod types;

pub use engine::Paginator;
pub use types::{Page, PageInfo, PageSize, DEFAULT_ITEMS_PER_PAGE};
