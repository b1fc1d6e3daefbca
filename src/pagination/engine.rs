//! Client-side paginator
//!
//! Slices a borrowed collection into pages. The paginator owns only the
//! page size and the current page number; everything else is recomputed
//! from the borrowed items on every call.

use super::types::{Page, PageInfo, PageSize};
use crate::error::Result;
use std::ops::Range;
use tracing::trace;

/// Paginates a borrowed slice
///
/// Navigation requests outside `1..=total_pages` are ignored, never errors.
///
/// When [`set_items`](Self::set_items) supplies a shorter collection, the
/// current page is kept as-is even if it no longer exists. The current page
/// then shows no items until the caller invokes
/// [`reset_page`](Self::reset_page) or [`go_to_page`](Self::go_to_page).
#[derive(Debug)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: PageSize,
    current_page: usize,
}

// Manual impls: the paginator only holds `&[T]`, so no `T: Clone` bound is needed.
impl<T> Clone for Paginator<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Paginator<'_, T> {}

impl<'a, T> Paginator<'a, T> {
    /// Create a paginator on page 1
    pub fn new(items: &'a [T], page_size: PageSize) -> Self {
        Self {
            items,
            page_size,
            current_page: 1,
        }
    }

    /// Create a paginator from a raw page size
    ///
    /// Returns `Error::InvalidConfiguration` when `items_per_page` is zero.
    pub fn configure(items: &'a [T], items_per_page: usize) -> Result<Self> {
        Ok(Self::new(items, PageSize::new(items_per_page)?))
    }

    /// Create a paginator with the default page size of 10
    pub fn with_default_size(items: &'a [T]) -> Self {
        Self::new(items, PageSize::default())
    }

    /// Replace the collection, keeping the current page
    pub fn set_items(&mut self, items: &'a [T]) {
        self.items = items;
    }

    /// The full collection being paginated
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Items per page
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Current page (1-based)
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages, 0 for an empty collection
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size.get())
    }

    /// Index of the first item on the current page (may exceed the collection)
    pub fn start_index(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.page_size.get())
    }

    /// One past the last index of the current page (may exceed the collection)
    pub fn end_index(&self) -> usize {
        self.start_index().saturating_add(self.page_size.get())
    }

    /// Range of the current page's items, clamped to the collection
    pub fn item_range(&self) -> Range<usize> {
        let len = self.items.len();
        self.start_index().min(len)..self.end_index().min(len)
    }

    /// Items on the current page
    pub fn current_items(&self) -> &'a [T] {
        &self.items[self.item_range()]
    }

    /// Is there a page after the current one?
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Is there a page before the current one?
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Jump to `page` if it is within `1..=total_pages`
    pub fn go_to_page(&mut self, page: usize) {
        let total_pages = self.total_pages();
        if (1..=total_pages).contains(&page) {
            self.current_page = page;
        } else {
            trace!(page, total_pages, "Ignoring out-of-range page request");
        }
    }

    /// Advance one page if there is a next page
    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.current_page += 1;
        } else {
            trace!(page = self.current_page, "Already on the last page");
        }
    }

    /// Go back one page if there is a previous page
    pub fn previous_page(&mut self) {
        if self.has_previous_page() {
            self.current_page -= 1;
        } else {
            trace!(page = self.current_page, "Already on the first page");
        }
    }

    /// Return to page 1
    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Summary of the current page
    pub fn page_info(&self) -> PageInfo {
        let range = self.item_range();
        PageInfo {
            page: self.current_page,
            per_page: self.page_size.get(),
            total_items: self.items.len(),
            total_pages: self.total_pages(),
            start_index: range.start,
            end_index: range.end,
            has_next_page: self.has_next_page(),
            has_previous_page: self.has_previous_page(),
        }
    }

    /// Snapshot of the current page's items and summary
    pub fn page(&self) -> Page<'a, T> {
        Page {
            info: self.page_info(),
            items: self.current_items(),
        }
    }

    /// Page numbers a pagination control should show
    ///
    /// Returns at most `max_buttons` consecutive page numbers, centred on
    /// the current page and shifted to stay inside `1..=total_pages`.
    pub fn page_window(&self, max_buttons: usize) -> Vec<usize> {
        let total_pages = self.total_pages();
        if total_pages == 0 || max_buttons == 0 {
            return Vec::new();
        }

        let span = max_buttons.min(total_pages);
        let mut first = self.current_page.saturating_sub(span / 2).max(1);
        if first + span - 1 > total_pages {
            first = total_pages - span + 1;
        }
        (first..first + span).collect()
    }
}
