//! Client-side pagination over in-memory lists.
//!
//! # Invariants
//! - Page size is never zero.
//! - `page_count(n) == ceil(n / page_size)`; an empty list has zero pages.
//! - Pages are 1-based; every page but the last holds exactly `page_size`
//!   items, and concatenating all pages reproduces the input.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default rows per page for administrative lists.
pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    ZeroPageSize,
}

impl Display for PaginationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroPageSize => write!(f, "page size must be > 0"),
        }
    }
}

impl Error for PaginationError {}

/// Current page and page size for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self {
            page_size,
            current_page: 1,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        self.page_size = page_size;
        self.current_page = 1;
        Ok(())
    }

    /// Moves to `page`, clamped into `1..=page_count(total_items)`.
    pub fn go_to(&mut self, page: usize, total_items: usize) -> usize {
        let last = self.page_count(total_items).max(1);
        self.current_page = page.clamp(1, last);
        self.current_page
    }

    /// Items of the current page; empty when the page is past the end.
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        self.page_at(items, self.current_page)
    }

    /// Items of an arbitrary 1-based page.
    pub fn page_at<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Iterates every page in order.
    pub fn pages<'a, T>(&self, items: &'a [T]) -> std::slice::Chunks<'a, T> {
        items.chunks(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::{PaginationError, Paginator, DEFAULT_PAGE_SIZE};

    #[test]
    fn default_page_size_is_fifteen() {
        assert_eq!(Paginator::default().page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(DEFAULT_PAGE_SIZE, 15);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(Paginator::new(0), Err(PaginationError::ZeroPageSize));
        let mut paginator = Paginator::default();
        assert_eq!(
            paginator.set_page_size(0),
            Err(PaginationError::ZeroPageSize)
        );
        assert_eq!(paginator.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn go_to_clamps_into_range() {
        let mut paginator = Paginator::new(10).unwrap();
        assert_eq!(paginator.go_to(9, 25), 3);
        assert_eq!(paginator.go_to(0, 25), 1);
        assert_eq!(paginator.go_to(2, 0), 1);
    }
}
