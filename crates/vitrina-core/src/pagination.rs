//! Pagination types for catalog listings.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 24;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 100;

    /// Creates a new page request, clamping the size into `1..=MAX_SIZE`.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Returns the offset of the first item on this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// The current page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
    /// The total number of items across all pages.
    pub total_elements: u64,
    /// The total number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Slices one page out of an already ordered list.
    #[must_use]
    pub fn slice(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len();
        let content: Vec<T> = items
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        let size = request.size as u64;

        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements: total as u64,
            total_pages: (total as u64).div_ceil(size),
        }
    }

    /// Returns whether there is a following page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        (self.page as u64 + 1) < self.total_pages
    }
}
