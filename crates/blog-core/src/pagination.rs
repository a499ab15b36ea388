//! Page-number pagination.
//!
//! Pages are 1-indexed. A request for page 0 or for a page beyond the last
//! one yields an empty page rather than an error; its totals are still
//! filled in so callers can render navigation back into range.

/// A requested page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// A page size of zero is bumped to one.
    pub fn new(number: u64, per_page: u64) -> Self {
        Self {
            number,
            per_page: per_page.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        self.number.saturating_sub(1) * self.per_page
    }

    pub fn is_within(&self, total_pages: u64) -> bool {
        self.number >= 1 && self.number <= total_pages
    }
}

/// Number of pages needed for `total_items`. An empty result still has one
/// (empty) first page.
pub fn total_pages(total_items: u64, per_page: u64) -> u64 {
    let per_page = per_page.max(1);
    total_items.div_ceil(per_page).max(1)
}

/// One page of results plus the metadata needed for navigation controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            number: request.number,
            per_page: request.per_page,
            total_items,
            total_pages: total_pages(total_items, request.per_page),
        }
    }

    pub fn in_range(&self) -> bool {
        self.number >= 1 && self.number <= self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.in_range() && self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.in_range() && self.number > 1
    }

    pub fn next_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
