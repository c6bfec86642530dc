//! Client-side paging over an already sorted row sequence.

use std::ops::Range;

/// A window of `size` rows starting at page `index` (zero based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub size: usize,
}

impl Page {
    /// A page of at least one row.
    pub fn new(index: usize, size: usize) -> Self {
        Self {
            index,
            size: size.max(1),
        }
    }

    /// Number of pages needed for `total` rows. Always at least one, so an
    /// empty table still has a (blank) first page.
    pub fn count(size: usize, total: usize) -> usize {
        total.div_ceil(size.max(1)).max(1)
    }

    /// This page, moved back onto the last page if it lies beyond `total`.
    pub fn clamped(self, total: usize) -> Page {
        let last = Self::count(self.size, total) - 1;
        Page::new(self.index.min(last), self.size)
    }

    /// Row range covered by this page for `total` rows.
    pub fn range(&self, total: usize) -> Range<usize> {
        let page = self.clamped(total);
        let start = (page.index * page.size).min(total);
        let end = (start + page.size).min(total);
        start..end
    }
}
