use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Number of pages for `total` rows; an empty set still has one page.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    /// The stored page index, clamped to the last page that has rows.
    pub fn clamped_index(&self, total: usize) -> usize {
        self.page_index.min(self.page_count(total) - 1)
    }

    pub fn clamped(&self, total: usize) -> Self {
        Self {
            page_index: self.clamped_index(total),
            page_size: self.page_size.max(1),
        }
    }

    /// Positions within the filtered, sorted rows that make up the current page.
    pub fn window(&self, total: usize) -> Range<usize> {
        let size = self.page_size.max(1);
        let start = (self.clamped_index(total) * size).min(total);
        let end = (start + size).min(total);
        start..end
    }

    pub fn can_previous(&self, total: usize) -> bool {
        self.clamped_index(total) > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.clamped_index(total) + 1 < self.page_count(total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}

