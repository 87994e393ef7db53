//! Offset pagination
//!
//! A page is the slice `[index * size, index * size + size)` of the server's ordered
//! result set. Whether a next page exists is decided from the server's total count.

use serde::{Deserialize, Serialize};

use super::number::GeneratedNumber;

/// Position of the table within the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub index: usize,
    pub size: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self { index: 0, size: 10 }
    }
}

impl PageCursor {
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }

    /// Offset of the first row, used as the `offset` query parameter
    pub fn offset(&self) -> usize {
        self.index.saturating_mul(self.size)
    }

    pub fn limit(&self) -> usize {
        self.size
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.offset().saturating_add(self.size) < total
    }

    pub fn previous(&self) -> Option<Self> {
        self.has_previous().then(|| Self::new(self.index - 1, self.size))
    }

    pub fn next(&self, total: usize) -> Option<Self> {
        self.has_next(total)
            .then(|| Self::new(self.index + 1, self.size))
    }

    pub fn first(&self) -> Option<Self> {
        self.has_previous().then(|| Self::new(0, self.size))
    }

    pub fn last(&self, total: usize) -> Option<Self> {
        let last = last_page_index(total, self.size);
        (self.index != last).then(|| Self::new(last, self.size))
    }

    /// Switch to another page size while keeping the first visible row on screen
    pub fn resized(&self, new_size: usize) -> Self {
        if new_size == 0 {
            return Self::new(0, 0);
        }
        Self::new(self.offset() / new_size, new_size)
    }

    /// Number of rows the server is expected to return for this page
    pub fn expected_rows(&self, total: usize) -> usize {
        expected_row_count(total, self.index, self.size)
    }
}

/// `min(size, total - index * size)`, or 0 when the page starts past the end
pub fn expected_row_count(total: usize, index: usize, size: usize) -> usize {
    let start = index.saturating_mul(size);
    total.saturating_sub(start).min(size)
}

pub fn last_page_index(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size).saturating_sub(1)
}

/// Human-readable range such as `11 – 20 of 25`
pub fn range_label(total: usize, index: usize, size: usize) -> String {
    if total == 0 || size == 0 {
        return format!("0 of {total}");
    }
    let start = index.saturating_mul(size);
    let end = if start < total {
        (start + size).min(total)
    } else {
        start + size
    };
    format!("{} – {end} of {total}", start + 1)
}

/// One page of results as shown by the table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<GeneratedNumber>,
    pub total_count: usize,
    pub cursor: PageCursor,
}

impl Page {
    pub fn new(items: Vec<GeneratedNumber>, total_count: usize, cursor: PageCursor) -> Self {
        Self {
            items,
            total_count,
            cursor,
        }
    }

    /// Rows to display, never more than one page worth even if the server over-delivers
    pub fn rows(&self) -> &[GeneratedNumber] {
        let n = self.items.len().min(self.cursor.size);
        &self.items[..n]
    }

    pub fn has_next(&self) -> bool {
        self.cursor.has_next(self.total_count)
    }

    pub fn has_previous(&self) -> bool {
        self.cursor.has_previous()
    }

    pub fn range_label(&self) -> String {
        range_label(self.total_count, self.cursor.index, self.cursor.size)
    }
}
