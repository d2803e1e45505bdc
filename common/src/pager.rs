//! Result paging
//!
//! Pages are 1-based. The page size is clamped to `MIN_PAGE_SIZE..=MAX_PAGE_SIZE`
//! and the current page is always kept within `1..=total_pages`.

use serde::{Deserialize, Serialize};
use std::ops::Range;

pub const MIN_PAGE_SIZE: usize = 5;
pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages for `total` rows. An empty table still has one (empty) page.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    if total == 0 {
        1
    } else {
        (total - 1) / page_size + 1
    }
}

/// Paging state over a table of `total` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pager {
    page: usize,
    page_size: usize,
    total: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Pager {
    pub fn new(total: usize) -> Self {
        Self::with_page_size(total, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(total: usize, page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: clamp_page_size(page_size),
            total,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    /// Point at a new table and go back to page 1. The page size is kept.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.page = 1;
    }

    /// Set the page size (clamped) and pull the current page back into range.
    /// Returns the size actually applied.
    pub fn set_page_size(&mut self, page_size: usize) -> usize {
        self.page_size = clamp_page_size(page_size);
        self.page = self.page.min(self.total_pages());
        self.page_size
    }

    /// Advance one page. No-op on the last page; returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. No-op on page 1; returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped into `1..=total_pages`
    pub fn go_to(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.total_pages());
        self.page
    }

    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    pub fn is_last(&self) -> bool {
        self.page == self.total_pages()
    }

    /// Row indices of the current page: `[(page-1)*size, min(page*size, total))`
    pub fn current_range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (self.page * self.page_size).min(self.total);
        start..end
    }

    /// Current page of `rows`. Bounds are taken from `rows` itself.
    pub fn current_slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let range = self.current_range();
        let end = range.end.min(rows.len());
        let start = range.start.min(end);
        &rows[start..end]
    }

    /// `Strona 2 z 5`
    pub fn page_label(&self) -> String {
        format!("Strona {} z {}", self.page, self.total_pages())
    }

    /// `Wyświetlane rekordy 11-20 z 45`
    pub fn range_label(&self) -> String {
        if self.total == 0 {
            return "Brak rekordów do wyświetlenia".to_string();
        }
        let range = self.current_range();
        format!(
            "Wyświetlane rekordy {}-{} z {}",
            range.start + 1,
            range.end,
            self.total
        )
    }
}

fn clamp_page_size(page_size: usize) -> usize {
    page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}
