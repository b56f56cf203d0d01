//! Paginator.

use std::ops::Range;

use crate::error::ConfigError;

/// Slices an ordered sequence into fixed-size, 1-based pages.
///
/// The page size is validated once here, so slicing itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Creates a paginator; a page size of zero is rejected.
    pub fn new(page_size: usize) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize(page_size));
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `max(1, ceil(len / page_size))`.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Clamp a requested page into `1..=total_pages(len)`.
    pub fn clamp(&self, page: usize, len: usize) -> usize {
        page.clamp(1, self.total_pages(len))
    }

    /// The index range of the (clamped) page within a sequence of `len` items.
    pub fn range(&self, page: usize, len: usize) -> Range<usize> {
        let page = self.clamp(page, len);
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(len);
        start.min(len)..end
    }

    /// Slice `items` at `page`, clamping out-of-range pages.
    pub fn apply<'a, T>(&self, items: &'a [T], page: usize) -> PageSlice<'a, T> {
        let len = items.len();
        let page = self.clamp(page, len);
        let range = self.range(page, len);
        PageSlice {
            items: &items[range.clone()],
            page,
            total_pages: self.total_pages(len),
            total_count: len,
            range,
        }
    }
}

/// One page of an ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a, T> {
    items: &'a [T],
    page: usize,
    total_pages: usize,
    total_count: usize,
    range: Range<usize>,
}

impl<'a, T> PageSlice<'a, T> {
    /// Returns the items on this page.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Returns the 1-based page number actually served.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns the length of the whole sequence.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns where this page sits in the whole sequence.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(matches!(
            Paginator::new(0),
            Err(ConfigError::InvalidPageSize(0))
        ));
    }

    #[test]
    fn test_total_pages() {
        let pager = Paginator::new(2).unwrap();
        assert_eq!(pager.total_pages(0), 1);
        assert_eq!(pager.total_pages(2), 1);
        assert_eq!(pager.total_pages(3), 2);
    }

    #[test]
    fn test_empty_sequence_serves_page_one() {
        let pager = Paginator::new(5).unwrap();
        let empty: [u8; 0] = [];
        let slice = pager.apply(&empty, 4);
        assert_eq!(slice.page(), 1);
        assert_eq!(slice.total_pages(), 1);
        assert!(slice.is_empty());
        assert!(!slice.has_next());
        assert!(!slice.has_prev());
    }

    #[test]
    fn test_last_page_is_partial() {
        let pager = Paginator::new(2).unwrap();
        let items = ["Cy", "Bo", "Amy"];
        let slice = pager.apply(&items, 2);
        assert_eq!(slice.items(), &["Amy"]);
        assert_eq!(slice.range(), 2..3);
        assert!(slice.has_prev());
    }

    #[test]
    fn test_out_of_range_page_clamped() {
        let pager = Paginator::new(2).unwrap();
        let items = [1, 2, 3];
        let slice = pager.apply(&items, 9);
        assert_eq!(slice.page(), 2);
        assert_eq!(slice.items(), &[3]);
        assert_eq!(pager.apply(&items, 0).page(), 1);
    }
}
