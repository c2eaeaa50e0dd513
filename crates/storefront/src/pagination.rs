//! Page slicing for the cart and staging views.
//!
//! Pages are 1-based. Slicing never clamps the page number: a page past the
//! end yields an empty slice, and callers derive the valid range from
//! [`page_count`].

use std::num::NonZeroUsize;

/// Items shown per page when not configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(8).expect("8 is non-zero");

/// Items on 1-based `page`: `items[(page - 1) * size .. page * size]`,
/// truncated at the end of the list.
///
/// Page 0 and pages past the end are empty.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size.get()))
    else {
        return &[];
    };
    let end = start.saturating_add(page_size.get()).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Number of pages for `len` items: `ceil(max(1, len) / size)`.
///
/// An empty list still has one (empty) page.
#[must_use]
pub const fn page_count(len: usize, page_size: NonZeroUsize) -> usize {
    let len = if len == 0 { 1 } else { len };
    len.div_ceil(page_size.get())
}

/// Current page of one list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: NonZeroUsize,
}

impl Pager {
    /// A pager positioned on page 1.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self { page: 1, page_size }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Move to `page`. The underlying list is not touched.
    pub const fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Items of the current page.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.page, self.page_size)
    }

    #[must_use]
    pub const fn count(&self, len: usize) -> usize {
        page_count(len, self.page_size)
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
