//! Page selection over a record collection.
//!
//! # Responsibilities
//! - Parse `page` and `page-size` query parameters
//! - Enforce the maximum page size and the page range
//! - Slice the requested page out of a collection
//!
//! # Design Decisions
//! - Both parameters are checked before any error is returned
//! - A page past the end of an empty collection yields an empty page

use std::borrow::Cow;
use std::ops::Range;

use crate::errors::{ErrorKind, ErrorList};

pub const PAGE: &str = "page";
pub const PAGE_SIZE: &str = "page-size";
pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 1000;

/// Requested page, 1-based. Both values are always positive and the size
/// never exceeds [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(
    value: Option<Cow<'_, str>>,
    default: usize,
    name: &str,
    errors: &mut ErrorList,
) -> usize {
    let Some(value) = value else {
        return default;
    };
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            errors.push(ErrorKind::InvalidField, name);
            default
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Result<Self, ErrorList> {
        let mut errors = ErrorList::default();
        if page == 0 {
            errors.push(ErrorKind::InvalidField, PAGE);
        }
        if page_size == 0 {
            errors.push(ErrorKind::InvalidField, PAGE_SIZE);
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(ErrorList::single(ErrorKind::InvalidPageSize, PAGE_SIZE));
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Read the page parameters from decoded query pairs. Later duplicates win.
    pub fn from_query<'q, I>(pairs: I) -> Result<Self, ErrorList>
    where
        I: IntoIterator<Item = (Cow<'q, str>, Cow<'q, str>)>,
    {
        let (mut page, mut page_size) = (None, None);
        for (key, value) in pairs {
            match key.as_ref() {
                PAGE => page = Some(value),
                PAGE_SIZE => page_size = Some(value),
                _ => {}
            }
        }

        let mut errors = ErrorList::default();
        let page = parse_positive(page, 1, PAGE, &mut errors);
        let page_size = parse_positive(page_size, DEFAULT_PAGE_SIZE, PAGE_SIZE, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Self::new(page, page_size)
    }

    /// Read the page parameters from a raw query string (without `?`).
    pub fn from_query_string(query: &str) -> Result<Self, ErrorList> {
        Self::from_query(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Pages needed for `total_records`; zero for an empty collection.
    pub fn total_pages(&self, total_records: usize) -> usize {
        total_records.div_ceil(self.page_size.max(1))
    }

    /// Reject a page beyond the last one of a non-empty collection.
    pub fn check_range(&self, total_records: usize) -> Result<(), ErrorList> {
        if total_records > 0 && self.page > self.total_pages(total_records) {
            return Err(ErrorList::single(ErrorKind::InvalidPage, PAGE));
        }
        Ok(())
    }

    /// Index range of this page, clipped to the collection.
    pub fn range(&self, total_records: usize) -> Range<usize> {
        let start = self.page.saturating_sub(1).saturating_mul(self.page_size).min(total_records);
        let end = start.saturating_add(self.page_size).min(total_records);
        start..end
    }
}

/// Select the requested page of `records`.
pub fn paginate<T>(records: &[T], request: PageRequest) -> Result<&[T], ErrorList> {
    request.check_range(records.len())?;
    Ok(&records[request.range(records.len())])
}
