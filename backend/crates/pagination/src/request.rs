//! Client-supplied paging parameters.

use serde::Deserialize;

use crate::window::{PageSize, PageWindow};

/// Raw `offset`/`limit` query parameters.
///
/// Both values stay as strings so that malformed input degrades to the
/// defaults instead of rejecting the whole request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    /// Requested offset; any integer is accepted.
    #[serde(default)]
    pub offset: Option<String>,
    /// Requested page size.
    #[serde(default)]
    pub limit: Option<String>,
}

/// Parsed paging request, prior to clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: i64,
    page_size: PageSize,
}

impl PageRequest {
    /// Build a request from already-parsed values.
    #[must_use]
    pub const fn new(offset: i64, page_size: PageSize) -> Self {
        Self { offset, page_size }
    }

    /// The first page at the default size.
    #[must_use]
    pub const fn first() -> Self {
        Self::new(0, PageSize::DEFAULT)
    }

    /// Requested offset, possibly negative or out of range.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Requested page size.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Clamp this request against `total` matching records.
    #[must_use]
    pub fn window(&self, total: u64) -> PageWindow {
        PageWindow::new(total, self.page_size, self.offset)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

impl From<&PageQuery> for PageRequest {
    fn from(query: &PageQuery) -> Self {
        let offset = query
            .offset
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0);
        let page_size = query
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .and_then(|size| PageSize::new(size).ok())
            .unwrap_or_default();
        Self::new(offset, page_size)
    }
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        Self::from(&query)
    }
}
