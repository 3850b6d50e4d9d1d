//! Next/previous navigation links.

use std::borrow::Cow;

use url::{Position, Url};

use crate::window::{PageSize, PageWindow};

/// Query parameter carrying the requested offset.
pub const OFFSET_PARAM: &str = "offset";

/// Query parameter carrying the requested page size.
pub const LIMIT_PARAM: &str = "limit";

/// Pre-built navigation references for a window.
///
/// Links are derived from the URL of the current request: every other query
/// pair survives, `offset` is replaced with the window's next or previous
/// offset, and `limit` is only emitted when the page size is not the default.
///
/// # Examples
/// ```
/// use pagination::{PageLinks, PageSize, PageWindow};
/// use url::Url;
///
/// let base = Url::parse("http://localhost/categories/Dinner?offset=9").expect("url");
/// let links = PageLinks::new(&base, &PageWindow::new(30, PageSize::DEFAULT, 9));
/// assert_eq!(links.next_href(), "/categories/Dinner?offset=18");
/// assert_eq!(links.prev_href(), "/categories/Dinner?offset=0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    next: Url,
    prev: Url,
}

impl PageLinks {
    /// Build links relative to `base` for `window`.
    #[must_use]
    pub fn new(base: &Url, window: &PageWindow) -> Self {
        Self {
            next: with_offset(base, window, window.next_offset()),
            prev: with_offset(base, window, window.prev_offset()),
        }
    }

    /// Absolute URL of the next page.
    #[must_use]
    pub const fn next(&self) -> &Url {
        &self.next
    }

    /// Absolute URL of the previous page.
    #[must_use]
    pub const fn prev(&self) -> &Url {
        &self.prev
    }

    /// Path and query of the next page, suitable for an `href`.
    #[must_use]
    pub fn next_href(&self) -> &str {
        &self.next[Position::BeforePath..]
    }

    /// Path and query of the previous page, suitable for an `href`.
    #[must_use]
    pub fn prev_href(&self) -> &str {
        &self.prev[Position::BeforePath..]
    }
}

fn with_offset(base: &Url, window: &PageWindow, offset: i64) -> Url {
    let retained: Vec<(Cow<'_, str>, Cow<'_, str>)> = base
        .query_pairs()
        .filter(|(key, _)| key != OFFSET_PARAM && key != LIMIT_PARAM)
        .collect();

    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(retained);
        pairs.append_pair(OFFSET_PARAM, &offset.to_string());
        if window.page_size() != PageSize::DEFAULT {
            pairs.append_pair(LIMIT_PARAM, &window.limit().to_string());
        }
    }
    url
}
