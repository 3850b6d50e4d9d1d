//! Offset windows and page envelopes.

use crate::PaginationError;

/// Number of records on a listing page unless the client asks otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Validated, non-zero page size.
///
/// # Examples
/// ```
/// use pagination::PageSize;
///
/// assert_eq!(PageSize::new(12).map(PageSize::get), Ok(12));
/// assert!(PageSize::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(u32);

impl PageSize {
    /// The listing page size used across the application.
    pub const DEFAULT: Self = Self(DEFAULT_PAGE_SIZE);

    /// Validate a page size.
    ///
    /// # Errors
    /// Returns [`PaginationError::InvalidPageSize`] when `size` is zero or
    /// larger than [`MAX_PAGE_SIZE`].
    pub const fn new(size: u32) -> Result<Self, PaginationError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(PaginationError::InvalidPageSize {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self(size))
    }

    /// Raw page size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bounded window over a filtered record set.
///
/// The effective offset is clamped into `0..=total`: negative requests start
/// at zero and requests past the end land exactly on `total`, which yields an
/// empty page rather than an error. The navigation offsets are derived from
/// the effective offset and are deliberately left unclamped; the request that
/// follows a link clamps them again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    total: u64,
    page_size: PageSize,
    offset: u64,
}

impl PageWindow {
    /// Clamp `requested_offset` against `total` matching records.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageSize, PageWindow};
    ///
    /// let window = PageWindow::new(9, PageSize::DEFAULT, 40);
    /// assert_eq!(window.offset(), 9);
    /// assert_eq!(window.next_offset(), 18);
    /// ```
    #[must_use]
    pub fn new(total: u64, page_size: PageSize, requested_offset: i64) -> Self {
        let offset = u64::try_from(requested_offset).map_or(0, |requested| requested.min(total));
        Self {
            total,
            page_size,
            offset,
        }
    }

    /// Effective offset to send to the store.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of records to fetch.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size.get()
    }

    /// Page size backing this window.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Number of records matching the predicate.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Offset the "next" link points at; may exceed `total`.
    #[must_use]
    pub fn next_offset(&self) -> i64 {
        self.signed_offset()
            .saturating_add(i64::from(self.page_size.get()))
    }

    /// Offset the "previous" link points at; may be negative.
    #[must_use]
    pub fn prev_offset(&self) -> i64 {
        self.signed_offset()
            .saturating_sub(i64::from(self.page_size.get()))
    }

    /// Whether the window starts at or beyond the last matching record.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.offset >= self.total
    }

    fn signed_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }
}

/// Records fetched for a window, plus the window itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    window: PageWindow,
}

impl<T> Page<T> {
    /// Pair fetched records with the window they were fetched for.
    #[must_use]
    pub const fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self { items, window }
    }

    /// Records on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Window the records were fetched for.
    #[must_use]
    pub const fn window(&self) -> &PageWindow {
        &self.window
    }

    /// Whether the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split into records and window.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, PageWindow) {
        (self.items, self.window)
    }

    /// Convert every record while keeping the window.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            window: self.window,
        }
    }
}
