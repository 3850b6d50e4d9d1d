//! Offset pagination primitives shared by the Veggie Patch listing pages.
//!
//! Listing endpoints count the records matching a predicate, clamp the
//! client-supplied offset against that count with [`PageWindow`], fetch the
//! bounded slice, and then render navigation with [`PageLinks`].
//!
//! The crate is transport agnostic: [`PageQuery`] deserializes from any
//! `serde` source (typically a URL query string) and [`PageLinks`] only
//! rewrites the `offset` and `limit` pairs of a caller-supplied [`url::Url`].
//!
//! ```
//! use pagination::{PageSize, PageWindow};
//!
//! let window = PageWindow::new(20, PageSize::DEFAULT, -4);
//! assert_eq!(window.offset(), 0);
//! assert_eq!(window.next_offset(), 9);
//! assert_eq!(window.prev_offset(), -9);
//! ```

mod links;
mod request;
mod window;

pub use links::{LIMIT_PARAM, OFFSET_PARAM, PageLinks};
pub use request::{PageQuery, PageRequest};
pub use window::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageSize, PageWindow};

/// Errors raised while constructing pagination values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The requested page size is zero or above [`MAX_PAGE_SIZE`].
    #[error("page size must be between 1 and {max}, got {size}")]
    InvalidPageSize {
        /// Rejected page size.
        size: u32,
        /// Largest accepted page size.
        max: u32,
    },
}
