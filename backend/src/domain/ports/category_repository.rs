//! Driven port for the category list.

use async_trait::async_trait;

use crate::domain::CategoryName;

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading categories.
    pub enum CategoryRepositoryError {
        /// The store could not be reached.
        Connection =>
            "category store connection failed: {message}",
        /// A query failed or returned rows that could not be decoded.
        Query =>
            "category store query failed: {message}",
    }
}

/// Port for reading categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category, ordered by name.
    async fn list(&self) -> Result<Vec<CategoryName>, CategoryRepositoryError>;

    /// Whether a category with exactly this name exists.
    async fn exists(&self, name: &CategoryName) -> Result<bool, CategoryRepositoryError>;
}
