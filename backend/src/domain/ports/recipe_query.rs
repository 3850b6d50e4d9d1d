//! Driving port for recipe listings and lookups.
//!
//! Inbound adapters call this port with raw paging input; implementations own
//! the count, clamp, fetch sequence so handlers never see an unclamped
//! offset.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{CategoryName, Error, Recipe, RecipeId, SearchQuery, TimeBucket};

/// Read-side use cases of the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// Every recipe ordered by category.
    async fn landing_page(&self, request: PageRequest) -> Result<Page<Recipe>, Error>;

    /// Recipes in one category ordered by name.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::NotFound`] when the category does
    /// not exist; no recipe query is issued in that case.
    async fn category_page(
        &self,
        category: &CategoryName,
        request: PageRequest,
    ) -> Result<Page<Recipe>, Error>;

    /// Full-text search over names and ingredients in relevance order.
    async fn search(&self, query: &SearchQuery, request: PageRequest)
    -> Result<Page<Recipe>, Error>;

    /// Recipes in `category` whose total time falls in `bucket`.
    async fn filter(
        &self,
        category: &CategoryName,
        bucket: TimeBucket,
        request: PageRequest,
    ) -> Result<Page<Recipe>, Error>;

    /// One recipe by identifier.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::NotFound`] when no recipe matches.
    async fn recipe(&self, id: &RecipeId) -> Result<Recipe, Error>;

    /// Every category ordered by name.
    async fn categories(&self) -> Result<Vec<CategoryName>, Error>;
}
