//! Driven port for recipe storage.
//!
//! The store evaluates [`RecipeFilter`] predicates itself so that counting
//! and paging run against the same predicate. Offsets passed to
//! [`RecipeRepository::list`] are already clamped by the caller.

use async_trait::async_trait;

use crate::domain::{ListingQuery, NewRecipe, Recipe, RecipeDetails, RecipeFilter, RecipeId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe persistence adapters.
    pub enum RecipeRepositoryError {
        /// The store could not be reached.
        Connection =>
            "recipe store connection failed: {message}",
        /// A query failed or returned rows that could not be decoded.
        Query =>
            "recipe store query failed: {message}",
    }
}

/// Port for reading and writing recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Fetch one recipe; `None` when no recipe has the identifier.
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Count recipes matching `filter`.
    async fn count(&self, filter: &RecipeFilter) -> Result<u64, RecipeRepositoryError>;

    /// Return at most `limit` recipes matching the query, skipping `offset`
    /// in the query's sort order.
    async fn list(
        &self,
        query: &ListingQuery,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Store a new recipe and return its assigned identifier.
    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipeRepositoryError>;

    /// Overwrite the editable fields; `false` when the recipe is gone.
    async fn update(
        &self,
        id: &RecipeId,
        details: &RecipeDetails,
    ) -> Result<bool, RecipeRepositoryError>;

    /// Remove a recipe; `false` when it was already gone.
    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError>;
}
