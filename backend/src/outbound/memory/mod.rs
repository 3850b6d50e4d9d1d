//! In-memory recipe store.
//!
//! Backs both storage ports when no database is configured and in tests.
//! Filters are evaluated with [`RecipeFilter::matches`]; relevance ordering
//! is insertion order. State is lost on restart.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, RecipeRepository, RecipeRepositoryError,
};
use crate::domain::{
    CategoryName, DEFAULT_CATEGORIES, ListingQuery, NewRecipe, Recipe, RecipeDetails,
    RecipeFilter, RecipeId, RecipeSort,
};

#[derive(Debug, Default)]
struct StoreState {
    recipes: Vec<Recipe>,
    categories: BTreeSet<CategoryName>,
}

/// Mutex-guarded recipe and category collections.
#[derive(Debug)]
pub struct InMemoryRecipeStore {
    state: Mutex<StoreState>,
}

impl Default for InMemoryRecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecipeStore {
    /// Create an empty store seeded with the default categories.
    pub fn new() -> Self {
        Self::with_categories(
            DEFAULT_CATEGORIES
                .iter()
                .filter_map(|name| CategoryName::new(name).ok()),
        )
    }

    /// Create an empty store with the given categories.
    pub fn with_categories(categories: impl IntoIterator<Item = CategoryName>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                recipes: Vec::new(),
                categories: categories.into_iter().collect(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn sort_recipes(recipes: &mut [&Recipe], sort: RecipeSort) {
    match sort {
        RecipeSort::CategoryName => recipes.sort_by(|a, b| {
            (a.details().category(), a.details().name(), a.id().as_uuid()).cmp(&(
                b.details().category(),
                b.details().name(),
                b.id().as_uuid(),
            ))
        }),
        RecipeSort::RecipeName => recipes.sort_by(|a, b| {
            (a.details().name(), a.id().as_uuid()).cmp(&(b.details().name(), b.id().as_uuid()))
        }),
        RecipeSort::Relevance => {}
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeStore {
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let state = self.lock().map_err(RecipeRepositoryError::query)?;
        Ok(state.recipes.iter().find(|r| r.id() == *id).cloned())
    }

    async fn count(&self, filter: &RecipeFilter) -> Result<u64, RecipeRepositoryError> {
        let state = self.lock().map_err(RecipeRepositoryError::query)?;
        let matching = state.recipes.iter().filter(|r| filter.matches(r)).count();
        u64::try_from(matching).map_err(|err| RecipeRepositoryError::query(err.to_string()))
    }

    async fn list(
        &self,
        query: &ListingQuery,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let state = self.lock().map_err(RecipeRepositoryError::query)?;
        let mut matching: Vec<&Recipe> = state
            .recipes
            .iter()
            .filter(|r| query.filter.matches(r))
            .collect();
        sort_recipes(&mut matching, query.sort);
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipeRepositoryError> {
        let mut state = self.lock().map_err(RecipeRepositoryError::query)?;
        let id = RecipeId::random();
        state.recipes.push(Recipe::new(
            id,
            recipe.details.clone(),
            recipe.edit_key.clone(),
        ));
        Ok(id)
    }

    async fn update(
        &self,
        id: &RecipeId,
        details: &RecipeDetails,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock().map_err(RecipeRepositoryError::query)?;
        let Some(recipe) = state.recipes.iter_mut().find(|r| r.id() == *id) else {
            return Ok(false);
        };
        recipe.replace_details(details.clone());
        Ok(true)
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock().map_err(RecipeRepositoryError::query)?;
        let before = state.recipes.len();
        state.recipes.retain(|r| r.id() != *id);
        Ok(state.recipes.len() != before)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRecipeStore {
    async fn list(&self) -> Result<Vec<CategoryName>, CategoryRepositoryError> {
        let state = self.lock().map_err(CategoryRepositoryError::query)?;
        Ok(state.categories.iter().cloned().collect())
    }

    async fn exists(&self, name: &CategoryName) -> Result<bool, CategoryRepositoryError> {
        let state = self.lock().map_err(CategoryRepositoryError::query)?;
        Ok(state.categories.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::new_recipe_with;
    use crate::domain::{SearchQuery, TimeBucket};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryRecipeStore {
        InMemoryRecipeStore::new()
    }

    async fn names(store: &InMemoryRecipeStore, query: &ListingQuery, offset: u64) -> Vec<String> {
        RecipeRepository::list(store, query, offset, 9)
            .await
            .expect("list")
            .iter()
            .map(|r| r.details().name().to_owned())
            .collect()
    }

    #[rstest]
    #[tokio::test]
    async fn default_categories_are_seeded(store: InMemoryRecipeStore) {
        let categories = CategoryRepository::list(&store).await.expect("categories");
        let names: Vec<&str> = categories.iter().map(AsRef::as_ref).collect();
        assert_eq!(names, ["Breakfast", "Dessert", "Dinner", "Lunch", "Snacks"]);
        let lunch = CategoryName::new("Lunch").expect("category");
        assert!(store.exists(&lunch).await.expect("exists"));
    }

    #[rstest]
    #[tokio::test]
    async fn count_and_list_share_the_filter(store: InMemoryRecipeStore) {
        for (name, cook) in [("Salad", 20), ("Soup", 25), ("Stew", 50), ("Pie", 51)] {
            store
                .insert(&new_recipe_with(name, "Dinner", 10, cook))
                .await
                .expect("insert");
        }
        let category = CategoryName::new("Dinner").expect("category");
        let query = ListingQuery::category_time(category, TimeBucket::UpToHour);
        assert_eq!(store.count(&query.filter).await.expect("count"), 2);
        assert_eq!(names(&store, &query, 0).await, ["Soup", "Stew"]);
        assert_eq!(names(&store, &query, 1).await, ["Stew"]);
    }

    #[rstest]
    #[tokio::test]
    async fn relevance_keeps_insertion_order(store: InMemoryRecipeStore) {
        for name in ["Leek tart", "Braised leek"] {
            store
                .insert(&new_recipe_with(name, "Lunch", 10, 10))
                .await
                .expect("insert");
        }
        let query = ListingQuery::search(SearchQuery::new("leek"));
        assert_eq!(names(&store, &query, 0).await, ["Leek tart", "Braised leek"]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_report_missing_recipes(store: InMemoryRecipeStore) {
        let ghost = RecipeId::random();
        let details = new_recipe_with("Soup", "Lunch", 1, 1).details;
        assert!(!store.update(&ghost, &details).await.expect("update"));
        assert!(!store.delete(&ghost).await.expect("delete"));

        let id = store
            .insert(&new_recipe_with("Soup", "Lunch", 1, 1))
            .await
            .expect("insert");
        assert!(store.delete(&id).await.expect("delete"));
        assert!(store.find_by_id(&id).await.expect("find").is_none());
    }
}
