//! Recipe catalogue service.
//!
//! Implements [`RecipeQuery`] and [`RecipeCommand`] on top of the storage
//! ports. Listings follow one sequence: build the predicate, count with it,
//! clamp the requested offset against the count, then fetch the page with the
//! same predicate.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, EditAction, EditAuthorization, EditOutcome,
    RecipeCommand, RecipeQuery, RecipeRepository, RecipeRepositoryError,
};
use crate::domain::{
    CategoryName, EditKey, EditKeyHash, Error, ListingQuery, NewRecipe, Recipe, RecipeDetails,
    RecipeDraft, RecipeId, RecipeValidationError, SearchQuery, TimeBucket,
};

/// Catalogue service implementing the driving ports.
#[derive(Clone)]
pub struct RecipeCatalogueService<R, C> {
    recipes: Arc<R>,
    categories: Arc<C>,
}

impl<R, C> RecipeCatalogueService<R, C> {
    /// Create a new service over the given repositories.
    pub fn new(recipes: Arc<R>, categories: Arc<C>) -> Self {
        Self {
            recipes,
            categories,
        }
    }
}

impl<R, C> RecipeCatalogueService<R, C>
where
    R: RecipeRepository,
    C: CategoryRepository,
{
    async fn paginate(
        &self,
        query: ListingQuery,
        request: PageRequest,
    ) -> Result<Page<Recipe>, Error> {
        let total = self
            .recipes
            .count(&query.filter)
            .await
            .map_err(map_recipe_error)?;
        let window = request.window(total);
        let items = self
            .recipes
            .list(&query, window.offset(), window.limit())
            .await
            .map_err(map_recipe_error)?;
        Ok(Page::new(items, window))
    }

    async fn load(&self, id: &RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(id))
    }

    async fn load_authorized(
        &self,
        id: &RecipeId,
        edit_key: &EditKey,
    ) -> Result<Option<Recipe>, Error> {
        let recipe = self.load(id).await?;
        if recipe.edit_key().verify(edit_key) {
            Ok(Some(recipe))
        } else {
            warn!(recipe_id = %id, "edit key mismatch");
            Ok(None)
        }
    }
}

#[async_trait]
impl<R, C> RecipeQuery for RecipeCatalogueService<R, C>
where
    R: RecipeRepository,
    C: CategoryRepository,
{
    async fn landing_page(&self, request: PageRequest) -> Result<Page<Recipe>, Error> {
        self.paginate(ListingQuery::landing(), request).await
    }

    async fn category_page(
        &self,
        category: &CategoryName,
        request: PageRequest,
    ) -> Result<Page<Recipe>, Error> {
        let exists = self
            .categories
            .exists(category)
            .await
            .map_err(map_category_error)?;
        if !exists {
            return Err(Error::not_found(format!("category {category} not found")));
        }
        self.paginate(ListingQuery::category(category.clone()), request)
            .await
    }

    async fn search(
        &self,
        query: &SearchQuery,
        request: PageRequest,
    ) -> Result<Page<Recipe>, Error> {
        self.paginate(ListingQuery::search(query.clone()), request)
            .await
    }

    async fn filter(
        &self,
        category: &CategoryName,
        bucket: TimeBucket,
        request: PageRequest,
    ) -> Result<Page<Recipe>, Error> {
        self.paginate(ListingQuery::category_time(category.clone(), bucket), request)
            .await
    }

    async fn recipe(&self, id: &RecipeId) -> Result<Recipe, Error> {
        self.load(id).await
    }

    async fn categories(&self) -> Result<Vec<CategoryName>, Error> {
        self.categories.list().await.map_err(map_category_error)
    }
}

#[async_trait]
impl<R, C> RecipeCommand for RecipeCatalogueService<R, C>
where
    R: RecipeRepository,
    C: CategoryRepository,
{
    async fn create(&self, draft: RecipeDraft, edit_key: EditKey) -> Result<RecipeId, Error> {
        if edit_key.is_empty() {
            return Err(Error::invalid_request("edit_key must not be empty")
                .with_details(json!({ "field": "edit_key", "code": "missing_field" })));
        }
        let details = RecipeDetails::try_from(draft).map_err(map_validation_error)?;
        let recipe = NewRecipe {
            details,
            edit_key: EditKeyHash::derive(&edit_key),
        };
        let id = self
            .recipes
            .insert(&recipe)
            .await
            .map_err(map_recipe_error)?;
        info!(recipe_id = %id, "recipe created");
        Ok(id)
    }

    async fn authorize_edit(
        &self,
        id: &RecipeId,
        edit_key: &EditKey,
    ) -> Result<EditAuthorization, Error> {
        Ok(self
            .load_authorized(id, edit_key)
            .await?
            .map_or(EditAuthorization::Denied, EditAuthorization::Granted))
    }

    async fn submit_edit(
        &self,
        id: &RecipeId,
        edit_key: &EditKey,
        action: EditAction,
    ) -> Result<EditOutcome, Error> {
        if self.load_authorized(id, edit_key).await?.is_none() {
            return Ok(EditOutcome::Denied);
        }
        match action {
            EditAction::Delete => {
                let removed = self.recipes.delete(id).await.map_err(map_recipe_error)?;
                if !removed {
                    return Err(recipe_not_found(id));
                }
                info!(recipe_id = %id, "recipe deleted");
                Ok(EditOutcome::Deleted)
            }
            EditAction::Update(draft) => {
                let details = RecipeDetails::try_from(draft).map_err(map_validation_error)?;
                let updated = self
                    .recipes
                    .update(id, &details)
                    .await
                    .map_err(map_recipe_error)?;
                if !updated {
                    return Err(recipe_not_found(id));
                }
                info!(recipe_id = %id, total_time = details.total_time(), "recipe updated");
                Ok(EditOutcome::Updated)
            }
        }
    }
}

fn recipe_not_found(id: &RecipeId) -> Error {
    Error::not_found(format!("recipe {id} not found"))
}

fn map_validation_error(error: RecipeValidationError) -> Error {
    let field = match error {
        RecipeValidationError::EmptyName => "recipe_name",
        RecipeValidationError::Category(_) => "category_name",
        RecipeValidationError::TotalTimeOverflow { .. } => "cook_time",
    };
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": field, "code": "invalid_value" }))
}

fn map_recipe_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            warn!(%message, "recipe store unavailable");
            Error::service_unavailable(format!("recipe store unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            error!(%message, "recipe store query failed");
            Error::internal(format!("recipe store error: {message}"))
        }
    }
}

fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            warn!(%message, "category store unavailable");
            Error::service_unavailable(format!("category store unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            error!(%message, "category store query failed");
            Error::internal(format!("category store error: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCategoryRepository, MockRecipeRepository};
    use crate::domain::test_support::{FIXTURE_KEY, draft_with, new_recipe_with};
    use crate::domain::{ErrorCode, split_ingredients};
    use crate::outbound::memory::InMemoryRecipeStore;
    use pagination::PageSize;
    use rstest::{fixture, rstest};

    type MemoryService = RecipeCatalogueService<InMemoryRecipeStore, InMemoryRecipeStore>;

    #[fixture]
    fn store() -> Arc<InMemoryRecipeStore> {
        Arc::new(InMemoryRecipeStore::new())
    }

    fn service(store: &Arc<InMemoryRecipeStore>) -> MemoryService {
        RecipeCatalogueService::new(Arc::clone(store), Arc::clone(store))
    }

    async fn seed(
        store: &InMemoryRecipeStore,
        name: &str,
        category: &str,
        prep: u32,
        cook: u32,
    ) -> RecipeId {
        store
            .insert(&new_recipe_with(name, category, prep, cook))
            .await
            .expect("seed recipe")
    }

    fn dinner() -> CategoryName {
        CategoryName::new("Dinner").expect("category")
    }

    fn key() -> EditKey {
        EditKey::new(FIXTURE_KEY)
    }

    #[rstest]
    #[tokio::test]
    async fn full_category_page_links_past_the_end(store: Arc<InMemoryRecipeStore>) {
        for index in 0..9 {
            seed(&store, &format!("Dish {index}"), "Dinner", 5, 5).await;
        }
        seed(&store, "Porridge", "Breakfast", 2, 8).await;
        let service = service(&store);

        let page = service
            .category_page(&dinner(), PageRequest::first())
            .await
            .expect("page");
        assert_eq!(page.items().len(), 9);
        assert_eq!(page.window().next_offset(), 9);
        assert_eq!(page.window().prev_offset(), -9);

        let next = service
            .category_page(&dinner(), PageRequest::new(9, PageSize::DEFAULT))
            .await
            .expect("page");
        assert!(next.is_empty());

        let prev = service
            .category_page(&dinner(), PageRequest::new(-9, PageSize::DEFAULT))
            .await
            .expect("page");
        assert_eq!(prev.window().offset(), 0);
        assert_eq!(prev.items().len(), 9);
    }

    #[rstest]
    #[tokio::test]
    async fn offsets_past_the_end_clamp_to_count(store: Arc<InMemoryRecipeStore>) {
        seed(&store, "Stew", "Dinner", 10, 50).await;
        seed(&store, "Curry", "Dinner", 10, 30).await;
        let page = service(&store)
            .landing_page(PageRequest::new(500, PageSize::DEFAULT))
            .await
            .expect("page");
        assert_eq!(page.window().offset(), 2);
        assert!(page.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn landing_page_orders_by_category(store: Arc<InMemoryRecipeStore>) {
        seed(&store, "Stew", "Dinner", 10, 50).await;
        seed(&store, "Porridge", "Breakfast", 2, 8).await;
        seed(&store, "Brownies", "Dessert", 15, 25).await;
        let page = service(&store)
            .landing_page(PageRequest::first())
            .await
            .expect("page");
        let names: Vec<&str> = page.items().iter().map(|r| r.details().name()).collect();
        assert_eq!(names, ["Porridge", "Brownies", "Stew"]);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_category_is_not_found_before_any_recipe_query() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_exists().times(1).return_once(|_| Ok(false));
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_count().never();
        recipes.expect_list().never();

        let service = RecipeCatalogueService::new(Arc::new(recipes), Arc::new(categories));
        let error = service
            .category_page(&dinner(), PageRequest::first())
            .await
            .expect_err("missing category");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn search_without_matches_yields_empty_first_page(store: Arc<InMemoryRecipeStore>) {
        seed(&store, "Stew", "Dinner", 10, 50).await;
        let page = service(&store)
            .search(&SearchQuery::new("rhubarb"), PageRequest::new(18, PageSize::DEFAULT))
            .await
            .expect("page");
        assert!(page.is_empty());
        assert_eq!(page.window().total(), 0);
        assert_eq!(page.window().offset(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn filter_honours_time_buckets(store: Arc<InMemoryRecipeStore>) {
        seed(&store, "Quick salad", "Dinner", 10, 20).await;
        seed(&store, "Risotto", "Dinner", 15, 45).await;
        seed(&store, "Roast", "Dinner", 20, 41).await;
        let service = service(&store);

        for (bucket, expected) in [
            (TimeBucket::HalfHour, "Quick salad"),
            (TimeBucket::UpToHour, "Risotto"),
            (TimeBucket::OverHour, "Roast"),
        ] {
            let page = service
                .filter(&dinner(), bucket, PageRequest::first())
                .await
                .expect("page");
            let names: Vec<&str> = page.items().iter().map(|r| r.details().name()).collect();
            assert_eq!(names, [expected], "bucket {bucket:?}");
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_derives_total_and_splits_ingredients(store: Arc<InMemoryRecipeStore>) {
        let mut draft = draft_with("Tray bake", "Dinner", 10, 25);
        draft.ingredients = split_ingredients("salt;pepper;oil");
        let service = service(&store);

        let id = service.create(draft, key()).await.expect("created");
        let recipe = service.recipe(&id).await.expect("stored");
        assert_eq!(recipe.details().total_time(), 35);
        assert_eq!(recipe.details().ingredients(), ["salt", "pepper", "oil"]);
        assert!(recipe.edit_key().verify(&key()));
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_empty_edit_key(store: Arc<InMemoryRecipeStore>) {
        let error = service(&store)
            .create(draft_with("Tray bake", "Dinner", 10, 25), EditKey::new(""))
            .await
            .expect_err("missing key");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(store.count(&crate::domain::RecipeFilter::All).await.ok(), Some(0));
    }

    #[rstest]
    #[case(FIXTURE_KEY, true)]
    #[case("coriander", false)]
    #[tokio::test]
    async fn authorize_edit_compares_keys(
        store: Arc<InMemoryRecipeStore>,
        #[case] attempt: &str,
        #[case] granted: bool,
    ) {
        let id = seed(&store, "Stew", "Dinner", 10, 50).await;
        let outcome = service(&store)
            .authorize_edit(&id, &EditKey::new(attempt))
            .await
            .expect("authorization");
        assert_eq!(matches!(outcome, EditAuthorization::Granted(_)), granted);
    }

    #[rstest]
    #[tokio::test]
    async fn update_recomputes_total_time(store: Arc<InMemoryRecipeStore>) {
        let id = seed(&store, "Stew", "Dinner", 10, 50).await;
        let service = service(&store);

        let outcome = service
            .submit_edit(&id, &key(), EditAction::Update(draft_with("Stew", "Dinner", 5, 20)))
            .await
            .expect("update");
        assert_eq!(outcome, EditOutcome::Updated);
        let recipe = service.recipe(&id).await.expect("stored");
        assert_eq!(recipe.details().total_time(), 25);
        assert!(recipe.edit_key().verify(&key()));
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_key_on_submit_leaves_recipe_unchanged(store: Arc<InMemoryRecipeStore>) {
        let id = seed(&store, "Stew", "Dinner", 10, 50).await;
        let service = service(&store);
        let before = service.recipe(&id).await.expect("stored");

        for action in [
            EditAction::Update(draft_with("Changed", "Lunch", 1, 1)),
            EditAction::Delete,
        ] {
            let outcome = service
                .submit_edit(&id, &EditKey::new("wrong"), action)
                .await
                .expect("submit");
            assert_eq!(outcome, EditOutcome::Denied);
        }
        assert_eq!(service.recipe(&id).await.expect("stored"), before);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_recipe(store: Arc<InMemoryRecipeStore>) {
        let id = seed(&store, "Stew", "Dinner", 10, 50).await;
        let service = service(&store);

        let outcome = service
            .submit_edit(&id, &key(), EditAction::Delete)
            .await
            .expect("delete");
        assert_eq!(outcome, EditOutcome::Deleted);
        let error = service.recipe(&id).await.expect_err("gone");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(RecipeRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RecipeRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn store_failures_map_to_error_codes(
        #[case] failure: RecipeRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_count().return_once(move |_| Err(failure));
        let service = RecipeCatalogueService::new(
            Arc::new(recipes),
            Arc::new(MockCategoryRepository::new()),
        );
        let error = service
            .landing_page(PageRequest::first())
            .await
            .expect_err("store failure");
        assert_eq!(error.code(), expected);
    }
}
