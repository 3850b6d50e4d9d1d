//! PostgreSQL-backed recipe repository.
//!
//! Filters translate to boxed Diesel queries so that [`RecipeRepository::count`]
//! and [`RecipeRepository::list`] share one predicate builder. Text search uses
//! PostgreSQL full-text search over the recipe name and its ingredients,
//! matching the GIN index created by the initial migration.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Float4, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    EditKeyHash, ListingQuery, NewRecipe, Recipe, RecipeDetails, RecipeDraft, RecipeFilter,
    RecipeId, RecipeSort, SearchQuery,
};

use super::diesel_helpers::{
    collect_rows, map_diesel_error, map_pool_error_message, minutes_from_db, minutes_to_db,
};
use super::models::{NewRecipeRow, RecipeChangeset, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Search document over name and ingredients; the GIN index covers this
/// exact expression.
const SEARCH_DOCUMENT: &str = "recipe_search_document(recipes.name, recipes.ingredients)";

type BoxedRecipes = recipes::BoxedQuery<'static, Pg>;

/// Diesel-backed implementation of the recipe port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    RecipeRepositoryError::connection(map_pool_error_message(error))
}

fn map_query_error(
    operation: &'static str,
) -> impl Fn(diesel::result::Error) -> RecipeRepositoryError {
    move |error| {
        map_diesel_error(
            error,
            operation,
            RecipeRepositoryError::query,
            RecipeRepositoryError::connection,
        )
    }
}

type RecipePredicate = Box<dyn BoxableExpression<recipes::table, Pg, SqlType = Bool>>;
type RecipeRank = Box<dyn BoxableExpression<recipes::table, Pg, SqlType = Float4>>;

fn text_match(query: &SearchQuery) -> RecipePredicate {
    Box::new(
        sql::<Bool>(&format!("{SEARCH_DOCUMENT} @@ plainto_tsquery('english', "))
            .bind::<Text, _>(query.as_ref().to_owned())
            .sql(")"),
    )
}

fn rank_desc(query: &SearchQuery) -> RecipeRank {
    Box::new(
        sql::<Float4>(&format!("ts_rank({SEARCH_DOCUMENT}, plainto_tsquery('english', "))
            .bind::<Text, _>(query.as_ref().to_owned())
            .sql(")) DESC"),
    )
}

fn filtered(filter: &RecipeFilter) -> Result<BoxedRecipes, RecipeRepositoryError> {
    let query = recipes::table.into_boxed();
    Ok(match filter {
        RecipeFilter::All => query,
        RecipeFilter::Category(category) => {
            query.filter(recipes::category_name.eq(category.as_ref().to_owned()))
        }
        RecipeFilter::Text(search) => query.filter(text_match(search)),
        RecipeFilter::CategoryTime { category, bucket } => {
            let (low, high) = bucket.bounds();
            let low = minutes_to_db(low).map_err(RecipeRepositoryError::query)?;
            let query = query
                .filter(recipes::category_name.eq(category.as_ref().to_owned()))
                .filter(recipes::total_time.ge(low));
            match high {
                Some(high) => {
                    let high = minutes_to_db(high).map_err(RecipeRepositoryError::query)?;
                    query.filter(recipes::total_time.le(high))
                }
                None => query,
            }
        }
    })
}

fn ordered(listing: &ListingQuery) -> Result<BoxedRecipes, RecipeRepositoryError> {
    let query = filtered(&listing.filter)?;
    Ok(match (listing.sort, &listing.filter) {
        (RecipeSort::CategoryName, _) => query.order((
            recipes::category_name.asc(),
            recipes::name.asc(),
            recipes::id.asc(),
        )),
        (RecipeSort::RecipeName, _) => query.order((recipes::name.asc(), recipes::id.asc())),
        (RecipeSort::Relevance, RecipeFilter::Text(search)) => query
            .order(rank_desc(search))
            .then_order_by(recipes::id.asc()),
        (RecipeSort::Relevance, _) => query.order(recipes::id.asc()),
    })
}

/// An empty search matches nothing; skip the round trip.
fn is_blank_search(filter: &RecipeFilter) -> bool {
    matches!(filter, RecipeFilter::Text(search) if search.terms().is_empty())
}

fn row_to_recipe(row: RecipeRow) -> Result<Recipe, String> {
    let draft = RecipeDraft {
        name: row.name,
        category: row.category_name,
        prep_time: minutes_from_db(row.prep_time)?,
        cook_time: minutes_from_db(row.cook_time)?,
        serves: row.serves,
        ingredients: row.ingredients,
        image_url: row.image_url,
        instructions: row.instructions,
    };
    let details = RecipeDetails::try_from(draft).map_err(|err| err.to_string())?;
    let stored_total = minutes_from_db(row.total_time)?;
    if stored_total != details.total_time() {
        return Err(format!(
            "stored total_time {stored_total} disagrees with {} + {}",
            details.prep_time(),
            details.cook_time()
        ));
    }
    let edit_key = EditKeyHash::decode(&row.edit_key_hash).map_err(|err| err.to_string())?;
    Ok(Recipe::new(RecipeId::from_uuid(row.id), details, edit_key))
}

struct Minutes {
    prep: i32,
    cook: i32,
    total: i32,
}

fn minutes_for(details: &RecipeDetails) -> Result<Minutes, RecipeRepositoryError> {
    let convert = |value| minutes_to_db(value).map_err(RecipeRepositoryError::query);
    Ok(Minutes {
        prep: convert(details.prep_time())?,
        cook: convert(details.cook_time())?,
        total: convert(details.total_time())?,
    })
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RecipeRow> = recipes::table
            .find(*id.as_uuid())
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_query_error("recipe lookup"))?;
        row.map(row_to_recipe)
            .transpose()
            .map_err(RecipeRepositoryError::query)
    }

    async fn count(&self, filter: &RecipeFilter) -> Result<u64, RecipeRepositoryError> {
        if is_blank_search(filter) {
            return Ok(0);
        }
        let query = filtered(filter)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_query_error("recipe count"))?;
        u64::try_from(total).map_err(|err| RecipeRepositoryError::query(err.to_string()))
    }

    async fn list(
        &self,
        query: &ListingQuery,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        if is_blank_search(&query.filter) {
            return Ok(Vec::new());
        }
        let offset =
            i64::try_from(offset).map_err(|err| RecipeRepositoryError::query(err.to_string()))?;
        let statement = ordered(query)?
            .select(RecipeRow::as_select())
            .offset(offset)
            .limit(i64::from(limit));
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RecipeRow> = statement
            .load(&mut conn)
            .await
            .map_err(map_query_error("recipe listing"))?;
        collect_rows(rows.into_iter().map(row_to_recipe), RecipeRepositoryError::query)
    }

    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipeRepositoryError> {
        let id = RecipeId::random();
        let details = &recipe.details;
        let minutes = minutes_for(details)?;
        let row = NewRecipeRow {
            id: *id.as_uuid(),
            name: details.name(),
            category_name: details.category().as_ref(),
            prep_time: minutes.prep,
            cook_time: minutes.cook,
            total_time: minutes.total,
            serves: details.serves(),
            ingredients: details.ingredients().to_vec(),
            image_url: details.image_url(),
            instructions: details.instructions(),
            edit_key_hash: recipe.edit_key.encode(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(recipes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_query_error("recipe insert"))?;
        Ok(id)
    }

    async fn update(
        &self,
        id: &RecipeId,
        details: &RecipeDetails,
    ) -> Result<bool, RecipeRepositoryError> {
        let minutes = minutes_for(details)?;
        let changeset = RecipeChangeset {
            name: details.name(),
            category_name: details.category().as_ref(),
            prep_time: minutes.prep,
            cook_time: minutes.cook,
            total_time: minutes.total,
            serves: details.serves(),
            ingredients: details.ingredients().to_vec(),
            image_url: details.image_url(),
            instructions: details.instructions(),
            updated_at: Utc::now(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(recipes::table.find(*id.as_uuid()))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_query_error("recipe update"))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(recipes::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_query_error("recipe delete"))?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryName, EditKey, TimeBucket};
    use diesel::debug_query;
    use rstest::rstest;
    use uuid::Uuid;

    fn row() -> RecipeRow {
        RecipeRow {
            id: Uuid::new_v4(),
            name: "Leek soup".to_owned(),
            category_name: "Lunch".to_owned(),
            prep_time: 10,
            cook_time: 25,
            total_time: 35,
            serves: "4".to_owned(),
            ingredients: vec!["leeks".to_owned(), "stock".to_owned()],
            image_url: String::new(),
            instructions: "Simmer.".to_owned(),
            edit_key_hash: EditKeyHash::derive(&EditKey::new("chive")).encode(),
        }
    }

    fn sql_for(listing: &ListingQuery) -> String {
        let statement = ordered(listing)
            .expect("query builds")
            .select(RecipeRow::as_select())
            .offset(9)
            .limit(9);
        debug_query::<Pg, _>(&statement).to_string()
    }

    #[rstest]
    fn rows_convert_with_stored_total() {
        let recipe = row_to_recipe(row()).expect("valid row");
        assert_eq!(recipe.details().total_time(), 35);
        assert!(recipe.edit_key().verify(&EditKey::new("chive")));
    }

    #[rstest]
    #[case::negative_minutes(RecipeRow { prep_time: -1, ..row() })]
    #[case::corrupt_key(RecipeRow { edit_key_hash: "plaintext".to_owned(), ..row() })]
    #[case::blank_category(RecipeRow { category_name: " ".to_owned(), ..row() })]
    #[case::stale_total(RecipeRow { total_time: 30, ..row() })]
    fn corrupt_rows_are_rejected(#[case] bad: RecipeRow) {
        assert!(row_to_recipe(bad).is_err());
    }

    #[rstest]
    fn text_search_orders_by_rank() {
        let sql = sql_for(&ListingQuery::search(SearchQuery::new("leek soup")));
        assert!(sql.contains("plainto_tsquery('english', $1)"), "{sql}");
        assert!(sql.contains("ts_rank("), "{sql}");
        assert!(sql.contains("leek soup"), "{sql}");
    }

    #[rstest]
    #[case(TimeBucket::HalfHour, true)]
    #[case(TimeBucket::OverHour, false)]
    fn bounded_buckets_add_an_upper_limit(#[case] bucket: TimeBucket, #[case] bounded: bool) {
        let category = CategoryName::new("Dinner").expect("category");
        let sql = sql_for(&ListingQuery::category_time(category, bucket));
        assert!(sql.contains("\"recipes\".\"total_time\" >= $2"), "{sql}");
        assert_eq!(sql.contains("\"recipes\".\"total_time\" <= $3"), bounded, "{sql}");
    }

    #[rstest]
    fn blank_search_short_circuits() {
        assert!(is_blank_search(&RecipeFilter::Text(SearchQuery::new("  "))));
        assert!(!is_blank_search(&RecipeFilter::All));
    }
}
