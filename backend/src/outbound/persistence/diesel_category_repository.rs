//! PostgreSQL-backed category repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::CategoryName;
use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};

use super::diesel_helpers::{collect_rows, map_diesel_error, map_pool_error_message};
use super::models::CategoryRow;
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the category port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryRepositoryError {
    CategoryRepositoryError::connection(map_pool_error_message(error))
}

fn map_query_error(error: diesel::result::Error) -> CategoryRepositoryError {
    map_diesel_error(
        error,
        "category read",
        CategoryRepositoryError::query,
        CategoryRepositoryError::connection,
    )
}

fn row_to_category(row: CategoryRow) -> Result<CategoryName, String> {
    CategoryName::new(&row.name).map_err(|err| format!("category {:?}: {err}", row.name))
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<CategoryName>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order_by(categories::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_query_error)?;
        collect_rows(rows.into_iter().map(row_to_category), CategoryRepositoryError::query)
    }

    async fn exists(&self, name: &CategoryName) -> Result<bool, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            categories::table.filter(categories::name.eq(name.as_ref().to_owned())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_query_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn blank_category_rows_are_rejected() {
        let error = row_to_category(CategoryRow {
            name: "  ".to_owned(),
        })
        .expect_err("blank name");
        assert!(error.contains("must not be empty"));
    }

    #[rstest]
    fn category_rows_are_trimmed() {
        let name = row_to_category(CategoryRow {
            name: "Lunch ".to_owned(),
        })
        .expect("valid row");
        assert_eq!(name.as_ref(), "Lunch");
    }
}
