//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{categories, recipes};

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub name: String,
    pub category_name: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub total_time: i32,
    pub serves: String,
    pub ingredients: Vec<String>,
    pub image_url: String,
    pub instructions: String,
    pub edit_key_hash: String,
}

/// Insertable struct for creating recipe records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub category_name: &'a str,
    pub prep_time: i32,
    pub cook_time: i32,
    pub total_time: i32,
    pub serves: &'a str,
    pub ingredients: Vec<String>,
    pub image_url: &'a str,
    pub instructions: &'a str,
    pub edit_key_hash: String,
}

/// Changeset overwriting every editable recipe column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeChangeset<'a> {
    pub name: &'a str,
    pub category_name: &'a str,
    pub prep_time: i32,
    pub cook_time: i32,
    pub total_time: i32,
    pub serves: &'a str,
    pub ingredients: Vec<String>,
    pub image_url: &'a str,
    pub instructions: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub name: String,
}
