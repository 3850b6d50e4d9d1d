//! Domain primitives, ports and services.
//!
//! Purpose: define the recipe catalogue independently of HTTP and storage.
//! Types validate on construction; the HTTP and persistence adapters only
//! ever see values that already satisfy their invariants.
//!
//! Public surface:
//! - [`Recipe`], [`RecipeDetails`], [`RecipeDraft`]: the recipe aggregate and
//!   its validated and unvalidated field sets.
//! - [`ListingQuery`], [`RecipeFilter`], [`TimeBucket`]: listing predicates.
//! - [`EditKey`], [`EditKeyHash`]: the shared secret guarding edits.
//! - [`RecipeCatalogueService`]: implementation of the driving ports.
//! - [`Error`], [`ErrorCode`]: transport agnostic failures.

pub mod catalogue_service;
pub mod category;
pub mod edit_key;
pub mod error;
pub mod listing;
pub mod ports;
pub mod recipe;
pub mod trace_id;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::catalogue_service::RecipeCatalogueService;
pub use self::category::{CategoryName, CategoryValidationError};
pub use self::edit_key::{EditKey, EditKeyHash, EditKeyHashError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{ListingQuery, RecipeFilter, RecipeSort, SearchQuery, TimeBucket};
pub use self::recipe::{
    INGREDIENT_DELIMITER, NewRecipe, Recipe, RecipeDetails, RecipeDraft, RecipeId,
    RecipeValidationError, join_ingredients, split_ingredients,
};
pub use self::trace_id::TraceId;

/// Categories every fresh store starts with.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Breakfast", "Lunch", "Dinner", "Dessert", "Snacks"];
