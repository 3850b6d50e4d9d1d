//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`RecipeRepository`], [`CategoryRepository`]) are
//! implemented by the outbound adapters; driving ports ([`RecipeQuery`],
//! [`RecipeCommand`]) are implemented by the catalogue service and consumed
//! by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod category_repository;
mod recipe_command;
mod recipe_query;
mod recipe_repository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::{EditAction, EditAuthorization, EditOutcome, RecipeCommand};
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::RecipeQuery;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
