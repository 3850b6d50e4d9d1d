//! Driving port for recipe writes.
//!
//! Every write after creation is gated by the recipe's edit key. A key
//! mismatch is an expected outcome rather than an error: handlers answer it
//! with a redirect and a flash warning, so it is modelled in the return
//! types.

use async_trait::async_trait;

use crate::domain::{EditKey, Error, Recipe, RecipeDraft, RecipeId};

/// Result of presenting an edit key for a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAuthorization {
    /// The key matched; the current recipe pre-fills the edit form.
    Granted(Recipe),
    /// The key did not match.
    Denied,
}

/// Requested change in a submit-edit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Overwrite every editable field.
    Update(RecipeDraft),
    /// Remove the recipe.
    Delete,
}

/// Result of a gated write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The recipe now holds the submitted fields.
    Updated,
    /// The recipe no longer exists.
    Deleted,
    /// The key did not match; nothing was written.
    Denied,
}

/// Write-side use cases of the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Validate and store a new recipe guarded by `edit_key`.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the draft
    /// fails validation.
    async fn create(&self, draft: RecipeDraft, edit_key: EditKey) -> Result<RecipeId, Error>;

    /// Check `edit_key` against the stored digest.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::NotFound`] when the recipe does
    /// not exist.
    async fn authorize_edit(
        &self,
        id: &RecipeId,
        edit_key: &EditKey,
    ) -> Result<EditAuthorization, Error>;

    /// Re-verify `edit_key` and apply `action`.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::NotFound`] when the recipe does
    /// not exist and [`crate::domain::ErrorCode::InvalidRequest`] when an
    /// update draft fails validation.
    async fn submit_edit(
        &self,
        id: &RecipeId,
        edit_key: &EditKey,
        action: EditAction,
    ) -> Result<EditOutcome, Error>;
}
