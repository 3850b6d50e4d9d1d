//! Recipe categories.
//!
//! Categories are referenced from recipes by name rather than by identifier,
//! so the name is the whole of the entity.

use std::fmt;

/// Validation failures for [`CategoryName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    /// Category names must carry text.
    #[error("category name must not be empty")]
    Empty,
}

/// Trimmed, non-empty category name.
///
/// # Examples
/// ```
/// use veggie_patch::domain::CategoryName;
///
/// let name = CategoryName::new("  Dinner ").expect("valid name");
/// assert_eq!(name.as_ref(), "Dinner");
/// assert!(CategoryName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Validate and construct a category name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, CategoryValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}
