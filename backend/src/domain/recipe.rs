//! Recipe aggregate.
//!
//! A recipe is written from a [`RecipeDraft`], which carries the typed
//! values of a submission. Converting the draft into [`RecipeDetails`] is the
//! only way to obtain details, and it is where the stored total time is
//! derived, so the total can never drift from the preparation and cook times.

use std::fmt;

use uuid::Uuid;

use super::{CategoryName, CategoryValidationError, EditKeyHash};

/// Separator between ingredients in the submitted ingredients field.
pub const INGREDIENT_DELIMITER: char = ';';

/// Validation failures raised while turning a draft into details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    /// The recipe name is blank.
    #[error("recipe name must not be empty")]
    EmptyName,
    /// The category name is blank.
    #[error(transparent)]
    Category(#[from] CategoryValidationError),
    /// Preparation plus cook time does not fit the stored range.
    #[error("total time of {prep_time} + {cook_time} minutes is too large")]
    TotalTimeOverflow {
        /// Submitted preparation minutes.
        prep_time: u32,
        /// Submitted cook minutes.
        cook_time: u32,
    },
}

/// Largest total time the store can hold.
const MAX_TOTAL_MINUTES: u32 = i32::MAX as u32;

/// Store-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Parse an identifier from its textual form.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw.trim()).map(Self)
    }

    /// Mint a fresh identifier; used by stores when inserting.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Split the ingredients field into its ordered parts.
///
/// Parts are not trimmed; `"salt; pepper"` keeps the leading space of
/// `" pepper"`.
///
/// # Examples
/// ```
/// use veggie_patch::domain::split_ingredients;
///
/// assert_eq!(split_ingredients("salt;pepper;oil"), ["salt", "pepper", "oil"]);
/// ```
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(INGREDIENT_DELIMITER).map(str::to_owned).collect()
}

/// Join ingredients back into the submitted field format.
pub fn join_ingredients(ingredients: &[String]) -> String {
    ingredients.join(&INGREDIENT_DELIMITER.to_string())
}

/// Typed recipe submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub category: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub serves: String,
    pub ingredients: Vec<String>,
    pub image_url: String,
    pub instructions: String,
}

/// Editable recipe fields with the derived total time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetails {
    name: String,
    category: CategoryName,
    prep_time: u32,
    cook_time: u32,
    total_time: u32,
    serves: String,
    ingredients: Vec<String>,
    image_url: String,
    instructions: String,
}

impl TryFrom<RecipeDraft> for RecipeDetails {
    type Error = RecipeValidationError;

    fn try_from(draft: RecipeDraft) -> Result<Self, Self::Error> {
        let RecipeDraft {
            name,
            category,
            prep_time,
            cook_time,
            serves,
            ingredients,
            image_url,
            instructions,
        } = draft;

        let name = name.trim();
        if name.is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        let category = CategoryName::new(category)?;
        let total_time = prep_time
            .checked_add(cook_time)
            .filter(|total| *total <= MAX_TOTAL_MINUTES)
            .ok_or(RecipeValidationError::TotalTimeOverflow {
                prep_time,
                cook_time,
            })?;

        Ok(Self {
            name: name.to_owned(),
            category,
            prep_time,
            cook_time,
            total_time,
            serves,
            ingredients,
            image_url,
            instructions,
        })
    }
}

impl RecipeDetails {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &CategoryName {
        &self.category
    }

    pub fn prep_time(&self) -> u32 {
        self.prep_time
    }

    pub fn cook_time(&self) -> u32 {
        self.cook_time
    }

    /// Preparation plus cook time, fixed when the details were built.
    pub fn total_time(&self) -> u32 {
        self.total_time
    }

    pub fn serves(&self) -> &str {
        &self.serves
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}

/// Recipe ready for insertion; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub details: RecipeDetails,
    pub edit_key: EditKeyHash,
}

/// Stored recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    details: RecipeDetails,
    edit_key: EditKeyHash,
}

impl Recipe {
    /// Assemble a stored recipe.
    pub fn new(id: RecipeId, details: RecipeDetails, edit_key: EditKeyHash) -> Self {
        Self {
            id,
            details,
            edit_key,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn details(&self) -> &RecipeDetails {
        &self.details
    }

    /// Digest of the key that authorizes edits.
    pub fn edit_key(&self) -> &EditKeyHash {
        &self.edit_key
    }

    /// Overwrite every editable field; identifier and edit key are kept.
    pub fn replace_details(&mut self, details: RecipeDetails) {
        self.details = details;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> RecipeDraft {
        RecipeDraft {
            name: "Roast squash".to_owned(),
            category: "Dinner".to_owned(),
            prep_time: 10,
            cook_time: 25,
            serves: "4".to_owned(),
            ingredients: split_ingredients("salt;pepper;oil"),
            image_url: "https://img.test/squash.jpg".to_owned(),
            instructions: "Roast it.".to_owned(),
        }
    }

    #[rstest]
    fn total_time_is_derived_from_parts(draft: RecipeDraft) {
        let details = RecipeDetails::try_from(draft).expect("valid draft");
        assert_eq!(details.total_time(), 35);
        assert_eq!(details.ingredients(), ["salt", "pepper", "oil"]);
    }

    #[rstest]
    #[case("salt;pepper;oil", &["salt", "pepper", "oil"])]
    #[case("salt; pepper", &["salt", " pepper"])]
    #[case("water", &["water"])]
    #[case("a;;b", &["a", "", "b"])]
    fn ingredients_split_without_trimming(#[case] raw: &str, #[case] expected: &[&str]) {
        assert_eq!(split_ingredients(raw), expected);
    }

    #[rstest]
    fn ingredients_join_back_to_field_format() {
        let parts = split_ingredients("salt;pepper");
        assert_eq!(join_ingredients(&parts), "salt;pepper");
    }

    #[rstest]
    fn blank_name_is_rejected(mut draft: RecipeDraft) {
        draft.name = "   ".to_owned();
        assert_eq!(
            RecipeDetails::try_from(draft),
            Err(RecipeValidationError::EmptyName)
        );
    }

    #[rstest]
    fn blank_category_is_rejected(mut draft: RecipeDraft) {
        draft.category = String::new();
        assert!(matches!(
            RecipeDetails::try_from(draft),
            Err(RecipeValidationError::Category(_))
        ));
    }

    #[rstest]
    fn oversized_total_is_rejected(mut draft: RecipeDraft) {
        draft.prep_time = u32::MAX;
        draft.cook_time = 1;
        assert!(matches!(
            RecipeDetails::try_from(draft),
            Err(RecipeValidationError::TotalTimeOverflow { .. })
        ));
    }

    #[rstest]
    fn replacing_details_keeps_identity(draft: RecipeDraft) {
        let details = RecipeDetails::try_from(draft.clone()).expect("valid draft");
        let key = EditKeyHash::derive(&crate::domain::EditKey::new("k"));
        let id = RecipeId::random();
        let mut recipe = Recipe::new(id, details, key.clone());

        let mut changed = draft;
        changed.cook_time = 50;
        recipe.replace_details(RecipeDetails::try_from(changed).expect("valid draft"));

        assert_eq!(recipe.id(), id);
        assert_eq!(recipe.edit_key(), &key);
        assert_eq!(recipe.details().total_time(), 60);
    }

    #[rstest]
    fn recipe_id_parses_uuid_text() {
        let id = RecipeId::random();
        assert_eq!(RecipeId::parse(&id.to_string()).expect("uuid"), id);
        assert!(RecipeId::parse("12").is_err());
    }
}
