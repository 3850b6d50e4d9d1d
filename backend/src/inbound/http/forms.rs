//! Form bodies and their validation.
//!
//! Every field arrives as an optional string so that a missing or malformed
//! value becomes a 400 page naming the field rather than an extractor
//! failure. Validated values are domain types; handlers never see raw form
//! strings.

use serde::Deserialize;
use serde_json::json;

use crate::domain::ports::EditAction;
use crate::domain::{
    CategoryName, EditKey, Error, RecipeDraft, SearchQuery, TimeBucket, split_ingredients,
};

/// Validation failure codes reported in error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldErrorCode {
    MissingField,
    InvalidNumber,
    InvalidValue,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidNumber => "invalid_number",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Form field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

const RECIPE_NAME: FieldName = FieldName::new("recipe_name");
const CATEGORY_NAME: FieldName = FieldName::new("category_name");
const PREP_TIME: FieldName = FieldName::new("prep_time");
const COOK_TIME: FieldName = FieldName::new("cook_time");
const INGREDIENTS: FieldName = FieldName::new("ingredients");
const CAT_FILTER: FieldName = FieldName::new("cat_filter");

fn field_error(field: FieldName, code: FieldErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn required(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| {
        field_error(
            field,
            FieldErrorCode::MissingField,
            format!("missing required field: {}", field.as_str()),
        )
    })
}

fn minutes(value: Option<String>, field: FieldName) -> Result<u32, Error> {
    let raw = required(value, field)?;
    raw.trim().parse::<u32>().map_err(|_| {
        field_error(
            field,
            FieldErrorCode::InvalidNumber,
            format!("{} must be a whole number of minutes", field.as_str()),
        )
    })
}

/// Body of `POST /insert_recipe` and `POST /submit_edit/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeForm {
    pub recipe_name: Option<String>,
    pub category_name: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub serves: Option<String>,
    /// Ingredients joined with `;`.
    pub ingredients: Option<String>,
    pub image_url: Option<String>,
    pub instructions: Option<String>,
    pub edit_key: Option<String>,
    /// Present (with any value) when the edit form's delete box is ticked.
    pub delete: Option<String>,
}

impl RecipeForm {
    /// Split off the edit key; an absent key is empty and never verifies.
    pub fn take_edit_key(&mut self) -> EditKey {
        EditKey::new(self.edit_key.take().unwrap_or_default())
    }

    /// Validate the recipe fields.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] naming the first
    /// missing field or unparsable time.
    pub fn into_draft(self) -> Result<RecipeDraft, Error> {
        let name = required(self.recipe_name, RECIPE_NAME)?;
        let category = required(self.category_name, CATEGORY_NAME)?;
        let prep_time = minutes(self.prep_time, PREP_TIME)?;
        let cook_time = minutes(self.cook_time, COOK_TIME)?;
        let ingredients = required(self.ingredients, INGREDIENTS)?;
        Ok(RecipeDraft {
            name,
            category,
            prep_time,
            cook_time,
            serves: self.serves.unwrap_or_default(),
            ingredients: split_ingredients(&ingredients),
            image_url: self.image_url.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
        })
    }

    /// Interpret a submit-edit body. The delete flag wins and skips field
    /// validation entirely.
    ///
    /// # Errors
    /// Fails as [`Self::into_draft`] does when the delete flag is absent.
    pub fn into_edit_action(self) -> Result<EditAction, Error> {
        if self.delete.is_some() {
            return Ok(EditAction::Delete);
        }
        self.into_draft().map(EditAction::Update)
    }
}

/// Body of `POST /edit_recipe/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditKeyForm {
    pub edit_key: Option<String>,
}

impl EditKeyForm {
    /// The submitted key; absent means empty.
    pub fn into_edit_key(self) -> EditKey {
        EditKey::new(self.edit_key.unwrap_or_default())
    }
}

/// Body of `POST /searchresults`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    pub query: Option<String>,
}

impl SearchForm {
    /// Raw text as submitted, for re-posting on paging forms.
    pub fn raw(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }

    /// Normalised search text; absent means empty, which matches nothing.
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(self.raw())
    }
}

/// Body of `POST /filterresults`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterForm {
    pub cat_filter: Option<String>,
    pub time_filter: Option<String>,
}

impl FilterForm {
    /// The category to filter on.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the category
    /// is absent or blank.
    pub fn category(&self) -> Result<CategoryName, Error> {
        let raw = self.cat_filter.as_deref().unwrap_or_default();
        CategoryName::new(raw).map_err(|error| {
            field_error(CAT_FILTER, FieldErrorCode::InvalidValue, error.to_string())
        })
    }

    /// Selected time bucket; anything unrecognised means over an hour.
    pub fn bucket(&self) -> TimeBucket {
        TimeBucket::from_selector(self.time_filter.as_deref().unwrap_or_default())
    }
}
