//! Builders shared by domain and adapter tests.

use super::{EditKey, EditKeyHash, NewRecipe, Recipe, RecipeDetails, RecipeDraft, RecipeId};

/// Edit key used by every fixture recipe.
pub(crate) const FIXTURE_KEY: &str = "parsley";

pub(crate) fn draft_with(
    name: &str,
    category: &str,
    prep_time: u32,
    cook_time: u32,
) -> RecipeDraft {
    RecipeDraft {
        name: name.to_owned(),
        category: category.to_owned(),
        prep_time,
        cook_time,
        serves: "2".to_owned(),
        ingredients: vec!["leeks".to_owned(), "potato".to_owned(), "stock".to_owned()],
        image_url: "https://img.test/recipe.jpg".to_owned(),
        instructions: "Simmer until soft.".to_owned(),
    }
}

pub(crate) fn new_recipe_with(
    name: &str,
    category: &str,
    prep_time: u32,
    cook_time: u32,
) -> NewRecipe {
    NewRecipe {
        details: RecipeDetails::try_from(draft_with(name, category, prep_time, cook_time))
            .expect("fixture draft is valid"),
        edit_key: EditKeyHash::derive(&EditKey::new(FIXTURE_KEY)),
    }
}

pub(crate) fn recipe_with(name: &str, category: &str, prep_time: u32, cook_time: u32) -> Recipe {
    let NewRecipe { details, edit_key } = new_recipe_with(name, category, prep_time, cook_time);
    Recipe::new(RecipeId::random(), details, edit_key)
}
