//! Behavioural coverage for key-guarded recipe writes.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;
use veggie_patch::domain::ports::{EditAction, EditOutcome, RecipeCommand, RecipeQuery};
use veggie_patch::domain::{EditKey, ErrorCode, RecipeCatalogueService, RecipeDraft, RecipeId};
use veggie_patch::outbound::memory::InMemoryRecipeStore;

type Service = RecipeCatalogueService<InMemoryRecipeStore, InMemoryRecipeStore>;

struct EditWorld {
    runtime: Runtime,
    service: Service,
    recipe: RefCell<Option<RecipeId>>,
    outcome: RefCell<Option<EditOutcome>>,
}

impl EditWorld {
    fn recipe(&self) -> RecipeId {
        self.recipe
            .borrow()
            .expect("a recipe should have been created")
    }
}

fn draft(prep_time: u32, cook_time: u32) -> RecipeDraft {
    RecipeDraft {
        name: "Leek soup".to_owned(),
        category: "Lunch".to_owned(),
        prep_time,
        cook_time,
        serves: "4".to_owned(),
        ingredients: vec!["leeks".to_owned(), "stock".to_owned()],
        image_url: String::new(),
        instructions: "Simmer.".to_owned(),
    }
}

#[fixture]
fn world() -> EditWorld {
    let store = Arc::new(InMemoryRecipeStore::new());
    EditWorld {
        runtime: Runtime::new().expect("tokio runtime"),
        service: RecipeCatalogueService::new(store.clone(), store),
        recipe: RefCell::new(None),
        outcome: RefCell::new(None),
    }
}

#[given("a recipe taking {prep} plus {cook} minutes guarded by {key}")]
fn a_guarded_recipe(world: &EditWorld, prep: u32, cook: u32, key: String) {
    let id = world
        .runtime
        .block_on(world.service.create(draft(prep, cook), EditKey::new(key)))
        .expect("recipe created");
    *world.recipe.borrow_mut() = Some(id);
}

#[when("the editor submits {prep} plus {cook} minutes with {key}")]
fn the_editor_submits(world: &EditWorld, prep: u32, cook: u32, key: String) {
    let outcome = world
        .runtime
        .block_on(world.service.submit_edit(
            &world.recipe(),
            &EditKey::new(key),
            EditAction::Update(draft(prep, cook)),
        ))
        .expect("edit processed");
    *world.outcome.borrow_mut() = Some(outcome);
}

#[when("the editor deletes it with {key}")]
fn the_editor_deletes(world: &EditWorld, key: String) {
    let outcome = world
        .runtime
        .block_on(
            world
                .service
                .submit_edit(&world.recipe(), &EditKey::new(key), EditAction::Delete),
        )
        .expect("delete processed");
    *world.outcome.borrow_mut() = Some(outcome);
}

#[then("the outcome is {outcome}")]
fn the_outcome_is(world: &EditWorld, outcome: String) {
    let observed = world.outcome.borrow().expect("an edit should have run");
    assert_eq!(format!("{observed:?}"), outcome);
}

#[then("its total time is {total}")]
fn its_total_time_is(world: &EditWorld, total: u32) {
    let recipe = world
        .runtime
        .block_on(world.service.recipe(&world.recipe()))
        .expect("recipe present");
    assert_eq!(recipe.details().total_time(), total);
}

#[then("the recipe is gone")]
fn the_recipe_is_gone(world: &EditWorld) {
    let error = world
        .runtime
        .block_on(world.service.recipe(&world.recipe()))
        .expect_err("recipe removed");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[scenario(
    path = "tests/features/edit_key_guard.feature",
    name = "The right key overwrites the recipe and recomputes its total time"
)]
fn right_key_overwrites(world: EditWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/edit_key_guard.feature",
    name = "A wrong key leaves the recipe untouched"
)]
fn wrong_key_leaves_recipe_untouched(world: EditWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/edit_key_guard.feature",
    name = "The delete flag removes the recipe"
)]
fn delete_flag_removes_recipe(world: EditWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/edit_key_guard.feature",
    name = "Deleting with a wrong key keeps the recipe"
)]
fn wrong_key_delete_keeps_recipe(world: EditWorld) {
    drop(world);
}
