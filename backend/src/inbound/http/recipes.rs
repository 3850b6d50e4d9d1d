//! Recipe view and key-guarded writes.
//!
//! ```text
//! GET  /view_recipe/{id}
//! GET  /add_recipe
//! POST /insert_recipe
//! POST /edit_recipe/{id}
//! POST /submit_edit/{id}
//! ```
//!
//! Writes answer with `303 See Other`. A wrong edit key is not an error
//! page: the client is sent back to the recipe with a flash warning.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::domain::ports::{EditAuthorization, EditOutcome};
use crate::domain::{Error, RecipeId};
use crate::inbound::http::PageResult;
use crate::inbound::http::forms::{EditKeyForm, RecipeForm};
use crate::inbound::http::pages::{add_recipe_page, edit_recipe_page, html_response, recipe_page};
use crate::inbound::http::session::FlashMessages;
use crate::inbound::http::state::HttpState;

/// Warning shown after a rejected edit key.
pub const INCORRECT_EDIT_KEY: &str = "Incorrect edit key";

fn parse_id(raw: &str) -> Result<RecipeId, Error> {
    RecipeId::parse(raw).map_err(|_| Error::not_found(format!("recipe {raw} not found")))
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn view_location(id: RecipeId) -> String {
    format!("/view_recipe/{id}")
}

fn deny(flash: &FlashMessages, id: RecipeId) -> PageResult<HttpResponse> {
    flash.push_warning(INCORRECT_EDIT_KEY)?;
    Ok(see_other(&view_location(id)))
}

/// One recipe, with any pending flash warnings.
#[get("/view_recipe/{id}")]
pub async fn view_recipe(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    id: web::Path<String>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&id)?;
    let recipe = state.query.recipe(&id).await?;
    Ok(html_response(
        StatusCode::OK,
        recipe_page(&recipe, &flash.take()),
    ))
}

/// Empty create form.
#[get("/add_recipe")]
pub async fn add_recipe(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let categories = state.query.categories().await?;
    Ok(html_response(StatusCode::OK, add_recipe_page(&categories)))
}

/// Create a recipe and redirect to it.
#[post("/insert_recipe")]
pub async fn insert_recipe(
    state: web::Data<HttpState>,
    form: web::Form<RecipeForm>,
) -> PageResult<HttpResponse> {
    let mut form = form.into_inner();
    let edit_key = form.take_edit_key();
    let draft = form.into_draft()?;
    let id = state.command.create(draft, edit_key).await?;
    Ok(see_other(&view_location(id)))
}

/// Check the edit key; show the edit form or bounce back with a warning.
#[post("/edit_recipe/{id}")]
pub async fn edit_recipe(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    id: web::Path<String>,
    form: web::Form<EditKeyForm>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&id)?;
    let edit_key = form.into_inner().into_edit_key();
    match state.command.authorize_edit(&id, &edit_key).await? {
        EditAuthorization::Granted(recipe) => {
            let categories = state.query.categories().await?;
            Ok(html_response(
                StatusCode::OK,
                edit_recipe_page(&recipe, &categories, edit_key.expose()),
            ))
        }
        EditAuthorization::Denied => deny(&flash, id),
    }
}

/// Apply an update or, when the delete box is ticked, remove the recipe.
#[post("/submit_edit/{id}")]
pub async fn submit_edit(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    id: web::Path<String>,
    form: web::Form<RecipeForm>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&id)?;
    let mut form = form.into_inner();
    let edit_key = form.take_edit_key();
    let action = form.into_edit_action()?;
    match state.command.submit_edit(&id, &edit_key, action).await? {
        EditOutcome::Updated => Ok(see_other(&view_location(id))),
        EditOutcome::Deleted => {
            info!(recipe_id = %id, "redirecting to listing after delete");
            Ok(see_other("/"))
        }
        EditOutcome::Denied => deny(&flash, id),
    }
}
