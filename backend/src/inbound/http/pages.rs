//! HTML views rendered with `maud`.
//!
//! Views take domain values and return [`Markup`]; they never touch the
//! store. [`html_response`] turns markup into a response with the right
//! content type.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use maud::{DOCTYPE, Markup, html};
use pagination::{OFFSET_PARAM, Page, PageLinks, PageWindow};
use url::form_urlencoded;

use crate::domain::listing::{HALF_HOUR_SELECTOR, UP_TO_HOUR_SELECTOR};
use crate::domain::{CategoryName, Recipe, RecipeDetails, TimeBucket, join_ingredients};

/// Site name used in every page title.
pub const SITE_NAME: &str = "Veggie Patch";

/// Wrap `markup` in an HTML response with `status`.
pub fn html_response(status: StatusCode, markup: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(ContentType::html())
        .body(markup.into_string())
}

fn layout(title: &str, flashes: &[String], body: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (SITE_NAME) }
            }
            body {
                nav {
                    a href="/" { (SITE_NAME) }
                    " "
                    a href="/categories" { "Categories" }
                    " "
                    a href="/search" { "Search" }
                    " "
                    a href="/add_recipe" { "Add a recipe" }
                }
                @for flash in flashes {
                    p class="flash warning" role="alert" { (flash) }
                }
                main { (body) }
            }
        }
    }
}

fn recipe_card(recipe: &Recipe) -> Markup {
    let details = recipe.details();
    html! {
        article class="recipe-card" {
            @if !details.image_url().is_empty() {
                img src=(details.image_url()) alt=(details.name());
            }
            h3 { a href={ "/view_recipe/" (recipe.id()) } { (details.name()) } }
            p class="category" { (details.category()) }
            p class="time" { (details.total_time()) " minutes" }
        }
    }
}

fn recipe_grid(recipes: &[Recipe]) -> Markup {
    html! {
        @if recipes.is_empty() {
            p class="empty" { "No recipes found." }
        } @else {
            section class="recipes" {
                @for recipe in recipes { (recipe_card(recipe)) }
            }
        }
    }
}

fn position(window: &PageWindow, shown: usize) -> Markup {
    html! {
        p class="position" {
            @if shown == 0 {
                "Showing 0 of " (window.total())
            } @else {
                "Showing " (window.offset() + 1) "–" (window.offset() + shown as u64)
                " of " (window.total())
            }
        }
    }
}

/// A full page may be followed by more records, so it offers a next page
/// even when that page turns out empty. A short page is always the last.
fn offers_next(page: &Page<Recipe>) -> bool {
    u32::try_from(page.items().len()).is_ok_and(|shown| shown >= page.window().limit())
}

/// Path of a category listing with the name encoded as one path segment.
fn category_href(category: &CategoryName) -> String {
    let segment: String = form_urlencoded::byte_serialize(category.as_ref().as_bytes()).collect();
    format!("/categories/{}", segment.replace('+', "%20"))
}

/// A listing reached by GET, with plain next/previous links.
pub fn listing_page(title: &str, page: &Page<Recipe>, links: &PageLinks) -> Markup {
    let window = page.window();
    let body = html! {
        h1 { (title) }
        (recipe_grid(page.items()))
        (position(window, page.items().len()))
        nav class="pager" {
            @if window.offset() > 0 {
                a rel="prev" href=(links.prev_href()) { "Previous" }
            }
            " "
            @if offers_next(page) {
                a rel="next" href=(links.next_href()) { "Next" }
            }
        }
    };
    layout(title, &[], &body)
}

/// Form fields a POST listing re-submits to move between pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsCriteria {
    /// Endpoint the paging forms post to.
    pub action: &'static str,
    /// Hidden field name/value pairs carrying the submitted criteria.
    pub fields: Vec<(&'static str, String)>,
}

fn pager_form(criteria: &ResultsCriteria, offset: i64, label: &str, rel: &str) -> Markup {
    html! {
        form method="post" action={ (criteria.action) "?" (OFFSET_PARAM) "=" (offset) } class=(rel) {
            @for (name, value) in &criteria.fields {
                input type="hidden" name=(name) value=(value);
            }
            button type="submit" { (label) }
        }
    }
}

/// A listing reached by POST; paging re-posts the criteria.
pub fn results_page(title: &str, page: &Page<Recipe>, criteria: &ResultsCriteria) -> Markup {
    let window = page.window();
    let body = html! {
        h1 { (title) }
        (recipe_grid(page.items()))
        (position(window, page.items().len()))
        nav class="pager" {
            @if window.offset() > 0 {
                (pager_form(criteria, window.prev_offset(), "Previous", "prev"))
            }
            @if offers_next(page) {
                (pager_form(criteria, window.next_offset(), "Next", "next"))
            }
        }
    };
    layout(title, &[], &body)
}

/// Full recipe view with the edit-key prompt.
pub fn recipe_page(recipe: &Recipe, flashes: &[String]) -> Markup {
    let details = recipe.details();
    let body = html! {
        article class="recipe" {
            h1 { (details.name()) }
            @if !details.image_url().is_empty() {
                img src=(details.image_url()) alt=(details.name());
            }
            dl {
                dt { "Category" }
                dd { a href=(category_href(details.category())) { (details.category()) } }
                dt { "Preparation" } dd { (details.prep_time()) " minutes" }
                dt { "Cooking" } dd { (details.cook_time()) " minutes" }
                dt { "Total" } dd { (details.total_time()) " minutes" }
                dt { "Serves" } dd { (details.serves()) }
            }
            h2 { "Ingredients" }
            ul class="ingredients" {
                @for ingredient in details.ingredients() { li { (ingredient) } }
            }
            h2 { "Method" }
            p class="instructions" { (details.instructions()) }
        }
        form method="post" action={ "/edit_recipe/" (recipe.id()) } class="edit-key" {
            label for="edit_key" { "Edit key" }
            input type="password" id="edit_key" name="edit_key" required;
            button type="submit" { "Edit" }
        }
    };
    layout(details.name(), flashes, &body)
}

fn category_options(categories: &[CategoryName], selected: Option<&CategoryName>) -> Markup {
    html! {
        @for category in categories {
            option value=(category) selected[selected == Some(category)] { (category) }
        }
    }
}

fn recipe_fields(categories: &[CategoryName], current: Option<&RecipeDetails>) -> Markup {
    let text = |value: fn(&RecipeDetails) -> String| current.map(value).unwrap_or_default();
    html! {
        label for="recipe_name" { "Name" }
        input type="text" id="recipe_name" name="recipe_name" required
            value=(text(|d| d.name().to_owned()));
        label for="category_name" { "Category" }
        select id="category_name" name="category_name" required {
            (category_options(categories, current.map(RecipeDetails::category)))
        }
        label for="prep_time" { "Preparation minutes" }
        input type="number" min="0" id="prep_time" name="prep_time" required
            value=(text(|d| d.prep_time().to_string()));
        label for="cook_time" { "Cooking minutes" }
        input type="number" min="0" id="cook_time" name="cook_time" required
            value=(text(|d| d.cook_time().to_string()));
        label for="serves" { "Serves" }
        input type="text" id="serves" name="serves" value=(text(|d| d.serves().to_owned()));
        label for="ingredients" { "Ingredients (separated by ;)" }
        input type="text" id="ingredients" name="ingredients" required
            value=(text(|d| join_ingredients(d.ingredients())));
        label for="image_url" { "Image URL" }
        input type="url" id="image_url" name="image_url"
            value=(text(|d| d.image_url().to_owned()));
        label for="instructions" { "Method" }
        textarea id="instructions" name="instructions" { (text(|d| d.instructions().to_owned())) }
    }
}

/// Empty create form.
pub fn add_recipe_page(categories: &[CategoryName]) -> Markup {
    let body = html! {
        h1 { "Add a recipe" }
        form method="post" action="/insert_recipe" {
            (recipe_fields(categories, None))
            label for="edit_key" { "Edit key" }
            input type="password" id="edit_key" name="edit_key" required;
            button type="submit" { "Add recipe" }
        }
    };
    layout("Add a recipe", &[], &body)
}

/// Edit form pre-filled from `recipe`; the key travels in a hidden field.
pub fn edit_recipe_page(recipe: &Recipe, categories: &[CategoryName], edit_key: &str) -> Markup {
    let title = format!("Edit {}", recipe.details().name());
    let body = html! {
        h1 { (title) }
        form method="post" action={ "/submit_edit/" (recipe.id()) } {
            input type="hidden" name="edit_key" value=(edit_key);
            (recipe_fields(categories, Some(recipe.details())))
            label {
                input type="checkbox" name="delete" value="on";
                " Delete this recipe"
            }
            button type="submit" { "Save" }
        }
    };
    layout(&title, &[], &body)
}

/// Every category with a link to its listing.
pub fn categories_page(categories: &[CategoryName]) -> Markup {
    let body = html! {
        h1 { "Categories" }
        ul class="categories" {
            @for category in categories {
                li { a href=(category_href(category)) { (category) } }
            }
        }
    };
    layout("Categories", &[], &body)
}

/// Text search and category/time filter forms.
pub fn search_page(categories: &[CategoryName]) -> Markup {
    let buckets = [
        (HALF_HOUR_SELECTOR, TimeBucket::HalfHour),
        (UP_TO_HOUR_SELECTOR, TimeBucket::UpToHour),
        ("61", TimeBucket::OverHour),
    ];
    let body = html! {
        h1 { "Search" }
        form method="post" action="/searchresults" class="search" {
            label for="query" { "Name or ingredient" }
            input type="search" id="query" name="query" required;
            button type="submit" { "Search" }
        }
        form method="post" action="/filterresults" class="filter" {
            label for="cat_filter" { "Category" }
            select id="cat_filter" name="cat_filter" { (category_options(categories, None)) }
            label for="time_filter" { "Total time" }
            select id="time_filter" name="time_filter" {
                @for (selector, bucket) in buckets {
                    option value=(selector) { (bucket.label()) }
                }
            }
            button type="submit" { "Filter" }
        }
    };
    layout("Search", &[], &body)
}

/// Error page carrying a title and a message only.
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = html! {
        h1 { (status.as_u16()) " " (title) }
        p class="error" { (message) }
        p { a href="/" { "Back to all recipes" } }
    };
    layout(title, &[], &body)
}
