//! HTTP inbound adapter serving the HTML catalogue.
//!
//! Handlers extract form and query input, call the driving ports held in
//! [`state::HttpState`] and render [`pages`]. Domain errors render as HTML
//! error pages via [`error`].

pub mod error;
pub mod forms;
pub mod health;
pub mod listing;
pub mod pages;
pub mod recipes;
pub mod search;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::{HttpResponse, web};

pub use error::PageResult;

use crate::domain::Error;

/// Register every catalogue route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(listing::index)
        .service(listing::categories)
        .service(listing::category_page)
        .service(recipes::view_recipe)
        .service(recipes::add_recipe)
        .service(recipes::insert_recipe)
        .service(recipes::edit_recipe)
        .service(recipes::submit_edit)
        .service(search::search)
        .service(search::search_results)
        .service(search::filter_results);
}

/// Fallback for unknown routes.
pub async fn not_found() -> PageResult<HttpResponse> {
    Err(Error::not_found("page not found"))
}
