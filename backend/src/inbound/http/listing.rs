//! Paginated listings reached by GET.
//!
//! ```text
//! GET /            GET /index
//! GET /categories
//! GET /categories/{name}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, routes, web};
use pagination::{PageLinks, PageQuery, PageRequest};

use crate::domain::{CategoryName, Error};
use crate::inbound::http::PageResult;
use crate::inbound::http::pages::{categories_page, html_response, listing_page};
use crate::inbound::http::state::HttpState;

/// Every recipe, grouped by category.
#[routes]
#[get("/")]
#[get("/index")]
pub async fn index(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> PageResult<HttpResponse> {
    let page = state
        .query
        .landing_page(PageRequest::from(query.into_inner()))
        .await?;
    let links = PageLinks::new(&req.full_url(), page.window());
    Ok(html_response(
        StatusCode::OK,
        listing_page("All recipes", &page, &links),
    ))
}

/// Every category.
#[get("/categories")]
pub async fn categories(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let categories = state.query.categories().await?;
    Ok(html_response(StatusCode::OK, categories_page(&categories)))
}

/// One category's recipes by name; unknown categories are 404.
#[get("/categories/{name}")]
pub async fn category_page(
    state: web::Data<HttpState>,
    req: HttpRequest,
    name: web::Path<String>,
    query: web::Query<PageQuery>,
) -> PageResult<HttpResponse> {
    let raw = name.into_inner();
    let category =
        CategoryName::new(&raw).map_err(|_| Error::not_found(format!("category {raw} not found")))?;
    let page = state
        .query
        .category_page(&category, PageRequest::from(query.into_inner()))
        .await?;
    let links = PageLinks::new(&req.full_url(), page.window());
    Ok(html_response(
        StatusCode::OK,
        listing_page(category.as_ref(), &page, &links),
    ))
}
