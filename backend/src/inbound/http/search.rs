//! Text search and category/time filtering.
//!
//! ```text
//! GET  /search
//! POST /searchresults?offset=N    body: query
//! POST /filterresults?offset=N    body: cat_filter, time_filter
//! ```
//!
//! Results arrive by POST, so paging controls are small forms that re-post
//! the submitted criteria with a new `offset`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use pagination::{PageQuery, PageRequest};

use crate::inbound::http::PageResult;
use crate::inbound::http::forms::{FilterForm, SearchForm};
use crate::inbound::http::pages::{ResultsCriteria, html_response, results_page, search_page};
use crate::inbound::http::state::HttpState;

/// Search and filter forms.
#[get("/search")]
pub async fn search(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let categories = state.query.categories().await?;
    Ok(html_response(StatusCode::OK, search_page(&categories)))
}

/// Recipes whose name or ingredients match the query, most relevant first.
#[post("/searchresults")]
pub async fn search_results(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
    form: web::Form<SearchForm>,
) -> PageResult<HttpResponse> {
    let page = state
        .query
        .search(&form.search_query(), PageRequest::from(query.into_inner()))
        .await?;
    let criteria = ResultsCriteria {
        action: "/searchresults",
        fields: vec![("query", form.raw().to_owned())],
    };
    let title = format!("Results for \"{}\"", form.raw().trim());
    Ok(html_response(
        StatusCode::OK,
        results_page(&title, &page, &criteria),
    ))
}

/// Recipes in a category within a total-time bucket.
#[post("/filterresults")]
pub async fn filter_results(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
    form: web::Form<FilterForm>,
) -> PageResult<HttpResponse> {
    let category = form.category()?;
    let bucket = form.bucket();
    let page = state
        .query
        .filter(&category, bucket, PageRequest::from(query.into_inner()))
        .await?;
    let criteria = ResultsCriteria {
        action: "/filterresults",
        fields: vec![
            ("cat_filter", category.to_string()),
            (
                "time_filter",
                form.time_filter.clone().unwrap_or_default(),
            ),
        ],
    };
    let title = format!("{category}, {}", bucket.label());
    Ok(html_response(
        StatusCode::OK,
        results_page(&title, &page, &criteria),
    ))
}
