//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};

use crate::domain::RecipeCatalogueService;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure, not_found};
use crate::outbound::memory::InMemoryRecipeStore;

/// Session middleware with a fresh key, a `session` cookie and no `Secure`
/// flag so plain HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state backed by a seeded in-memory store, plus the store itself
/// for arranging and inspecting records.
pub fn memory_state() -> (HttpState, Arc<InMemoryRecipeStore>) {
    let store = Arc::new(InMemoryRecipeStore::new());
    let service = Arc::new(RecipeCatalogueService::new(store.clone(), store.clone()));
    (HttpState::new(service.clone(), service), store)
}

/// Every catalogue route behind a test session, with the 404 fallback.
pub async fn init_catalogue(
    state: HttpState,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .configure(configure)
            .default_service(web::to(not_found)),
    )
    .await
}

/// The session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Response body as UTF-8 text.
pub async fn body_text(res: ServiceResponse<impl MessageBody>) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 page")
}
