//! One-shot flash messages carried in the session cookie.
//!
//! Handlers push a warning before redirecting; the page that follows takes
//! the pending messages, which clears them.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::Error;

pub(crate) const FLASH_KEY: &str = "flash_warnings";

/// Session wrapper exposing flash-message operations.
#[derive(Clone)]
pub struct FlashMessages(Session);

impl FlashMessages {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Queue `message` for the next rendered page.
    pub fn push_warning(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut pending = self.pending();
        pending.push(message.into());
        self.0
            .insert(FLASH_KEY, pending)
            .map_err(|error| Error::internal(format!("failed to persist flash message: {error}")))
    }

    /// Drain every queued message.
    pub fn take(&self) -> Vec<String> {
        let pending = self.pending();
        if !pending.is_empty() {
            self.0.remove(FLASH_KEY);
        }
        pending
    }

    fn pending(&self) -> Vec<String> {
        match self.0.get::<Vec<String>>(FLASH_KEY) {
            Ok(messages) => messages.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "discarding unreadable flash messages");
                Vec::new()
            }
        }
    }
}

impl FromRequest for FlashMessages {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(FlashMessages::new) })
    }
}
