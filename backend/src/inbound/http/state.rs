//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data`, so they depend only
//! on the driving ports and can be exercised against the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{RecipeCommand, RecipeQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Listings and lookups.
    pub query: Arc<dyn RecipeQuery>,
    /// Create, edit and delete.
    pub command: Arc<dyn RecipeCommand>,
}

impl HttpState {
    /// Bundle the two driving ports.
    pub fn new(query: Arc<dyn RecipeQuery>, command: Arc<dyn RecipeCommand>) -> Self {
        Self { query, command }
    }
}
