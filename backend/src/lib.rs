//! Veggie Patch: a server-rendered recipe catalogue.
//!
//! - [`domain`]: recipes, listings, edit keys and the catalogue service.
//! - [`inbound`]: the actix-web HTML adapter.
//! - [`outbound`]: PostgreSQL and in-memory stores.
//! - [`middleware`]: request tracing.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::{TRACE_ID_HEADER, Trace};
