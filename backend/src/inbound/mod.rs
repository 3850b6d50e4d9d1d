//! Inbound adapters translating HTTP requests into catalogue port calls while
//! keeping framework details at the edge.

pub mod http;
