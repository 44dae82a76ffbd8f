//! HTTP API: routing, handlers and response assembly

pub mod handlers;
pub mod respond;
