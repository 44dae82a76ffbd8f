//! Shared types for the artscan services
//!
//! Carries the error taxonomy, risk classification, wire payload types and
//! configuration resolution used by both the comparison server and the
//! client crate.

pub mod api;
pub mod config;
pub mod error;
pub mod tier;

pub use error::{Error, Result};
pub use tier::RiskTier;
