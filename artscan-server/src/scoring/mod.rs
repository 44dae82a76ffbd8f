//! Similarity scoring
//!
//! The scoring algorithm itself is a pluggable capability behind the
//! [`ScoringEngine`] trait; the orchestrator owns the call policy
//! (one call per request, bounded wait, contract enforcement).

pub mod digest;
pub mod orchestrator;
pub mod remote;

pub use digest::DigestEngine;
pub use orchestrator::ScoringOrchestrator;
pub use remote::RemoteEngine;

use crate::store::Asset;
use async_trait::async_trait;
use thiserror::Error;

/// Scoring engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine could not be reached
    #[error("Scoring engine unreachable: {0}")]
    Unreachable(String),

    /// Engine answered with a non-success status
    #[error("Scoring engine error {0}: {1}")]
    Api(u16, String),

    /// Engine response could not be parsed
    #[error("Failed to parse scoring engine response: {0}")]
    Parse(String),

    /// I/O error reading a stored asset
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability computing a similarity score for two stored assets
///
/// Contract: returns an integer in [0,100]. The raw value is kept wide
/// (`i64`) so the orchestrator can detect a misbehaving engine instead of
/// silently truncating. Engines are stateless and may be invoked for
/// multiple requests concurrently.
#[async_trait]
pub trait ScoringEngine: Send + Sync {
    async fn score(&self, first: &Asset, second: &Asset) -> Result<i64, EngineError>;
}
