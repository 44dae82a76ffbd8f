//! Scoring orchestration
//!
//! Owns the transition from a pending [`ComparisonRequest`] to a
//! [`ComparisonResult`]: exactly one engine call per request, a bounded
//! wait, and defensive validation of the engine's answer. A failed
//! request is never retried here; the caller resubmits as a new request.

use crate::models::{ComparisonRequest, ComparisonResult, RequestStatus};
use crate::scoring::ScoringEngine;
use artscan_common::{Error, Result, RiskTier};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub struct ScoringOrchestrator {
    engine: Arc<dyn ScoringEngine>,
    timeout: Duration,
}

impl ScoringOrchestrator {
    pub fn new(engine: Arc<dyn ScoringEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// Score a pending request, resolving it to Completed or Failed
    ///
    /// Timeout cancels the in-flight engine call (the future is dropped),
    /// so the request never stays ambiguous.
    pub async fn run(&self, request: &mut ComparisonRequest) -> Result<ComparisonResult> {
        if request.status != RequestStatus::Pending {
            return Err(Error::Internal(format!(
                "comparison {} was already scored",
                request.id
            )));
        }
        request.status = RequestStatus::Scoring;

        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.timeout,
            self.engine.score(&request.asset_a, &request.asset_b),
        )
        .await;

        let raw = match outcome {
            Err(_elapsed) => {
                request.status = RequestStatus::Failed;
                warn!(
                    request_id = %request.id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Scoring engine timed out"
                );
                return Err(Error::ScoringTimeout);
            }
            Ok(Err(engine_error)) => {
                request.status = RequestStatus::Failed;
                // Cause is logged for diagnostics; the responder decides
                // what the caller gets to see
                warn!(
                    request_id = %request.id,
                    error = %engine_error,
                    "Scoring engine failed"
                );
                return Err(Error::ScoringFailed(engine_error.to_string()));
            }
            Ok(Ok(raw)) => raw,
        };

        if !(0..=100).contains(&raw) {
            request.status = RequestStatus::Failed;
            warn!(
                request_id = %request.id,
                score = raw,
                "Scoring engine violated its contract"
            );
            return Err(Error::ScoringContractViolation(raw));
        }
        let score = raw as u8;

        request.status = RequestStatus::Completed;
        let duration_ms = started.elapsed().as_millis() as u64;
        let tier = RiskTier::classify(score);
        info!(
            request_id = %request.id,
            score = score,
            tier = %tier,
            duration_ms = duration_ms,
            "Comparison complete"
        );

        Ok(ComparisonResult {
            request_id: request.id,
            score,
            tier,
            completed_at: Utc::now(),
            duration_ms,
        })
    }
}
