//! Comparison request and result records

use crate::store::Asset;
use artscan_common::RiskTier;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lifecycle of a comparison request
///
/// A request always resolves to exactly one of Completed or Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Scoring,
    Completed,
    Failed,
}

/// A unit of work pairing exactly two stored assets for scoring
#[derive(Debug)]
pub struct ComparisonRequest {
    pub id: Uuid,
    pub asset_a: Asset,
    pub asset_b: Asset,
    pub status: RequestStatus,
    pub requested_at: DateTime<Utc>,
}

impl ComparisonRequest {
    pub fn new(asset_a: Asset, asset_b: Asset) -> Self {
        // The gateway stores each upload under its own unique name, so the
        // two assets are always distinct files
        debug_assert_ne!(asset_a.stored_path, asset_b.stored_path);
        Self {
            id: Uuid::new_v4(),
            asset_a,
            asset_b,
            status: RequestStatus::Pending,
            requested_at: Utc::now(),
        }
    }
}

/// Outcome of a successfully scored comparison, immutable once created
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub request_id: Uuid,
    /// Integer similarity score in [0,100]
    pub score: u8,
    /// Risk tier derived from the score
    pub tier: RiskTier,
    pub completed_at: DateTime<Utc>,
    /// Wall-clock scoring duration
    pub duration_ms: u64,
}
