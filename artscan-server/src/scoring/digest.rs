//! Built-in fallback scoring engine
//!
//! Deterministic byte-level comparison used when no remote analysis
//! service is configured, and in tests. Byte-identical inputs always
//! score 100; otherwise the score is the fraction of positions with
//! matching bytes. This is a coarse stand-in, not a perceptual measure.

use super::{EngineError, ScoringEngine};
use crate::store::Asset;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Deterministic built-in scoring engine
#[derive(Debug, Default)]
pub struct DigestEngine;

impl DigestEngine {
    pub fn new() -> Self {
        Self
    }

    fn compare_bytes(first: &[u8], second: &[u8]) -> i64 {
        if Sha256::digest(first) == Sha256::digest(second) {
            return 100;
        }
        let longest = first.len().max(second.len());
        if longest == 0 {
            return 100;
        }
        let matching = first
            .iter()
            .zip(second.iter())
            .filter(|(a, b)| a == b)
            .count();
        // Widened so matching * 100 cannot overflow usize on 32-bit
        // targets with files near the upload limit
        (matching as u64 * 100 / longest as u64) as i64
    }
}

#[async_trait]
impl ScoringEngine for DigestEngine {
    async fn score(&self, first: &Asset, second: &Asset) -> Result<i64, EngineError> {
        let bytes_a = tokio::fs::read(&first.stored_path).await?;
        let bytes_b = tokio::fs::read(&second.stored_path).await?;

        let score = Self::compare_bytes(&bytes_a, &bytes_b);
        tracing::debug!(
            first = %first.stored_path.display(),
            second = %second.stored_path.display(),
            score = score,
            "Digest comparison complete"
        );
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AssetStore, LocalAssetStore};

    async fn stored(store: &LocalAssetStore, field: &str, data: &[u8]) -> Asset {
        store
            .store(field, "img.png", "image/png", data)
            .await
            .unwrap()
    }

    #[test]
    fn identical_bytes_score_maximum() {
        assert_eq!(DigestEngine::compare_bytes(b"abcdef", b"abcdef"), 100);
    }

    #[test]
    fn disjoint_bytes_score_zero() {
        assert_eq!(
            DigestEngine::compare_bytes(&[0u8; 64], &[0xffu8; 64]),
            0
        );
    }

    #[test]
    fn partial_overlap_scores_between() {
        let first = [1u8, 2, 3, 4];
        let second = [1u8, 2, 9, 9];
        assert_eq!(DigestEngine::compare_bytes(&first, &second), 50);
    }

    #[test]
    fn large_inputs_score_without_overflow() {
        // Large enough that matching * 100 exceeds u32::MAX
        let len = 45 * 1024 * 1024;
        let first = vec![3u8; len];
        let mut second = first.clone();
        second[len - 1] = 0;
        assert_eq!(DigestEngine::compare_bytes(&first, &second), 99);
    }

    #[test]
    fn score_stays_in_contract_range() {
        let first = vec![7u8; 1000];
        let mut second = first.clone();
        second[999] = 0;
        let score = DigestEngine::compare_bytes(&first, &second);
        assert!((0..=100).contains(&score));
    }

    #[tokio::test]
    async fn identical_stored_files_score_maximum() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(tmp.path()).unwrap();
        let first = stored(&store, "file1", b"same image bytes").await;
        let second = stored(&store, "file2", b"same image bytes").await;

        let engine = DigestEngine::new();
        assert_eq!(engine.score(&first, &second).await.unwrap(), 100);
    }
}
