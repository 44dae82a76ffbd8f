//! Wire payload types for the comparison API
//!
//! Field names are camelCase on the wire (`similarityScore`, `riskTier`)
//! for compatibility with existing consumers of the comparison endpoint.

use crate::tier::RiskTier;
use serde::{Deserialize, Serialize};

/// Per-file metadata echoed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Original (client-side) file name
    pub name: String,
    /// File size in bytes
    pub size: u64,
}

/// Successful comparison response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    /// Human-readable status message
    pub message: String,
    /// Integer similarity score in [0,100]
    pub similarity_score: u8,
    /// Risk tier derived from the score
    pub risk_tier: RiskTier,
    /// Metadata for the first uploaded file
    pub file1: FileMeta,
    /// Metadata for the second uploaded file
    pub file2: FileMeta,
}

/// Failure response for any pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable message, always present
    pub message: String,
    /// Machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Internal detail, only populated in diagnostic mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_response_uses_camel_case() {
        let resp = CompareResponse {
            message: "Comparison completed successfully".to_string(),
            similarity_score: 42,
            risk_tier: RiskTier::Low,
            file1: FileMeta {
                name: "a.png".to_string(),
                size: 10,
            },
            file2: FileMeta {
                name: "b.png".to_string(),
                size: 20,
            },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["similarityScore"], 42);
        assert_eq!(json["riskTier"], "low");
        assert_eq!(json["file1"]["name"], "a.png");
        assert_eq!(json["file2"]["size"], 20);
    }

    #[test]
    fn error_response_omits_empty_fields() {
        let resp = ErrorResponse {
            message: "Comparison failed".to_string(),
            code: Some("SCORING_FAILED".to_string()),
            detail: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("detail"));
        assert!(json.contains("SCORING_FAILED"));
    }
}
