//! Result responder
//!
//! Assembles the externally visible payload from a comparison outcome.
//! Success payloads echo the score, tier and file metadata unaltered.
//! Failure payloads carry one human-readable message and a machine
//! code; internal causes are only exposed in diagnostic mode.

use crate::models::ComparisonResult;
use crate::store::Asset;
use artscan_common::api::{CompareResponse, ErrorResponse, FileMeta};
use artscan_common::Error;
use axum::http::StatusCode;
use axum::Json;

/// Build the success payload for a completed comparison
pub fn success(result: &ComparisonResult, first: &Asset, second: &Asset) -> CompareResponse {
    CompareResponse {
        message: "Comparison completed successfully".to_string(),
        similarity_score: result.score,
        risk_tier: result.tier,
        file1: FileMeta {
            name: first.original_name.clone(),
            size: first.size_bytes,
        },
        file2: FileMeta {
            name: second.original_name.clone(),
            size: second.size_bytes,
        },
    }
}

/// Build the error payload and status for a failed comparison
pub fn failure(error: &Error, diagnostics: bool) -> (StatusCode, Json<ErrorResponse>) {
    let status = status_for(error);
    let detail = diagnostics.then(|| error.to_string());
    (
        status,
        Json(ErrorResponse {
            message: public_message(error),
            code: Some(error.code().to_string()),
            detail,
        }),
    )
}

fn status_for(error: &Error) -> StatusCode {
    if error.is_client_fault() {
        StatusCode::BAD_REQUEST
    } else if matches!(error, Error::ScoringTimeout) {
        StatusCode::GATEWAY_TIMEOUT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Message shown to the caller; scoring and storage causes are suppressed
fn public_message(error: &Error) -> String {
    match error {
        Error::MissingAsset { .. } | Error::InvalidAsset { .. } | Error::MalformedRequest(_) => {
            error.to_string()
        }
        Error::ScoringTimeout | Error::ScoringFailed(_) | Error::ScoringContractViolation(_) => {
            "Comparison failed".to_string()
        }
        Error::Storage(_) | Error::Config(_) | Error::Internal(_) => {
            "Internal server error".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artscan_common::error::InvalidReason;

    #[test]
    fn missing_asset_is_client_error_naming_fields() {
        let error = Error::MissingAsset {
            fields: vec!["file2".to_string()],
        };
        let (status, Json(body)) = failure(&error, false);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.message.contains("file2"));
        assert_eq!(body.code.as_deref(), Some("MISSING_ASSET"));
    }

    #[test]
    fn invalid_asset_keeps_filename_in_message() {
        let error = Error::InvalidAsset {
            filename: "payload.exe".to_string(),
            reason: InvalidReason::UnsupportedType {
                extension: "exe".to_string(),
                mime_type: "application/octet-stream".to_string(),
            },
        };
        let (status, Json(body)) = failure(&error, false);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.message.contains("payload.exe"));
    }

    #[test]
    fn malformed_upload_is_client_error() {
        let error = Error::MalformedRequest("unexpected end of form".to_string());
        let (status, Json(body)) = failure(&error, false);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code.as_deref(), Some("MALFORMED_REQUEST"));
    }

    #[test]
    fn scoring_failures_are_generic_without_diagnostics() {
        let error = Error::ScoringFailed("engine stack trace here".to_string());
        let (status, Json(body)) = failure(&error, false);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Comparison failed");
        assert!(body.detail.is_none());
    }

    #[test]
    fn diagnostics_mode_exposes_detail() {
        let error = Error::ScoringFailed("engine stack trace here".to_string());
        let (_, Json(body)) = failure(&error, true);
        let detail = body.detail.unwrap();
        assert!(detail.contains("engine stack trace here"));
        // The outward message stays generic even in diagnostic mode
        assert_eq!(body.message, "Comparison failed");
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let (status, _) = failure(&Error::ScoringTimeout, false);
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn storage_failure_is_masked_internal_error() {
        let error = Error::Storage(std::io::Error::other("disk on fire"));
        let (status, Json(body)) = failure(&error, false);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
        assert!(!body.message.contains("disk"));
    }
}
