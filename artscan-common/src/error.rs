//! Common error types for artscan
//!
//! One variant per failure class of the comparison pipeline. Validation
//! failures are terminal for a request and reported before any scoring
//! call; scoring failures are terminal with no automatic retry.

use thiserror::Error;

/// Common result type for artscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why an uploaded file was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// Extension or declared media type outside the allowed image set
    UnsupportedType { extension: String, mime_type: String },
    /// File larger than the upload limit
    Oversize { size_bytes: u64, limit_bytes: u64 },
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::UnsupportedType {
                extension,
                mime_type,
            } => write!(
                f,
                "only image files are allowed (got extension '{}', type '{}')",
                extension, mime_type
            ),
            InvalidReason::Oversize {
                size_bytes,
                limit_bytes,
            } => write!(
                f,
                "file is {} bytes, limit is {} bytes",
                size_bytes, limit_bytes
            ),
        }
    }
}

/// Error taxonomy for the comparison pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// One or both upload fields absent from the request
    #[error("Both images are required for comparison (missing: {})", .fields.join(", "))]
    MissingAsset { fields: Vec<String> },

    /// Uploaded file rejected during validation
    #[error("Invalid file '{filename}': {reason}")]
    InvalidAsset {
        filename: String,
        reason: InvalidReason,
    },

    /// Upload body could not be decoded (truncated or over-limit multipart)
    #[error("Malformed upload request: {0}")]
    MalformedRequest(String),

    /// Durable storage write failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Scoring engine did not answer within the configured timeout
    #[error("Scoring engine timed out")]
    ScoringTimeout,

    /// Scoring engine reported an internal failure
    #[error("Scoring failed: {0}")]
    ScoringFailed(String),

    /// Scoring engine returned a score outside [0,100]
    #[error("Scoring engine returned out-of-range score {0}")]
    ScoringContractViolation(i64),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Machine-readable code carried in error payloads
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingAsset { .. } => "MISSING_ASSET",
            Error::InvalidAsset { .. } => "INVALID_ASSET",
            Error::MalformedRequest(_) => "MALFORMED_REQUEST",
            Error::Storage(_) => "STORAGE_FAILURE",
            Error::ScoringTimeout => "SCORING_TIMEOUT",
            Error::ScoringFailed(_) => "SCORING_FAILED",
            Error::ScoringContractViolation(_) => "SCORING_CONTRACT_VIOLATION",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for failures the caller can fix (validation class)
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Error::MissingAsset { .. } | Error::InvalidAsset { .. } | Error::MalformedRequest(_)
        )
    }
}
