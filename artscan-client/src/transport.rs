//! HTTP transport for the comparison endpoint
//!
//! Posts the two selected files as a multipart request and decodes the
//! response into an [`Outcome`]. Connectivity failures map to a single
//! generic user message; any other failure surfaces the server-provided
//! message when one can be parsed and a generic fallback otherwise, so a
//! malformed body never panics the client.

use crate::flow::Outcome;
use artscan_common::api::{CompareResponse, ErrorResponse};
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Shown when the server cannot be reached at all
pub const CANNOT_REACH_SERVER: &str = "Cannot connect to the comparison server";
/// Fallback when a response body cannot be interpreted
const GENERIC_FAILURE: &str = "Failed to compare designs";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum TransportError {
    /// Connectivity failure (refused, DNS, timed out)
    #[error("cannot reach server: {0}")]
    Unreachable(String),

    /// Server rejected the comparison; carries its message
    #[error("{0}")]
    Rejected(String),

    /// Response body did not match the wire contract
    #[error("malformed response: {0}")]
    Malformed(String),

    /// A selected file could not be read
    #[error("could not read {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TransportError {
    /// User-facing message; transport internals are never shown
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Unreachable(_) => CANNOT_REACH_SERVER.to_string(),
            TransportError::Rejected(message) => message.clone(),
            TransportError::Malformed(_) => GENERIC_FAILURE.to_string(),
            TransportError::File { path, .. } => {
                format!("Could not read file {}", path.display())
            }
        }
    }
}

/// Client for the comparison API
pub struct CompareClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CompareClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Submit both files and wait for the comparison result
    pub async fn submit(&self, first: &Path, second: &Path) -> Result<Outcome, TransportError> {
        let form = Form::new()
            .part("file1", file_part(first).await?)
            .part("file2", file_part(second).await?);

        let url = format!("{}/api/compare", self.base_url);
        tracing::debug!(url = %url, "Sending comparison request");

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let success = response.status().is_success();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        decode_response(success, &bytes)
    }
}

/// Decode a comparison response body
fn decode_response(success: bool, body: &[u8]) -> Result<Outcome, TransportError> {
    if !success {
        // Prefer the server's message; fall back when the body is not ours
        let message = serde_json::from_slice::<ErrorResponse>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| GENERIC_FAILURE.to_string());
        return Err(TransportError::Rejected(message));
    }

    let payload: CompareResponse =
        serde_json::from_slice(body).map_err(|e| TransportError::Malformed(e.to_string()))?;
    Ok(Outcome::from_score(
        payload.similarity_score,
        payload.file1,
        payload.file2,
    ))
}

async fn file_part(path: &Path) -> Result<Part, TransportError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| TransportError::File {
            path: path.to_path_buf(),
            source,
        })?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Part::bytes(bytes)
        .file_name(name)
        .mime_str(mime_for(path))
        .map_err(|e| TransportError::Malformed(e.to_string()))
}

/// Declared media type from the file extension
fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
