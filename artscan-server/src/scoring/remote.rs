//! Remote scoring engine client
//!
//! Calls an external image-analysis service over HTTP: the two stored
//! files are posted as a multipart request to `<base>/compare` and the
//! service answers with a JSON body carrying `similarity_score`.

use super::{EngineError, ScoringEngine};
use crate::store::Asset;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("artscan/", env!("CARGO_PKG_VERSION"));

/// Transport-level request timeout; the orchestrator applies the
/// per-comparison bound on top of this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Scoring service response (extra fields ignored)
#[derive(Debug, Deserialize)]
struct RemoteScore {
    similarity_score: f64,
}

/// HTTP client for a remote scoring service
pub struct RemoteEngine {
    http_client: reqwest::Client,
    base_url: String,
}

impl RemoteEngine {
    pub fn new(base_url: impl Into<String>) -> Result<Self, EngineError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EngineError::Unreachable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn file_part(asset: &Asset) -> Result<Part, EngineError> {
        let bytes = tokio::fs::read(&asset.stored_path).await?;
        Part::bytes(bytes)
            .file_name(asset.original_name.clone())
            .mime_str(&asset.mime_type)
            .map_err(|e| EngineError::Parse(format!("invalid media type: {}", e)))
    }
}

#[async_trait]
impl ScoringEngine for RemoteEngine {
    async fn score(&self, first: &Asset, second: &Asset) -> Result<i64, EngineError> {
        let form = Form::new()
            .part("original", Self::file_part(first).await?)
            .part("suspect", Self::file_part(second).await?);

        let url = format!("{}/compare", self.base_url);
        tracing::debug!(url = %url, "Querying scoring service");

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| EngineError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::Api(status.as_u16(), error_text));
        }

        let parsed: RemoteScore = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;

        // The service reports a percentage; the orchestrator rejects
        // anything outside [0,100]
        Ok(parsed.similarity_score.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing_ignores_extra_fields() {
        let json = r#"{
            "similarity_score": 87.4,
            "is_plagiarism": false,
            "breakdown": {"phash": 0.9, "orb": 0.8}
        }"#;
        let parsed: RemoteScore = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.similarity_score.round() as i64, 87);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let engine = RemoteEngine::new("http://localhost:8000/").unwrap();
        assert_eq!(engine.base_url, "http://localhost:8000");
    }
}
