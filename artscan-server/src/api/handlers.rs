//! HTTP request handlers

use crate::api::respond;
use crate::ingest;
use crate::models::ComparisonRequest;
use crate::AppContext;
use artscan_common::api::CompareResponse;
use artscan_common::Result;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
    uptime_seconds: u64,
}

/// GET /health - Health check endpoint
pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(ctx.startup_time);
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "artscan-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime.num_seconds().max(0) as u64,
    })
}

/// POST /api/compare - Compare two uploaded design images
pub async fn compare(State(ctx): State<AppContext>, mut multipart: Multipart) -> Response {
    info!("Comparison request received");

    match run_comparison(&ctx, &mut multipart).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(error) => {
            warn!(code = error.code(), "Comparison request failed: {}", error);
            respond::failure(&error, ctx.diagnostics).into_response()
        }
    }
}

async fn run_comparison(
    ctx: &AppContext,
    multipart: &mut Multipart,
) -> Result<CompareResponse> {
    let (asset_a, asset_b) = ingest::ingest_pair(multipart, ctx.store.as_ref()).await?;

    let mut request = ComparisonRequest::new(asset_a, asset_b);
    let result = ctx.orchestrator.run(&mut request).await?;

    Ok(respond::success(&result, &request.asset_a, &request.asset_b))
}
