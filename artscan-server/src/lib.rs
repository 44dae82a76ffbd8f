//! artscan-server library interface
//!
//! Exposes the comparison pipeline and router construction for the
//! binary and for integration tests.

pub mod api;
pub mod ingest;
pub mod models;
pub mod scoring;
pub mod store;

use crate::scoring::ScoringOrchestrator;
use crate::store::AssetStore;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Two 50 MiB files plus multipart framing
const MAX_BODY_BYTES: usize = 105 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppContext {
    /// Asset storage backend
    pub store: Arc<dyn AssetStore>,
    /// Scoring call policy around the configured engine
    pub orchestrator: Arc<ScoringOrchestrator>,
    /// Expose internal failure detail in error payloads
    pub diagnostics: bool,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppContext {
    pub fn new(
        store: Arc<dyn AssetStore>,
        orchestrator: Arc<ScoringOrchestrator>,
        diagnostics: bool,
    ) -> Self {
        Self {
            store,
            orchestrator,
            diagnostics,
            startup_time: Utc::now(),
        }
    }
}

/// Build the application router
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(api::handlers::health))
        .route("/api/compare", post(api::handlers::compare))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
