//! artscan-server - Design comparison service entry point
//!
//! Accepts two uploaded design images, stores them, invokes the
//! configured scoring engine and answers with a similarity score and
//! risk tier.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use artscan_common::config::{resolve_root_folder, TomlConfig};
use artscan_server::scoring::{DigestEngine, RemoteEngine, ScoringEngine, ScoringOrchestrator};
use artscan_server::store::LocalAssetStore;
use artscan_server::{build_router, AppContext};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SCORING_TIMEOUT_SECS: u64 = 30;

/// Command-line arguments for artscan-server
#[derive(Parser, Debug)]
#[command(name = "artscan-server")]
#[command(about = "Design similarity comparison service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5001", env = "ARTSCAN_PORT")]
    port: u16,

    /// Root folder for stored uploads (env/config file consulted if omitted)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Base URL of the remote scoring service; built-in engine if omitted
    #[arg(long, env = "ARTSCAN_ENGINE_URL")]
    engine_url: Option<String>,

    /// Bounded wait for a single scoring call, in seconds
    #[arg(long)]
    scoring_timeout_secs: Option<u64>,

    /// Include internal failure detail in error payloads
    #[arg(long, env = "ARTSCAN_DIAGNOSTICS")]
    diagnostics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artscan_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting artscan-server v{}", env!("CARGO_PKG_VERSION"));

    let toml_config = TomlConfig::load();
    let root_folder = resolve_root_folder(args.root_folder.as_ref(), &toml_config);
    info!("Root folder: {}", root_folder.display());

    let store = Arc::new(
        LocalAssetStore::new(&root_folder).context("Failed to initialize asset store")?,
    );

    let engine_url = args.engine_url.or(toml_config.engine_url);
    let engine: Arc<dyn ScoringEngine> = match engine_url {
        Some(url) => {
            info!("Scoring engine: remote service at {}", url);
            Arc::new(RemoteEngine::new(url).context("Failed to build scoring engine client")?)
        }
        None => {
            info!("Scoring engine: built-in digest comparison");
            Arc::new(DigestEngine::new())
        }
    };

    let timeout_secs = args
        .scoring_timeout_secs
        .or(toml_config.scoring_timeout_secs)
        .unwrap_or(DEFAULT_SCORING_TIMEOUT_SECS);
    let orchestrator = Arc::new(ScoringOrchestrator::new(
        engine,
        Duration::from_secs(timeout_secs),
    ));
    info!("Scoring timeout: {}s", timeout_secs);

    if args.diagnostics {
        info!("Diagnostic mode enabled: error payloads include internal detail");
    }

    let ctx = AppContext::new(store, orchestrator, args.diagnostics);
    let app = build_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("artscan-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
