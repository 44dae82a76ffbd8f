//! artscan-client - Compare two design files from the command line
//!
//! Drives the comparison state machine through one upload -> scan ->
//! result cycle against a running artscan-server.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use artscan_client::{ComparisonFlow, CompareClient, Phase, SelectedFile, Slot};
use clap::Parser;

/// Command-line arguments for artscan-client
#[derive(Parser, Debug)]
#[command(name = "artscan-client")]
#[command(about = "Compare two design images for similarity")]
#[command(version)]
struct Args {
    /// First design file
    file1: PathBuf,

    /// Second design file
    file2: PathBuf,

    /// Comparison server base URL
    #[arg(
        long,
        default_value = "http://localhost:5001",
        env = "ARTSCAN_SERVER_URL"
    )]
    server: String,
}

fn selected(path: &Path) -> Result<SelectedFile<()>> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot read file {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(SelectedFile {
        name,
        size: metadata.len(),
        path: path.to_path_buf(),
        // CLI has no preview resource to manage
        preview: (),
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artscan_client=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut flow = ComparisonFlow::new();
    flow.select(Slot::First, selected(&args.file1)?)
        .context("Cannot select first file")?;
    flow.select(Slot::Second, selected(&args.file2)?)
        .context("Cannot select second file")?;

    flow.begin_submit().context("Cannot submit comparison")?;
    let client = CompareClient::new(&args.server).context("Cannot build comparison client")?;

    println!("Analyzing designs...");
    flow.begin_scanning()
        .context("Comparison flow out of sequence")?;

    match client.submit(&args.file1, &args.file2).await {
        Ok(outcome) => {
            flow.complete(outcome)
                .context("Comparison flow out of sequence")?;
        }
        Err(error) => {
            flow.fail(error.user_message())
                .context("Comparison flow out of sequence")?;
        }
    }

    match flow.phase() {
        Phase::Complete(outcome) => {
            println!();
            println!("Similarity: {}%  [{}]", outcome.score, outcome.tier.label());
            println!("{}", outcome.tier.verdict());
            println!();
            println!(
                "  Design 1: {} ({} bytes)",
                outcome.file1.name, outcome.file1.size
            );
            println!(
                "  Design 2: {} ({} bytes)",
                outcome.file2.name, outcome.file2.size
            );
            Ok(ExitCode::SUCCESS)
        }
        Phase::Failed(message) => {
            eprintln!("Comparison failed: {}", message);
            Ok(ExitCode::FAILURE)
        }
        // submit/complete/fail above guarantee a terminal phase
        other => anyhow::bail!("comparison ended in unexpected state {:?}", other),
    }
}
