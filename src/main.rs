//! `firmrel`: publish new vendor firmware builds as GitHub releases.
//!
//! Exits `0` when the run completes (even if nothing was new) and `1` when
//! configuration is missing, the catalog can't be fetched, or the release
//! history can't be saved.

use clap::Parser;
use firmrel_config::{Config, Overrides};
use firmrel_pipeline::Pipeline;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file (TOML, YAML or JSON).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Router model identifier [default: mt6000]
    #[arg(short, long)]
    model: Option<String>,
    /// Release target in owner/repo form.
    #[arg(short, long)]
    repository: Option<String>,
    /// Release history file [default: release_history.json]
    #[arg(long, value_name = "FILE")]
    history_file: Option<PathBuf>,
    /// Directory firmware is downloaded to before upload.
    #[arg(long, value_name = "DIR")]
    work_dir: Option<PathBuf>,
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}
impl From<&Args> for Overrides {
    fn from(args: &Args) -> Self {
        Overrides {
            model: args.model.clone(),
            repository: args.repository.clone(),
            history_file: args.history_file.clone(),
            work_dir: args.work_dir.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = match Config::load(args.config.as_deref(), Overrides::from(&args)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = ?e, "Failed to load configuration");
            return ExitCode::FAILURE;
        },
    };
    let pipeline = match Pipeline::with_gh(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!(error = ?e, "Failed to start");
            return ExitCode::FAILURE;
        },
    };

    match pipeline.run().await {
        Ok(summary) if summary.published() == 0 => {
            tracing::info!("No new firmware releases found");
            ExitCode::SUCCESS
        },
        Ok(summary) => {
            tracing::info!("Created {} new release(s)", summary.published());
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!(error = ?e, "Run aborted");
            ExitCode::FAILURE
        },
    }
}
