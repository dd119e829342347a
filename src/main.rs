// src/main.rs
mod utils;
mod cnv;
mod extractors;
mod storage;
mod summary;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use utils::{AppError, Settings};
use storage::StorageManager;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Downloads the latest CNV daily fund valuations and writes a fund/yield summary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Index page listing the downloadable spreadsheets
    #[arg(long)]
    index_url: Option<String>,

    /// Text the download link must contain (repeatable, tried in order).
    /// Replaces the built-in "jun 2025" / "may 2025" pair.
    #[arg(short, long = "label")]
    labels: Vec<String>,

    /// Directory for the temporary download and the summary (default: ~/Downloads)
    #[arg(short, long)]
    download_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = utils::config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl Args {
    fn into_settings(self) -> Result<Settings, AppError> {
        let mut settings = Settings::with_defaults()?;

        if let Some(index_url) = self.index_url {
            settings.index_url = index_url;
        }
        url::Url::parse(&settings.index_url)
            .map_err(|e| AppError::Config(format!("Invalid index URL '{}': {}", settings.index_url, e)))?;

        if !self.labels.is_empty() {
            settings.link_labels = self.labels;
        }
        if let Some(dir) = self.download_dir {
            settings.download_dir = dir;
        }
        settings.request_timeout = Duration::from_secs(self.timeout_secs);

        Ok(settings)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let settings = Args::parse().into_settings()?;
    tracing::debug!("Running with settings: {:?}", settings);

    tracing::info!("=== CNV DAILY VALUES AUTOMATION ===");
    tracing::info!("Starting: {}", chrono::Local::now().format(TIMESTAMP_FORMAT));

    // 3. Initialize storage
    let storage = StorageManager::new(&settings.download_dir)?;

    // 4. Download the most recent spreadsheet
    let Some(document) = cnv::fetch_latest(&settings, &storage).await else {
        tracing::warn!("Could not download the spreadsheet. Stopping.");
        return Ok(());
    };

    // 5. Summarize it (removes the download either way)
    if summary::summarize(&document.path, &document.label, &storage) {
        tracing::info!("Process completed successfully");
    } else {
        tracing::error!("There were errors while processing");
    }

    tracing::info!("Finished: {}", chrono::Local::now().format(TIMESTAMP_FORMAT));
    Ok(())
}
