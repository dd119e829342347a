// src/utils/config.rs
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::error::StorageError;

/// Index page listing the daily "cuotapartes" spreadsheets.
pub const DEFAULT_INDEX_URL: &str = "https://www.cnv.gov.ar/SitioWeb/FondosComunesInversion/CuotaPartes";

/// Month/year fragments a download link's text must contain, tried in this order.
/// These go stale every month; override them with `--label`.
pub const DEFAULT_LINK_LABELS: &[&str] = &["jun 2025", "may 2025"];

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runtime configuration shared by the fetcher and the summarizer.
#[derive(Debug, Clone)]
pub struct Settings {
    pub index_url: String,
    pub link_labels: Vec<String>,
    pub download_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Settings {
    /// Settings equivalent to running the tool with no arguments.
    pub fn with_defaults() -> Result<Self, StorageError> {
        Ok(Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            link_labels: DEFAULT_LINK_LABELS.iter().map(|l| l.to_string()).collect(),
            download_dir: default_download_dir()?,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// `~/Downloads`, regardless of any XDG user-dirs override.
pub fn default_download_dir() -> Result<PathBuf, StorageError> {
    dirs::home_dir()
        .map(|home| home.join("Downloads"))
        .ok_or(StorageError::NoHomeDir)
}
